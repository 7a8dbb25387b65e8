use anyhow::Result;
use app_icon_gen::icon_gen;
use clap::Parser;

/// Takes no arguments: always writes `app_icon.ico` into the working directory.
#[derive(Debug, Parser)]
#[clap(
    name = "app-icon-gen",
    version,
    about = "Render the application icon and pack every size into app_icon.ico"
)]
struct Args {}

fn main() -> Result<()> {
    Args::parse();

    icon_gen::generate_icon(icon_gen::Args::default())
}
