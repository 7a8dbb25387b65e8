use anyhow::{bail, Context, Result};
use app_icon_gen::icon_gen::{
    decode_frame, read_ico_directory, save_pngs, DEFAULT_OUTPUT, ICON_SIZES,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "verify_icon",
    about = "Check that an ICO embeds every app icon size with alpha"
)]
struct Args {
    /// ICO file to inspect.
    #[clap(value_name = "ICO", default_value = DEFAULT_OUTPUT)]
    input: PathBuf,

    /// Export each embedded frame as <W>x<H>.png into this directory.
    #[clap(long, value_name = "DIR")]
    png_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = &args.input;

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let entries = read_ico_directory(&bytes)?;

    println!("Checking icon: {}", path.display());
    println!("Embedded images: {}", entries.len());

    let mut problems = 0;
    let mut frames = Vec::with_capacity(entries.len());
    for entry in &entries {
        let frame = decode_frame(&bytes, entry)?;
        let alpha = frame.color().has_alpha();
        let matches = frame.width() == entry.width && frame.height() == entry.height;

        println!(
            "  {}x{} @ {} bpp, {} bytes, alpha: {}",
            entry.width,
            entry.height,
            entry.bits_per_pixel,
            entry.data.len(),
            alpha
        );

        if !alpha || !matches {
            problems += 1;
        }
        frames.push(frame.to_rgba8());
    }

    let found: Vec<(u32, u32)> = entries.iter().map(|e| (e.width, e.height)).collect();
    if problems > 0 || found != ICON_SIZES {
        bail!(
            "⚠ Expected sizes {:?} with alpha, found {:?} ({} bad frames)",
            ICON_SIZES,
            found,
            problems
        );
    }
    println!("✓ All {} sizes present with alpha", ICON_SIZES.len());

    if let Some(dir) = &args.png_dir {
        save_pngs(&frames, dir)?;
    }

    Ok(())
}
