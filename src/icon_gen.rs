use crate::render::render_icon;
use anyhow::{bail, ensure, Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use std::{
    collections::HashSet,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    ops::Range,
    path::{Path, PathBuf},
};

/// Embedded resolutions, largest first. The first entry is the base image.
pub const ICON_SIZES: [(u32, u32); 6] = [
    (256, 256),
    (128, 128),
    (64, 64),
    (48, 48),
    (32, 32),
    (16, 16),
];

pub const DEFAULT_OUTPUT: &str = "app_icon.ico";

const ICONDIR_LEN: usize = 6;
const ICONDIRENTRY_LEN: usize = 16;

// Define Args struct for library callers
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// One directory entry of an ICO file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoEntry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub data: Range<usize>,
}

/// Render every size and write them into a single ICO file.
pub fn generate_icon(args: Args) -> Result<()> {
    validate_sizes(&ICON_SIZES)?;

    let images = render_all(&ICON_SIZES);
    write_ico(&images, &ICON_SIZES, &args.output)?;
    println!("✓ Generated {}", args.output.display());

    Ok(())
}

/// Render one raster per entry of `sizes`, in the same order.
pub fn render_all(sizes: &[(u32, u32)]) -> Vec<RgbaImage> {
    sizes.iter().map(|&(width, _)| render_icon(width)).collect()
}

/// Sizes must be square, unique, strictly descending and fit in an ICO entry.
pub fn validate_sizes(sizes: &[(u32, u32)]) -> Result<()> {
    ensure!(!sizes.is_empty(), "Size list is empty");

    let mut seen = HashSet::new();
    for &(width, height) in sizes {
        ensure!(width == height, "Icon size {width}x{height} is not square");
        ensure!(
            (1..=256).contains(&width),
            "Icon size {width}x{height} is outside the ICO range 1..=256"
        );
        ensure!(seen.insert(width), "Icon size {width}x{height} is listed twice");
    }

    if sizes.windows(2).any(|pair| pair[0].0 <= pair[1].0) {
        bail!("Icon sizes must be ordered from largest to smallest: {sizes:?}");
    }

    Ok(())
}

/// Encode the rasters into ICO bytes, largest first.
pub fn encode_ico(images: &[RgbaImage], sizes: &[(u32, u32)]) -> Result<Vec<u8>> {
    ensure!(
        images.len() == sizes.len(),
        "Rendered {} images for {} declared sizes",
        images.len(),
        sizes.len()
    );

    let mut frames = Vec::with_capacity(images.len());
    for (image, &(width, height)) in images.iter().zip(sizes) {
        ensure!(
            image.dimensions() == (width, height),
            "Image is {}x{} but the size list declares {width}x{height}",
            image.width(),
            image.height()
        );

        // The 256px layer dominates the file size, so squeeze it harder
        if width == 256 {
            let mut buf = Vec::new();
            write_png(image.as_raw(), &mut buf, width)?;
            frames.push(IcoFrame::with_encoded(buf, width, height, ColorType::Rgba8)?);
        } else {
            frames.push(IcoFrame::as_png(
                image.as_raw(),
                width,
                height,
                ColorType::Rgba8,
            )?);
        }
    }

    let mut out = Vec::new();
    IcoEncoder::new(&mut out)
        .encode_images(&frames)
        .context("Failed to encode ICO")?;
    Ok(out)
}

/// Encode everything first, then write the file in one go.
pub fn write_ico(images: &[RgbaImage], sizes: &[(u32, u32)], path: &Path) -> Result<()> {
    let bytes = encode_ico(images, sizes)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write each raster as `<W>x<H>.png` into `out_dir`, creating it if needed.
pub fn save_pngs(images: &[RgbaImage], out_dir: &Path) -> Result<()> {
    create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for image in images {
        let (width, height) = image.dimensions();
        let path = out_dir.join(format!("{width}x{height}.png"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut out = BufWriter::new(file);
        write_png(image.as_raw(), &mut out, width)?;
        out.flush()?;
        println!("  ✓ Generated {}", path.display());
    }

    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// Parse the ICONDIR header and its entries.
pub fn read_ico_directory(bytes: &[u8]) -> Result<Vec<IcoEntry>> {
    ensure!(bytes.len() >= ICONDIR_LEN, "File is too short for an ICO header");

    let reserved = u16::from_le_bytes([bytes[0], bytes[1]]);
    let kind = u16::from_le_bytes([bytes[2], bytes[3]]);
    let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    ensure!(reserved == 0 && kind == 1, "Not an ICO file");

    let dir_end = ICONDIR_LEN + count * ICONDIRENTRY_LEN;
    ensure!(bytes.len() >= dir_end, "ICO directory is truncated");

    let mut entries = Vec::with_capacity(count);
    for raw in bytes[ICONDIR_LEN..dir_end].chunks_exact(ICONDIRENTRY_LEN) {
        // A stored 0 means 256
        let width = if raw[0] == 0 { 256 } else { raw[0] as u32 };
        let height = if raw[1] == 0 { 256 } else { raw[1] as u32 };
        let bits_per_pixel = u16::from_le_bytes([raw[6], raw[7]]);
        let len = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]) as usize;
        let offset = u32::from_le_bytes([raw[12], raw[13], raw[14], raw[15]]) as usize;

        let end = offset
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .with_context(|| format!("Image data for {width}x{height} is out of bounds"))?;

        entries.push(IcoEntry {
            width,
            height,
            bits_per_pixel,
            data: offset..end,
        });
    }

    Ok(entries)
}

/// Decode the image stored for `entry`.
pub fn decode_frame(bytes: &[u8], entry: &IcoEntry) -> Result<DynamicImage> {
    image::load_from_memory(&bytes[entry.data.clone()]).with_context(|| {
        format!(
            "Failed to decode {}x{} frame",
            entry.width, entry.height
        )
    })
}
