//! Procedural drawing of the application icon
//!
//! Each raster starts as a diagonal two-colour gradient and is then decorated
//! with spreadsheet grid lines, a drop-shadowed block "E" and a thin border.
//! All geometry is derived from the raster width alone, so every size is a
//! scaled copy of the others up to rounding.

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Lighter green in the top-left corner
pub const GRADIENT_START: Rgba<u8> = Rgba([60, 168, 100, 255]);
/// Darker green towards the bottom-right corner (#217346)
pub const GRADIENT_END: Rgba<u8> = Rgba([33, 115, 70, 255]);
pub const GRID_COLOR: Rgba<u8> = Rgba([255, 255, 255, 40]);
pub const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 80]);
pub const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 100]);

/// Round half up. Only used for the non-negative values derived from sizes.
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

/// Integer parameters of the decorations for one square raster size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub size: u32,
    /// Inset of the glyph from every edge
    pub margin: u32,
    /// Thickness of each glyph bar
    pub thickness: u32,
    pub shadow_offset: u32,
    pub grid_width: u32,
    pub border_width: u32,
}

impl Geometry {
    pub fn for_size(size: u32) -> Self {
        let s = size as f64;
        Self {
            size,
            margin: round_half_up(s * 0.20),
            thickness: round_half_up(s * 0.12),
            shadow_offset: round_half_up(s / 32.0).max(1),
            grid_width: round_half_up(s / 64.0).max(1),
            border_width: round_half_up(s / 128.0).max(1),
        }
    }

    /// The glyph fits inside the raster and its three horizontal bars don't merge.
    pub fn is_well_formed(&self) -> bool {
        let glyph_height = self.size.saturating_sub(2 * self.margin);
        2 * self.margin < self.size && 3 * self.thickness <= glyph_height
    }
}

/// Half-open pixel rectangle `[left, right) x [top, bottom)`.
///
/// Signed so a shadow offset may push it past the raster; painting only ever
/// visits pixels that exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Build the backdrop: `end` pasted over `start` through a diagonal mask.
///
/// The blend fraction at `(x, y)` is `(x + y) / (width + height)`, so the
/// top-left pixel is exactly `start` and the bottom-right one is close to `end`.
pub fn create_gradient(width: u32, height: u32, start: Rgba<u8>, end: Rgba<u8>) -> RgbaImage {
    let mut base = RgbaImage::from_pixel(width, height, start);
    let top = RgbaImage::from_pixel(width, height, end);
    let mask = gradient_mask(width, height);

    paste_with_mask(&mut base, &top, &mask);
    base
}

/// Single-channel mask with intensity `floor(255 * p)` at every pixel.
pub fn gradient_mask(width: u32, height: u32) -> GrayImage {
    let span = (width + height) as f64;
    GrayImage::from_fn(width, height, |x, y| {
        let p = (x + y) as f64 / span;
        Luma([(255.0 * p) as u8])
    })
}

// Mask 0 keeps `base`, 255 takes `top`.
fn paste_with_mask(base: &mut RgbaImage, top: &RgbaImage, mask: &GrayImage) {
    for ((dst, src), m) in base.pixels_mut().zip(top.pixels()).zip(mask.pixels()) {
        let m = m[0] as u32;
        let inv = 255 - m;
        for c in 0..4 {
            dst[c] = ((dst[c] as u32 * inv + src[c] as u32 * m + 127) / 255) as u8;
        }
    }
}

/// Write `color` into every pixel covered by any of `rects`.
///
/// The colour replaces what is underneath, alpha included, so translucent
/// decorations leave translucent pixels behind.
fn fill_rects(img: &mut RgbaImage, rects: &[Rect], color: Rgba<u8>) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (x, y) = (x as i32, y as i32);
        if rects.iter().any(|r| r.contains(x, y)) {
            *pixel = color;
        }
    }
}

/// Two internal vertical and two internal horizontal dividers of a 3x3 layout
pub fn grid_lines(geometry: &Geometry) -> Vec<Rect> {
    let size = geometry.size as i32;
    let width = geometry.grid_width as i32;

    (1..=2)
        .flat_map(|i| {
            let start = i * size / 3 - width / 2;
            let end = start + width;
            [
                Rect::new(start, 0, end, size),
                Rect::new(0, start, size, end),
            ]
        })
        .collect()
}

/// Left bar, top bar, middle bar and bottom bar of the "E"
pub fn glyph_rects(geometry: &Geometry) -> [Rect; 4] {
    let size = geometry.size as i32;
    let margin = geometry.margin as i32;
    let thickness = geometry.thickness as i32;
    let far = size - margin;
    let mid_y = size / 2 - thickness / 2;

    [
        Rect::new(margin, margin, margin + thickness, far),
        Rect::new(margin, margin, far, margin + thickness),
        Rect::new(margin, mid_y, far, mid_y + thickness),
        Rect::new(margin, far - thickness, far, far),
    ]
}

/// Outline inset to the raster bounds
pub fn border_rects(geometry: &Geometry) -> [Rect; 4] {
    let size = geometry.size as i32;
    let width = geometry.border_width as i32;

    [
        Rect::new(0, 0, size, width),
        Rect::new(0, size - width, size, size),
        Rect::new(0, 0, width, size),
        Rect::new(size - width, 0, size, size),
    ]
}

/// Draw the grid, the shadowed glyph and the border, in that order.
pub fn decorate(img: &mut RgbaImage) {
    let geometry = Geometry::for_size(img.width());
    debug_assert!(
        geometry.is_well_formed(),
        "glyph does not fit a {}px raster",
        geometry.size
    );

    fill_rects(img, &grid_lines(&geometry), GRID_COLOR);

    let glyph = glyph_rects(&geometry);
    let offset = geometry.shadow_offset as i32;
    fill_rects(img, &glyph.map(|r| r.offset(offset, offset)), SHADOW_COLOR);
    fill_rects(img, &glyph, GLYPH_COLOR);

    fill_rects(img, &border_rects(&geometry), BORDER_COLOR);
}

/// Render the finished icon at `size` x `size`.
pub fn render_icon(size: u32) -> RgbaImage {
    let mut img = create_gradient(size, size, GRADIENT_START, GRADIENT_END);
    decorate(&mut img);
    img
}
