use app_icon_gen::icon_gen::ICON_SIZES;
use app_icon_gen::render::{
    border_rects, create_gradient, glyph_rects, grid_lines, render_icon, Geometry, Rect,
    BORDER_COLOR, GLYPH_COLOR, GRADIENT_END, GRADIENT_START, GRID_COLOR, SHADOW_COLOR,
};

#[test]
fn test_smallest_size_geometry() {
    let geometry = Geometry::for_size(16);

    assert_eq!(geometry.margin, 3, "round(0.20 * 16)");
    assert_eq!(geometry.thickness, 2, "round(0.12 * 16)");
    assert_eq!(geometry.shadow_offset, 1);
    assert_eq!(geometry.border_width, 1);
    assert_eq!(geometry.grid_width, 1);
}

#[test]
fn test_largest_size_geometry() {
    let geometry = Geometry::for_size(256);

    assert_eq!(geometry.margin, 51);
    assert_eq!(geometry.thickness, 31);
    assert_eq!(geometry.shadow_offset, 8);
    assert_eq!(geometry.grid_width, 4);
    assert_eq!(geometry.border_width, 2);
}

#[test]
fn test_geometry_scales_with_size() {
    for (size, _) in ICON_SIZES {
        let geometry = Geometry::for_size(size);
        let s = size as f64;

        assert!((geometry.margin as f64 - 0.20 * s).abs() <= 1.0, "margin at {size}");
        assert!((geometry.thickness as f64 - 0.12 * s).abs() <= 1.0, "thickness at {size}");
        assert!(
            (geometry.shadow_offset as f64 - (s / 32.0).max(1.0)).abs() <= 1.0,
            "shadow offset at {size}"
        );
    }
}

#[test]
fn test_glyph_fits_every_packaged_size() {
    for (size, _) in ICON_SIZES {
        let geometry = Geometry::for_size(size);
        assert!(geometry.is_well_formed(), "glyph does not fit {size}px");

        // Shadow stays inside the raster too
        let offset = geometry.shadow_offset as i32;
        for rect in glyph_rects(&geometry) {
            let shadow = rect.offset(offset, offset);
            assert!(shadow.left >= 0 && shadow.top >= 0);
            assert!(shadow.right <= size as i32 && shadow.bottom <= size as i32);
        }
    }
}

#[test]
fn test_glyph_bars_are_separated_at_16px() {
    let geometry = Geometry::for_size(16);
    let [vertical, top, middle, bottom] = glyph_rects(&geometry);

    assert_eq!((vertical.left, vertical.right), (3, 5));
    assert_eq!((top.top, top.bottom), (3, 5));
    assert_eq!((middle.top, middle.bottom), (7, 9));
    assert_eq!((bottom.top, bottom.bottom), (11, 13));
    assert!(top.bottom < middle.top && middle.bottom < bottom.top);
}

#[test]
fn test_gradient_boundaries() {
    let gradient = create_gradient(256, 256, GRADIENT_START, GRADIENT_END);

    assert_eq!(*gradient.get_pixel(0, 0), GRADIENT_START);

    let corner = gradient.get_pixel(255, 255);
    for c in 0..4 {
        let diff = (corner[c] as i32 - GRADIENT_END[c] as i32).abs();
        assert!(diff <= 1, "channel {c} is {} vs {}", corner[c], GRADIENT_END[c]);
    }
}

#[test]
fn test_gradient_moves_towards_end_colour() {
    for (size, _) in ICON_SIZES {
        let gradient = create_gradient(size, size, GRADIENT_START, GRADIENT_END);
        let corner = gradient.get_pixel(size - 1, size - 1);

        // Green falls monotonically from start (168) to end (115)
        let distance_to_end = corner[1] as i32 - GRADIENT_END[1] as i32;
        let distance_to_start = GRADIENT_START[1] as i32 - corner[1] as i32;
        assert!(distance_to_end < distance_to_start, "corner at {size}px");
    }
}

#[test]
fn test_render_is_deterministic() {
    for (size, _) in ICON_SIZES {
        let first = render_icon(size);
        let second = render_icon(size);
        assert_eq!(first.as_raw(), second.as_raw(), "render at {size}px differs");
    }
}

#[test]
fn test_render_only_leaves_decoration_translucency() {
    for (size, _) in ICON_SIZES {
        let img = render_icon(size);
        assert_eq!(img.dimensions(), (size, size));

        for pixel in img.pixels() {
            assert!(
                pixel[3] == 255
                    || *pixel == GRID_COLOR
                    || *pixel == SHADOW_COLOR
                    || *pixel == BORDER_COLOR,
                "unexpected translucent pixel {pixel:?} at {size}px"
            );
        }
    }
}

#[test]
fn test_grid_and_border_rects_at_16px() {
    let geometry = Geometry::for_size(16);

    assert_eq!(
        grid_lines(&geometry),
        vec![
            Rect::new(5, 0, 6, 16),
            Rect::new(0, 5, 16, 6),
            Rect::new(10, 0, 11, 16),
            Rect::new(0, 10, 16, 11),
        ]
    );
    assert_eq!(
        border_rects(&geometry),
        [
            Rect::new(0, 0, 16, 1),
            Rect::new(0, 15, 16, 16),
            Rect::new(0, 0, 1, 16),
            Rect::new(15, 0, 16, 16),
        ]
    );
}

#[test]
fn test_grid_and_border_rects_at_256px() {
    let geometry = Geometry::for_size(256);

    assert_eq!(
        grid_lines(&geometry),
        vec![
            Rect::new(83, 0, 87, 256),
            Rect::new(0, 83, 256, 87),
            Rect::new(168, 0, 172, 256),
            Rect::new(0, 168, 256, 172),
        ]
    );
    assert_eq!(
        border_rects(&geometry),
        [
            Rect::new(0, 0, 256, 2),
            Rect::new(0, 254, 256, 256),
            Rect::new(0, 0, 2, 256),
            Rect::new(254, 0, 256, 256),
        ]
    );
}

#[test]
fn test_glyph_is_painted_in_foreground_colour() {
    let size = 256;
    let geometry = Geometry::for_size(size);
    let img = render_icon(size);

    // Inside the left bar, clear of the other bars
    let x = geometry.margin + geometry.thickness / 2;
    let y = geometry.margin + geometry.thickness + 5;
    assert_eq!(*img.get_pixel(x, y), GLYPH_COLOR);
}

#[test]
fn test_decorations_replace_the_backdrop() {
    let size = 256;
    let geometry = Geometry::for_size(size);
    let img = render_icon(size);
    let gradient = create_gradient(size, size, GRADIENT_START, GRADIENT_END);

    // Left border, away from the grid and the glyph
    assert_eq!(*img.get_pixel(0, size / 2), BORDER_COLOR);

    // First vertical grid line, above the glyph
    assert_eq!(*img.get_pixel(size / 3, 20), GRID_COLOR);

    // Just right of the top bar, where only its shadow lands
    let x = size - geometry.margin;
    let y = geometry.margin + geometry.shadow_offset + 1;
    assert_eq!(*img.get_pixel(x, y), SHADOW_COLOR);

    // Shadow under the glyph is hidden by the foreground
    let x = geometry.margin + geometry.shadow_offset + 1;
    assert_eq!(*img.get_pixel(x, x), GLYPH_COLOR);

    // Centre of the top-left cell is untouched
    assert_eq!(img.get_pixel(20, 20), gradient.get_pixel(20, 20));
}

#[test]
fn test_smallest_icon_pixels() {
    let img = render_icon(16);

    assert_eq!(*img.get_pixel(0, 0), BORDER_COLOR);
    assert_eq!(*img.get_pixel(15, 7), BORDER_COLOR);
    assert_eq!(*img.get_pixel(5, 1), GRID_COLOR);
    // Left bar, and the shadow one pixel right of the top bar's end
    assert_eq!(*img.get_pixel(3, 6), GLYPH_COLOR);
    assert_eq!(*img.get_pixel(13, 4), SHADOW_COLOR);
}
