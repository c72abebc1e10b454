//! Raster primitives: rectangles, colormap, bitmap digits

use image::{Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const DARK_GRAY: Rgb<u8> = Rgb([38, 38, 38]);

/// Draw a filled rectangle, clipped to the image
pub fn draw_filled_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(width).min(img.width());
    let y_end = y.saturating_add(height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Interpolate between two colors
pub fn interpolate_color(c1: Rgb<u8>, c2: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgb([
        ((1.0 - t) * c1.0[0] as f64 + t * c2.0[0] as f64).round() as u8,
        ((1.0 - t) * c1.0[1] as f64 + t * c2.0[1] as f64).round() as u8,
        ((1.0 - t) * c1.0[2] as f64 + t * c2.0[2] as f64).round() as u8,
    ])
}

/// Sequential dark-to-light colormap (seaborn "rocket" anchors)
const ROCKET: [Rgb<u8>; 6] = [
    Rgb([3, 5, 26]),
    Rgb([76, 29, 75]),
    Rgb([161, 26, 91]),
    Rgb([232, 63, 63]),
    Rgb([246, 156, 115]),
    Rgb([250, 235, 221]),
];

/// Map a value in `[0, 1]` to a color
pub fn value_to_color(value: f64) -> Rgb<u8> {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let segments = (ROCKET.len() - 1) as f64;
    let pos = v * segments;
    let i = (pos.floor() as usize).min(ROCKET.len() - 2);
    interpolate_color(ROCKET[i], ROCKET[i + 1], pos - i as f64)
}

/// Annotation color readable on top of `background`
pub fn contrasting_text(background: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = background.0;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance > 140.0 {
        DARK_GRAY
    } else {
        WHITE
    }
}

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

/// 5x7 glyphs, one byte per row, bit 4 is the leftmost column
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// Pixel width of `text` at `scale` (one blank column between glyphs)
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        (n * (GLYPH_W + 1) - 1) * scale
    }
}

pub fn text_height(scale: u32) -> u32 {
    GLYPH_H * scale
}

/// Draw `text` with its top-left corner at (x, y). Characters without a
/// glyph leave a blank cell.
pub fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0x10 >> col) != 0 {
                        draw_filled_rect(
                            img,
                            cursor + col * scale,
                            y + row as u32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        cursor += (GLYPH_W + 1) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_color() {
        let mid = interpolate_color(BLACK, WHITE, 0.5);
        assert_eq!(mid, Rgb([128, 128, 128]));
    }

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(value_to_color(0.0), ROCKET[0]);
        assert_eq!(value_to_color(1.0), ROCKET[5]);
        assert_eq!(value_to_color(-3.0), ROCKET[0]);
        assert_eq!(value_to_color(f64::NAN), ROCKET[0]);
    }

    #[test]
    fn test_colormap_gets_lighter() {
        let lum = |c: Rgb<u8>| c.0.iter().map(|&v| v as u32).sum::<u32>();
        assert!(lum(value_to_color(0.9)) > lum(value_to_color(0.1)));
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(contrasting_text(value_to_color(0.0)), WHITE);
        assert_eq!(contrasting_text(value_to_color(1.0)), DARK_GRAY);
    }

    #[test]
    fn test_text_metrics() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("0.50", 1), 23);
        assert_eq!(text_height(3), 21);
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut img = RgbImage::from_pixel(20, 10, WHITE);
        draw_text(&mut img, 0, 0, "1", 1, BLACK);
        // top of the '1' stem
        assert_eq!(*img.get_pixel(2, 0), BLACK);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_filled_rect_clips() {
        let mut img = RgbImage::from_pixel(4, 4, WHITE);
        draw_filled_rect(&mut img, 2, 2, 10, 10, BLACK);
        assert_eq!(*img.get_pixel(3, 3), BLACK);
        assert_eq!(*img.get_pixel(1, 1), WHITE);
    }
}
