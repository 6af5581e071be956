use crate::GizmoError;
use axisview_common::Color3;
use image::{Rgba, RgbaImage};

/// How text is laid out on a dynamic texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Texture edge length in pixels. Textures are square.
    pub texture_size: u32,
    /// Left edge of the first glyph, in pixels.
    pub x: f32,
    /// Baseline, in pixels from the top.
    pub baseline: f32,
    /// Height of a full glyph cell, in pixels.
    pub font_px: f32,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            texture_size: 50,
            x: 5.0,
            baseline: 40.0,
            font_px: 36.0,
            bold: true,
        }
    }
}

/// Rows of the 8x8 cell that sit above the baseline.
const ROWS_ABOVE_BASELINE: f32 = 7.0;

/// 8x8 bitmap for a character, one byte per row, most significant bit on the left.
pub fn glyph_bitmap(ch: char) -> Option<[u8; 8]> {
    match ch {
        ' ' => Some([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        '-' => Some([0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00]),
        '+' => Some([0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00]),
        '0' => Some([0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00]),
        '1' => Some([0x18, 0x18, 0x38, 0x18, 0x18, 0x18, 0x7E, 0x00]),
        '2' => Some([0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00]),
        '3' => Some([0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00]),
        '4' => Some([0x06, 0x0E, 0x1E, 0x66, 0x7F, 0x06, 0x06, 0x00]),
        '5' => Some([0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00]),
        '6' => Some([0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00]),
        '7' => Some([0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00]),
        '8' => Some([0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00]),
        '9' => Some([0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00]),
        'A' => Some([0x18, 0x3C, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00]),
        'B' => Some([0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00]),
        'C' => Some([0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00]),
        'D' => Some([0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00]),
        'E' => Some([0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x7E, 0x00]),
        'F' => Some([0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x60, 0x00]),
        'G' => Some([0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00]),
        'H' => Some([0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00]),
        'I' => Some([0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00]),
        'J' => Some([0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00]),
        'K' => Some([0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00]),
        'L' => Some([0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00]),
        'M' => Some([0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00]),
        'N' => Some([0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00]),
        'O' => Some([0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00]),
        'P' => Some([0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00]),
        'Q' => Some([0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00]),
        'R' => Some([0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00]),
        'S' => Some([0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00]),
        'T' => Some([0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00]),
        'U' => Some([0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00]),
        'V' => Some([0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00]),
        'W' => Some([0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00]),
        'X' => Some([0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00]),
        'Y' => Some([0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00]),
        'Z' => Some([0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00]),
        _ => None,
    }
}

/// Rasterize `text` onto a transparent square texture in the given color.
///
/// Each glyph cell is scaled to `font_px` with nearest-neighbor sampling and
/// advanced by one cell; glyphs past the right edge are clipped. Bold smears
/// every row one bitmap column to the right.
pub fn rasterize_text(text: &str, color: Color3, style: &TextStyle) -> Result<RgbaImage, GizmoError> {
    if text.is_empty() {
        return Err(GizmoError::EmptyText);
    }
    let glyphs = text
        .chars()
        .map(|ch| glyph_bitmap(ch).ok_or(GizmoError::UnsupportedGlyph(ch)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut img = RgbaImage::from_pixel(style.texture_size, style.texture_size, Rgba([0, 0, 0, 0]));
    let ink = Rgba(color.to_rgba8(u8::MAX));
    let cell = style.font_px / 8.0;
    let top = style.baseline - ROWS_ABOVE_BASELINE * cell;

    for (index, rows) in glyphs.iter().enumerate() {
        let left = style.x + index as f32 * style.font_px;
        for (px, py, pixel) in img.enumerate_pixels_mut() {
            let cx = ((px as f32 + 0.5 - left) / cell).floor();
            let cy = ((py as f32 + 0.5 - top) / cell).floor();
            if !(0.0..8.0).contains(&cx) || !(0.0..8.0).contains(&cy) {
                continue;
            }
            let mut row = rows[cy as usize];
            if style.bold {
                row |= row >> 1;
            }
            if row & (0x80 >> cx as u32) != 0 {
                *pixel = ink;
            }
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_letters_have_glyphs() {
        for ch in ['X', 'Y', 'Z'] {
            assert!(glyph_bitmap(ch).is_some(), "missing glyph {ch}");
        }
        assert!(glyph_bitmap('é').is_none());
    }

    #[test]
    fn background_stays_transparent() {
        let img = rasterize_text("X", Color3::RED, &TextStyle::default()).unwrap();
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(49, 49).0, [0, 0, 0, 0]);
    }

    #[test]
    fn glyph_center_is_inked_in_color() {
        let img = rasterize_text("X", Color3::GREEN, &TextStyle::default()).unwrap();
        // Row 3 of 'X' is the crossing point of the two strokes.
        assert_eq!(img.get_pixel(20, 24).0, [0, 255, 0, 255]);
        let inked = img.pixels().filter(|p| p.0[3] == 255).count();
        assert!(inked > 100);
        assert!(img.pixels().all(|p| p.0[3] == 0 || p.0 == [0, 255, 0, 255]));
    }

    #[test]
    fn bold_inks_more_pixels() {
        let regular = TextStyle {
            bold: false,
            ..TextStyle::default()
        };
        let count = |style: &TextStyle| {
            rasterize_text("Z", Color3::BLUE, style)
                .unwrap()
                .pixels()
                .filter(|p| p.0[3] != 0)
                .count()
        };
        assert!(count(&TextStyle::default()) > count(&regular));
    }

    #[test]
    fn glyphs_stay_inside_cell_box() {
        let style = TextStyle::default();
        let img = rasterize_text("Y", Color3::BLUE, &style).unwrap();
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[3] != 0 {
                assert!(x as f32 >= style.x);
                assert!((y as f32) < style.baseline);
            }
        }
    }

    #[test]
    fn unsupported_and_empty_text_fail() {
        let style = TextStyle::default();
        assert!(matches!(
            rasterize_text("x", Color3::RED, &style),
            Err(GizmoError::UnsupportedGlyph('x'))
        ));
        assert!(matches!(
            rasterize_text("", Color3::RED, &style),
            Err(GizmoError::EmptyText)
        ));
    }
}
