//! Glyph rasterization onto the transparent text layer.
//!
//! With an outline font (an embedded TrueType file) glyphs are drawn
//! anti-aliased through ab_glyph. The builtin PDF font has no outlines on
//! this side, so each glyph becomes a box outline of its advance width:
//! enough to check positions and sizes against the card background.

use ab_glyph::{Font, FontArc, PxScale, point};
use image::{Rgba, RgbaImage};

use crate::font::FontProvider;

/// Ink color of previewed text.
const INK: [u8; 3] = [0, 0, 0];

/// Box glyph height as a fraction of the em.
const BOX_HEIGHT_EM: f32 = 0.85;

/// Where one text op lands, in layer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    /// Left edge of the first glyph.
    pub left: f32,
    pub baseline: f32,
    /// Em size in pixels.
    pub em: f32,
}

/// Draw `text` starting at `placement`, advancing by the provider's metrics.
pub(crate) fn draw_text(
    layer: &mut RgbaImage,
    font: &dyn FontProvider,
    text: &str,
    placement: Placement,
) {
    let mut caret = placement.left;
    for ch in text.chars() {
        let advance = font.advance(ch) * placement.em / 1000.0;
        match font.outlines() {
            Some(outlines) => draw_outline(layer, outlines, ch, caret, placement),
            None if !ch.is_whitespace() => draw_box(layer, caret, advance, placement),
            None => {}
        }
        caret += advance;
    }
}

fn draw_outline(layer: &mut RgbaImage, font: &FontArc, ch: char, x: f32, placement: Placement) {
    let scale = font
        .pt_to_px_scale(placement.em)
        .unwrap_or(PxScale::from(placement.em));
    let glyph = font
        .glyph_id(ch)
        .with_scale_and_position(scale, point(x, placement.baseline));

    if let Some(outlined) = font.outline_glyph(glyph) {
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, coverage| {
            let x = px as i64 + bounds.min.x as i64;
            let y = py as i64 + bounds.min.y as i64;
            blend(layer, x, y, coverage);
        });
    }
}

/// Outline of the glyph cell, one pixel wide.
fn draw_box(layer: &mut RgbaImage, x: f32, advance: f32, placement: Placement) {
    let inset = advance * 0.1;
    let left = (x + inset).round() as i64;
    let right = (x + advance - inset).round() as i64;
    let bottom = placement.baseline.round() as i64;
    let top = (placement.baseline - placement.em * BOX_HEIGHT_EM).round() as i64;

    for px in left..=right {
        blend(layer, px, top, 1.0);
        blend(layer, px, bottom, 1.0);
    }
    for py in top..=bottom {
        blend(layer, left, py, 1.0);
        blend(layer, right, py, 1.0);
    }
}

/// Accumulate coverage into the alpha channel. Out-of-bounds pixels are ignored.
fn blend(layer: &mut RgbaImage, x: i64, y: i64, coverage: f32) {
    if x < 0 || y < 0 || x >= layer.width() as i64 || y >= layer.height() as i64 {
        return;
    }
    let pixel = layer.get_pixel_mut(x as u32, y as u32);
    let alpha = (pixel.0[3] as f32 + coverage.clamp(0.0, 1.0) * 255.0).min(255.0) as u8;
    *pixel = Rgba([INK[0], INK[1], INK[2], alpha]);
}
