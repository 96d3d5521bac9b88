//! # Vertical Text Renderer
//!
//! Lays a string out top-to-bottom as a single column of glyphs.
//!
//! ```text
//!        anchor_x
//!           │
//!   top_y ──┼──────   slot 0
//!           一         ← baseline = slot top − size
//!         ──┼──────   slot 1 = top_y − size × spacing
//!           丁
//!         ──┼──────   slot 2
//!           目
//! ```
//!
//! The font size shrinks so that `n` slots fit in `max_height`, but never
//! grows past the run's maximum and never drops below the configured floor.
//! At the floor the column simply runs past the box.

use crate::ir::{Op, Page};
use crate::text::normalize;

/// Line spacing used when a caller has no layout-specific value.
pub const DEFAULT_LINE_SPACING: f32 = 1.1;

/// Smallest font size the renderer will shrink to.
pub const DEFAULT_MIN_FONT_SIZE: f32 = 8.0;

/// One column to draw. All lengths in points.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun<'a> {
    pub text: &'a str,
    /// Horizontal center of every glyph.
    pub anchor_x: f32,
    /// Top of the first glyph slot.
    pub top_y: f32,
    pub max_height: f32,
    pub max_font_size: f32,
    /// Slot height as a multiple of the font size.
    pub line_spacing: f32,
}

/// Font size for `n` glyphs in a box of `max_height`.
///
/// `max(min(max_font_size, max_height / (n × line_spacing)), min_font_size)`
pub fn effective_font_size(
    n: usize,
    max_height: f32,
    max_font_size: f32,
    line_spacing: f32,
    min_font_size: f32,
) -> f32 {
    if n == 0 {
        return max_font_size.max(min_font_size);
    }
    let fit = max_height / (n as f32 * line_spacing);
    max_font_size.min(fit).max(min_font_size)
}

/// Emits draw ops for vertical glyph runs.
#[derive(Debug, Clone, Copy)]
pub struct VerticalTextRenderer {
    pub min_font_size: f32,
}

impl Default for VerticalTextRenderer {
    fn default() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
        }
    }
}

impl VerticalTextRenderer {
    pub fn new(min_font_size: f32) -> Self {
        Self { min_font_size }
    }

    /// Append the ops for `run` to `page`.
    ///
    /// Returns the font size used, or `None` if the text was empty and
    /// nothing was drawn.
    pub fn render(&self, page: &mut Page, run: &GlyphRun<'_>) -> Option<f32> {
        let text = normalize(run.text);
        let n = text.chars().count();
        if n == 0 {
            return None;
        }

        let size = effective_font_size(
            n,
            run.max_height,
            run.max_font_size,
            run.line_spacing,
            self.min_font_size,
        );
        let step = size * run.line_spacing;

        page.push(Op::SetFontSize(size));
        for (k, ch) in text.chars().enumerate() {
            let slot_top = run.top_y - k as f32 * step;
            page.push(Op::CenteredText {
                x: run.anchor_x,
                y: slot_top - size,
                text: ch.to_string(),
            });
        }

        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str, max_height: f32, max_font_size: f32) -> GlyphRun<'_> {
        GlyphRun {
            text,
            anchor_x: 100.0,
            top_y: 400.0,
            max_height,
            max_font_size,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut page = Page::new();
        let size = VerticalTextRenderer::default().render(&mut page, &run("", 100.0, 16.0));
        assert_eq!(size, None);
        assert!(page.is_empty());
    }

    #[test]
    fn test_short_text_uses_max_size() {
        let mut page = Page::new();
        let size = VerticalTextRenderer::default().render(&mut page, &run("山田", 300.0, 16.0));
        assert_eq!(size, Some(16.0));
        // One size op plus one op per glyph
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_long_text_shrinks_to_fit() {
        let mut page = Page::new();
        // 10 glyphs × 1.1 spacing in 110pt → 10pt
        let size = VerticalTextRenderer::default()
            .render(&mut page, &run("一二三四五六七八九十", 110.0, 16.0))
            .unwrap();
        assert!((size - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_size_floor() {
        let mut page = Page::new();
        let text = "あ".repeat(60);
        let size = VerticalTextRenderer::default()
            .render(&mut page, &run(&text, 50.0, 16.0))
            .unwrap();
        assert_eq!(size, 8.0);
        // Overflowing glyphs are still drawn
        assert_eq!(page.text().chars().count(), 60);
    }

    #[test]
    fn test_size_within_bounds() {
        for n in 1..80 {
            for max_font in [8.0, 14.0, 16.0, 34.0] {
                let size = effective_font_size(n, 270.0, max_font, 1.15, 8.0);
                assert!((8.0..=max_font).contains(&size), "n={} max={}", n, max_font);
            }
        }
    }

    #[test]
    fn test_glyph_positions() {
        let mut page = Page::new();
        VerticalTextRenderer::default().render(&mut page, &run("ab", 300.0, 10.0));
        let runs: Vec<_> = page.text_runs(0.0).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], (100.0, 390.0, 10.0, "a"));
        // Second slot starts 10 × 1.1 below the first
        assert!((runs[1].1 - (400.0 - 11.0 - 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_digits_normalized() {
        let mut page = Page::new();
        VerticalTextRenderer::default().render(&mut page, &run("1-2", 300.0, 10.0));
        assert_eq!(page.text(), "一丨二");
    }

    #[test]
    fn test_custom_min_font_size() {
        let mut page = Page::new();
        let text = "あ".repeat(60);
        let size = VerticalTextRenderer::new(5.0)
            .render(&mut page, &run(&text, 50.0, 16.0))
            .unwrap();
        assert_eq!(size, 5.0);
    }
}
