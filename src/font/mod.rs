//! # Font Providers
//!
//! The layout never looks at glyphs: it decides sizes and anchor points.
//! Glyph widths (for centering), content-stream encoding and the PDF font
//! objects come from a [`FontProvider`] chosen at the edge of the program.
//!
//! ## Providers
//!
//! | Provider | Embedded | Preview outlines |
//! |----------|----------|------------------|
//! | [`BuiltinFont`] | No (viewer supplies HeiseiMin-W3) | No (glyph boxes) |
//! | [`TrueTypeFont`] | Yes (Identity-H) | Yes |
//!
//! [`load_or_builtin`] turns an optional font file into a provider and
//! never fails: a missing or unreadable file falls back to the builtin font.

mod builtin;
mod truetype;

pub use builtin::BuiltinFont;
pub use truetype::TrueTypeFont;

use ab_glyph::FontArc;
use pdf_writer::{Pdf, Ref};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::HagakiError;
use crate::ir::RefAllocator;

/// Source of glyph metrics and PDF font objects.
pub trait FontProvider: Send + Sync {
    /// Font name for logs and the PDF `BaseFont` entry.
    fn name(&self) -> &str;

    /// Horizontal advance of `ch` in thousandths of an em.
    fn advance(&self, ch: char) -> f32;

    /// Encode text into the byte string a content stream shows with this font.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Write the font dictionary and its dependencies; returns the ref to
    /// put in page resources. `used` lists every character the document draws.
    fn write_pdf(
        &self,
        pdf: &mut Pdf,
        refs: &mut RefAllocator,
        used: &BTreeSet<char>,
    ) -> Result<Ref, HagakiError>;

    /// Outline font for raster previews, when the provider has one.
    fn outlines(&self) -> Option<&FontArc> {
        None
    }

    /// Width of `text` in points at `size`.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum::<f32>() * size / 1000.0
    }
}

/// Load a TrueType/OpenType font from `path`, falling back to the builtin
/// font when the file is absent or cannot be parsed.
pub fn load_or_builtin(path: impl AsRef<Path>) -> Box<dyn FontProvider> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!(
            "Font file {} not found, using builtin {}",
            path.display(),
            BuiltinFont::NAME
        );
        return Box::new(BuiltinFont);
    }

    match TrueTypeFont::from_file(path) {
        Ok(font) => {
            log::info!("Loaded font {} from {}", font.name(), path.display());
            Box::new(font)
        }
        Err(e) => {
            log::warn!(
                "Could not use font {} ({}), using builtin {}",
                path.display(),
                e,
                BuiltinFont::NAME
            );
            Box::new(BuiltinFont)
        }
    }
}
