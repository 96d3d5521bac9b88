//! Non-embedded Japanese CID font.
//!
//! `HeiseiMin-W3` is one of the standard Adobe-Japan1 font names every
//! Japanese-capable PDF viewer can substitute, so no font data has to ship
//! with the document. Text is encoded as UCS-2 through the predefined
//! `UniJIS-UCS2-HW-H` CMap, which maps ASCII to half-width glyphs.

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Name, Pdf, Rect, Ref, Str};
use std::collections::BTreeSet;

use super::FontProvider;
use crate::error::HagakiError;
use crate::ir::RefAllocator;

const BASE_FONT: &[u8] = b"HeiseiMin-W3";
const ENCODING: &[u8] = b"UniJIS-UCS2-HW-H";

/// Adobe-Japan1 CIDs of the half-width glyph block (500 units wide).
const HALF_WIDTH_CIDS: (u16, u16) = (231, 632);

/// Drawn in place of characters outside the Basic Multilingual Plane.
const REPLACEMENT: char = '〓';

/// The always-available fallback font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    pub const NAME: &'static str = "HeiseiMin-W3";
}

/// Half-width under UniJIS-UCS2-HW-H: printable ASCII and half-width katakana.
fn is_half_width(ch: char) -> bool {
    matches!(ch, '\u{20}'..='\u{7E}' | '\u{FF61}'..='\u{FF9F}')
}

impl FontProvider for BuiltinFont {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn advance(&self, ch: char) -> f32 {
        if is_half_width(ch) { 500.0 } else { 1000.0 }
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() * 2);
        let mut units = [0u16; 2];
        for ch in text.chars() {
            let encoded = ch.encode_utf16(&mut units);
            let unit = if encoded.len() == 1 {
                encoded[0]
            } else {
                log::warn!(
                    "{}: character '{}' (U+{:04X}) is outside UCS-2, drawing '{}'",
                    Self::NAME,
                    ch,
                    ch as u32,
                    REPLACEMENT
                );
                REPLACEMENT as u16
            };
            out.extend(unit.to_be_bytes());
        }
        out
    }

    fn write_pdf(
        &self,
        pdf: &mut Pdf,
        refs: &mut RefAllocator,
        _used: &BTreeSet<char>,
    ) -> Result<Ref, HagakiError> {
        let type0_id = refs.alloc();
        let cid_id = refs.alloc();
        let descriptor_id = refs.alloc();

        pdf.type0_font(type0_id)
            .base_font(Name(BASE_FONT))
            .encoding_predefined(Name(ENCODING))
            .descendant_font(cid_id);

        {
            let mut cid_font = pdf.cid_font(cid_id);
            cid_font
                .subtype(CidFontType::Type0)
                .base_font(Name(BASE_FONT))
                .system_info(SystemInfo {
                    registry: Str(b"Adobe"),
                    ordering: Str(b"Japan1"),
                    supplement: 2,
                })
                .font_descriptor(descriptor_id)
                .default_width(1000.0);
            cid_font
                .widths()
                .same(HALF_WIDTH_CIDS.0, HALF_WIDTH_CIDS.1, 500.0);
        }

        // Metrics as published for HeiseiMin-W3
        pdf.font_descriptor(descriptor_id)
            .name(Name(BASE_FONT))
            .flags(FontFlags::SERIF | FontFlags::SYMBOLIC)
            .bbox(Rect::new(-123.0, -257.0, 1001.0, 910.0))
            .italic_angle(0.0)
            .ascent(723.0)
            .descent(-241.0)
            .cap_height(709.0)
            .stem_v(69.0);

        Ok(type0_id)
    }
}
