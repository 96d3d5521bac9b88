//! Embedded TrueType/OpenType font (e.g. a brush-script `brush.ttf`).
//!
//! The whole font program is embedded as `FontFile2` and addressed through
//! `Identity-H`, so content streams show 2-byte glyph ids straight from
//! ab_glyph's cmap lookup. Only the glyphs a document actually draws get
//! width and ToUnicode entries.

use ab_glyph::{Font, FontArc, GlyphId};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref, Str};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::FontProvider;
use crate::error::HagakiError;
use crate::ir::{RefAllocator, deflate};

const IDENTITY_INFO: SystemInfo<'static> = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

/// A font program loaded from disk and embedded in the output.
pub struct TrueTypeFont {
    name: String,
    data: Vec<u8>,
    font: FontArc,
    units_per_em: f32,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl TrueTypeFont {
    /// Parse font data; `name` becomes the PDF base font name.
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self, HagakiError> {
        let font = FontArc::try_from_vec(data.clone())
            .map_err(|e| HagakiError::Font(format!("{}: {}", name, e)))?;
        let units_per_em = font.units_per_em().unwrap_or(1000.0);

        Ok(Self {
            name: base_font_name(name),
            data,
            font,
            units_per_em,
        })
    }

    /// Read and parse a font file, named after its file stem.
    pub fn from_file(path: &Path) -> Result<Self, HagakiError> {
        let data = std::fs::read(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::from_bytes(stem, data)
    }

    fn glyph(&self, ch: char) -> GlyphId {
        self.font.glyph_id(ch)
    }

    /// Font units to thousandths of an em.
    fn to_pdf_units(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em
    }
}

/// PDF names must stay ASCII; anything else becomes `-`.
fn base_font_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    if cleaned.trim_matches('-').is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

impl FontProvider for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance(&self, ch: char) -> f32 {
        self.to_pdf_units(self.font.h_advance_unscaled(self.glyph(ch)))
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.glyph(ch).0.to_be_bytes())
            .collect()
    }

    fn write_pdf(
        &self,
        pdf: &mut Pdf,
        refs: &mut RefAllocator,
        used: &BTreeSet<char>,
    ) -> Result<Ref, HagakiError> {
        let type0_id = refs.alloc();
        let cid_id = refs.alloc();
        let descriptor_id = refs.alloc();
        let file_id = refs.alloc();
        let cmap_id = refs.alloc();

        let mut glyphs: BTreeMap<u16, (char, f32)> = BTreeMap::new();
        for &ch in used {
            let gid = self.glyph(ch);
            if gid.0 == 0 {
                log::warn!("{}: no glyph for '{}' (U+{:04X})", self.name, ch, ch as u32);
            }
            glyphs.insert(gid.0, (ch, self.advance(ch)));
        }

        let base_font = Name(self.name.as_bytes());

        pdf.type0_font(type0_id)
            .base_font(base_font)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_id)
            .to_unicode(cmap_id);

        {
            let mut cid_font = pdf.cid_font(cid_id);
            cid_font
                .subtype(CidFontType::Type2)
                .base_font(base_font)
                .system_info(IDENTITY_INFO)
                .font_descriptor(descriptor_id)
                .default_width(1000.0)
                .cid_to_gid_map_predefined(Name(b"Identity"));
            let mut widths = cid_font.widths();
            for (gid, (_, width)) in &glyphs {
                widths.consecutive(*gid, [*width]);
            }
        }

        let ascent = self.to_pdf_units(self.font.ascent_unscaled());
        let descent = self.to_pdf_units(self.font.descent_unscaled());
        pdf.font_descriptor(descriptor_id)
            .name(base_font)
            .flags(FontFlags::SYMBOLIC)
            .bbox(Rect::new(0.0, descent, 1000.0, ascent))
            .italic_angle(0.0)
            .ascent(ascent)
            .descent(descent)
            .cap_height(ascent)
            .stem_v(80.0)
            .font_file2(file_id);

        let compressed = deflate(&self.data)?;
        pdf.stream(file_id, &compressed)
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), self.data.len() as i32);

        let mut cmap = UnicodeCmap::new(Name(b"Hagaki-UCS"), IDENTITY_INFO);
        for (gid, (ch, _)) in &glyphs {
            cmap.pair(*gid, *ch);
        }
        pdf.cmap(cmap_id, &cmap.finish());

        Ok(type0_id)
    }

    fn outlines(&self) -> Option<&FontArc> {
        Some(&self.font)
    }
}
