//! # Code Generation
//!
//! Converts a [`PostcardDocument`] into PDF bytes.
//!
//! Object layout: catalog, page tree, document info, the font objects the
//! provider writes, then one page object and one compressed content stream
//! per page. Every page shares the single font resource `/F1`.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use std::io::Write;

use super::ops::{Op, Page, PostcardDocument};
use crate::error::HagakiError;
use crate::font::FontProvider;

/// Font resource name used on every page.
const FONT_RESOURCE: Name<'static> = Name(b"F1");

/// Size assumed for text drawn before any `SetFontSize`.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

const PRODUCER: &str = concat!("hagaki ", env!("CARGO_PKG_VERSION"));

/// Hands out consecutive PDF object ids, starting at 1.
#[derive(Debug)]
pub struct RefAllocator {
    next: i32,
}

impl RefAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for RefAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// zlib-compress a stream body for `/FlateDecode`.
pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, HagakiError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

impl Page {
    /// Emit the content stream operators for this page (uncompressed).
    pub fn to_content(&self, font: &dyn FontProvider) -> Vec<u8> {
        let mut content = Content::new();
        let mut current: Option<f32> = None;

        for op in &self.ops {
            match op {
                Op::SetFontSize(size) => {
                    current = Some(*size);
                }
                Op::CenteredText { x, y, text } => {
                    let size = current.unwrap_or(DEFAULT_FONT_SIZE);
                    let left = x - font.text_width(text, size) / 2.0;
                    content.begin_text();
                    content.set_font(FONT_RESOURCE, size);
                    content.next_line(left, *y);
                    content.show(Str(&font.encode(text)));
                    content.end_text();
                }
            }
        }

        content.finish()
    }
}

impl PostcardDocument {
    /// Serialize the document as a PDF, one page per composed page.
    ///
    /// Fails with [`HagakiError::NoRecords`] when there are no pages: a PDF
    /// with an empty page tree is not a useful output.
    pub fn to_pdf(&self, font: &dyn FontProvider) -> Result<Vec<u8>, HagakiError> {
        if self.is_empty() {
            return Err(HagakiError::NoRecords);
        }

        let mut pdf = Pdf::new();
        let mut refs = RefAllocator::new();

        let catalog_id = refs.alloc();
        let pages_id = refs.alloc();
        let info_id = refs.alloc();
        let font_id = font.write_pdf(&mut pdf, &mut refs, &self.used_chars())?;

        let page_ids: Vec<(Ref, Ref)> = self
            .pages
            .iter()
            .map(|_| (refs.alloc(), refs.alloc()))
            .collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);
        pdf.document_info(info_id).producer(TextStr(PRODUCER));

        let media_box = Rect::new(
            0.0,
            0.0,
            self.page_size.width_pt(),
            self.page_size.height_pt(),
        );

        for (page, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            {
                let mut page_writer = pdf.page(*page_id);
                page_writer
                    .media_box(media_box)
                    .parent(pages_id)
                    .contents(*content_id);
                page_writer.resources().fonts().pair(FONT_RESOURCE, font_id);
            }

            let compressed = deflate(&page.to_content(font))?;
            pdf.stream(*content_id, &compressed)
                .filter(Filter::FlateDecode);
        }

        Ok(pdf.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BuiltinFont;
    use crate::postcard::PageSize;

    fn sample_page() -> Page {
        Page::from_iter([
            Op::SetFontSize(14.0),
            Op::CenteredText {
                x: 100.0,
                y: 300.0,
                text: "1".into(),
            },
        ])
    }

    #[test]
    fn test_ref_allocator_sequential() {
        let mut refs = RefAllocator::new();
        assert_eq!(refs.alloc(), Ref::new(1));
        assert_eq!(refs.alloc(), Ref::new(2));
    }

    #[test]
    fn test_content_centers_text() {
        let content = sample_page().to_content(&BuiltinFont);
        let text = String::from_utf8_lossy(&content);
        // "1" is half an em wide at 14pt: left edge at 100 - 3.5
        assert!(text.contains("/F1 14 Tf"), "{}", text);
        assert!(text.contains("96.5 300 Td"), "{}", text);
        assert!(text.contains("BT") && text.contains("ET"));
    }

    #[test]
    fn test_content_default_size() {
        let page = Page::from_iter([Op::CenteredText {
            x: 0.0,
            y: 0.0,
            text: "様".into(),
        }]);
        let text = String::from_utf8_lossy(&page.to_content(&BuiltinFont)).to_string();
        assert!(text.contains("/F1 12 Tf"), "{}", text);
    }

    #[test]
    fn test_empty_document_rejected() {
        let doc = PostcardDocument::new(PageSize::HAGAKI);
        assert!(matches!(doc.to_pdf(&BuiltinFont), Err(HagakiError::NoRecords)));
    }

    #[test]
    fn test_pdf_page_count() {
        let mut doc = PostcardDocument::new(PageSize::HAGAKI);
        doc.push_page(sample_page());
        doc.push_page(sample_page());
        let bytes = doc.to_pdf(&BuiltinFont).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/FlateDecode"));
    }

    #[test]
    fn test_deflate_roundtrip() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let compressed = deflate(b"BT ET").unwrap();
        let mut out = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, b"BT ET");
    }
}
