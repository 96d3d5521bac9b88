//! # Page Composer
//!
//! Turns one [`Recipient`] into one [`Page`] of draw ops:
//!
//! ```text
//!  ┌──────────────────────────────┐
//!  │          〒 1 0 0 - 0 0 0 1   │  postal digits, horizontal, 14pt
//!  │                              │
//!  │   花  一  山        東        │
//!  │   子  郎  田      千 京       │  address columns right to left
//!  │   様  様  太      代 都       │  (90mm, 82mm, 74mm)
//!  │           郎      田 千       │
//!  │           様      一 代       │  names centered on 50mm
//!  │                   丨 田       │
//!  │                   一 区       │
//!  └──────────────────────────────┘
//! ```
//!
//! All geometry comes from [`LayoutConfig`]; the composer itself holds no
//! constants. Millimetres are converted to points (with the print offset)
//! at the point each op is emitted.

use rayon::prelude::*;

use super::vertical::{GlyphRun, VerticalTextRenderer};
use crate::error::HagakiError;
use crate::font::FontProvider;
use crate::ir::{Op, Page, PostcardDocument};
use crate::postcard::{LayoutConfig, mm_to_pt};
use crate::records::Recipient;
use crate::text::{PostalSplit, extract_postal_code, layout_name_columns, wrap_address};

/// Lays out postcard pages from recipient records.
#[derive(Debug, Clone)]
pub struct PageComposer {
    config: LayoutConfig,
    vertical: VerticalTextRenderer,
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl PageComposer {
    pub fn new(config: LayoutConfig) -> Self {
        let vertical = VerticalTextRenderer::new(config.min_font_size);
        Self { config, vertical }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compose a single postcard page.
    pub fn compose(&self, recipient: &Recipient) -> Page {
        let mut page = Page::new();
        let split = extract_postal_code(&recipient.address);

        self.compose_postal_code(&mut page, &split);
        self.compose_address(&mut page, &split.remainder);
        self.compose_names(&mut page, recipient);

        page.optimize()
    }

    /// Compose every recipient in parallel, keeping input order.
    pub fn compose_all(&self, recipients: &[Recipient]) -> PostcardDocument {
        let pages: Vec<Page> = recipients
            .par_iter()
            .map(|recipient| self.compose(recipient))
            .collect();

        let mut document = PostcardDocument::new(self.config.page);
        for (recipient, page) in recipients.iter().zip(pages) {
            log::debug!("Composed {} ({} ops)", recipient.name, page.len());
            document.push_page(page);
        }
        document
    }

    /// Compose all recipients and serialize them as one PDF.
    pub fn render_document(
        &self,
        recipients: &[Recipient],
        font: &dyn FontProvider,
    ) -> Result<Vec<u8>, HagakiError> {
        if recipients.is_empty() {
            return Err(HagakiError::NoRecords);
        }

        let document = self.compose_all(recipients);
        let bytes = document.to_pdf(font)?;
        log::info!(
            "Rendered {} pages with {} ({} bytes)",
            document.len(),
            font.name(),
            bytes.len()
        );
        Ok(bytes)
    }

    // ========================================================================
    // BLOCKS
    // ========================================================================

    /// Seven digits in the printed postal boxes. Skipped without a code.
    fn compose_postal_code(&self, page: &mut Page, split: &PostalSplit) {
        if !split.has_code() {
            return;
        }

        let postal = &self.config.postal;
        let y = self.config.y_pt(postal.baseline_y_mm);
        page.push(Op::SetFontSize(postal.font_size));
        for (i, digit) in split.digits.chars().enumerate() {
            page.push(Op::CenteredText {
                x: self.config.x_pt(postal.digit_x_mm(i)),
                y,
                text: digit.to_string(),
            });
        }
    }

    /// Wrapped address lines, one per slot. Lines without a slot are dropped.
    fn compose_address(&self, page: &mut Page, street: &str) {
        let address = &self.config.address;
        let lines = wrap_address(street, &address.wrap);

        for (line, slot) in lines.iter().zip(&address.slots) {
            self.vertical.render(
                page,
                &GlyphRun {
                    text: line,
                    anchor_x: self.config.x_pt(slot.x_mm),
                    top_y: self.config.y_pt(address.top_y_mm),
                    max_height: mm_to_pt(address.max_height_mm),
                    max_font_size: slot.font_size,
                    line_spacing: address.line_spacing,
                },
            );
        }
    }

    /// Household name and co-addressees, each with the honorific.
    fn compose_names(&self, page: &mut Page, recipient: &Recipient) {
        let names = &self.config.names;
        let columns = layout_name_columns(
            recipient.name.trim(),
            &recipient.co_addressee_names(),
            names.base_x_mm,
            names.column_pitch_mm,
        );

        for column in columns.columns() {
            let text = format!("{}{}", column.text, names.honorific);
            self.vertical.render(
                page,
                &GlyphRun {
                    text: &text,
                    anchor_x: self.config.x_pt(column.x),
                    top_y: self.config.y_pt(names.top_y_mm),
                    max_height: mm_to_pt(names.max_height_mm),
                    max_font_size: names.font_size,
                    line_spacing: names.line_spacing,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BuiltinFont;
    use crate::postcard::Offset;
    use pretty_assertions::assert_eq;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn no_offset() -> PageComposer {
        PageComposer::new(LayoutConfig {
            print_offset: Offset::default(),
            ..LayoutConfig::default()
        })
    }

    #[test]
    fn test_postal_digits_positions() {
        let page = no_offset().compose(&Recipient::new("山田", "100-0001 東京都"));
        let digits: Vec<_> = page.text_runs(0.0).take(7).collect();

        let text: String = digits.iter().map(|run| run.3).collect();
        assert_eq!(text, "1000001");
        assert!(digits.iter().all(|run| run.2 == 14.0));
        assert!(approx(digits[0].0, mm_to_pt(46.0)));
        assert!(approx(digits[2].0, mm_to_pt(46.0 + 2.0 * 7.3)));
        assert!(approx(digits[3].0, mm_to_pt(46.0 + 3.0 * 7.3 + 0.6)));
        assert!(approx(digits[6].0, mm_to_pt(46.0 + 6.0 * 7.3 + 0.6)));
        assert!(approx(digits[0].1, mm_to_pt(148.0 - 15.8)));
    }

    #[test]
    fn test_postal_digits_stay_ascii() {
        // Postal digits are horizontal and never normalized to kanji
        let page = no_offset().compose(&Recipient::new("山田", "1000001 東京都"));
        assert!(page.text().starts_with("1000001"));
    }

    #[test]
    fn test_missing_postal_code_skips_block() {
        let page = no_offset().compose(&Recipient::new("山田", "東京都千代田区"));
        assert!(!page.text().chars().any(|c| c.is_ascii_digit()));
        assert!(page.text().starts_with("東京都千代田区"));
    }

    #[test]
    fn test_fullwidth_postal_code_stripped_without_block() {
        let page = no_offset().compose(&Recipient::new("山田", "１０００００１ 東京都千代田区"));
        assert_eq!(page.text(), "東京都千代田区山田 様");
    }

    #[test]
    fn test_config_is_the_one_given() {
        let mut config = LayoutConfig::default();
        config.names.column_pitch_mm = 12.0;
        let composer = PageComposer::new(config.clone());
        assert_eq!(composer.config(), &config);
    }

    #[test]
    fn test_address_in_first_slot() {
        let page = no_offset().compose(&Recipient::new("山田", "100-0001 東京都千代田区千代田1-1"));
        let address: Vec<_> = page.text_runs(0.0).skip(7).take(13).collect();
        let text: String = address.iter().map(|run| run.3).collect();
        assert_eq!(text, "東京都千代田区千代田一丨一");
        assert!(address.iter().all(|run| approx(run.0, mm_to_pt(90.0))));
        assert!(address.iter().all(|run| run.2 == 16.0));
    }

    #[test]
    fn test_print_offset_applied() {
        let recipient = Recipient::new("山田", "100-0001 東京都");
        let plain = no_offset().compose(&recipient);
        let shifted = PageComposer::default().compose(&recipient);

        let a = plain.text_runs(0.0).next().unwrap();
        let b = shifted.text_runs(0.0).next().unwrap();
        assert!(approx(b.0 - a.0, mm_to_pt(0.7)));
        assert!(approx(b.1 - a.1, mm_to_pt(1.3)));
    }

    #[test]
    fn test_household_only_at_base_x() {
        let page = no_offset().compose(&Recipient::new("山田太郎", "東京都"));
        let name_runs: Vec<_> = page
            .text_runs(0.0)
            .filter(|run| run.3 == "様")
            .collect();
        assert_eq!(name_runs.len(), 1);
        assert!(approx(name_runs[0].0, mm_to_pt(50.0)));
    }

    #[test]
    fn test_co_addressees_step_left() {
        let recipient = Recipient::new("山田太郎", "東京都").with_co_addressees("花子、一郎");
        let page = no_offset().compose(&recipient);
        let honorifics: Vec<f32> = page
            .text_runs(0.0)
            .filter(|run| run.3 == "様")
            .map(|run| run.0)
            .collect();

        assert_eq!(honorifics.len(), 3);
        assert!(approx(honorifics[0], mm_to_pt(50.0 + 14.0)));
        assert!(approx(honorifics[1], mm_to_pt(50.0)));
        assert!(approx(honorifics[2], mm_to_pt(50.0 - 14.0)));
    }

    #[test]
    fn test_name_size_capped() {
        let page = no_offset().compose(&Recipient::new("山田", "東京都"));
        let sizes: Vec<f32> = page
            .text_runs(0.0)
            .filter(|run| run.3 == "山")
            .map(|run| run.2)
            .collect();
        assert_eq!(sizes, vec![34.0]);
    }

    #[test]
    fn test_render_document_empty_batch() {
        let err = PageComposer::default()
            .render_document(&[], &BuiltinFont)
            .unwrap_err();
        assert!(matches!(err, HagakiError::NoRecords));
    }

    #[test]
    fn test_compose_all_preserves_order() {
        let recipients: Vec<Recipient> = (0..20)
            .map(|i| Recipient::new(format!("名{}", i), "東京都"))
            .collect();
        let document = PageComposer::default().compose_all(&recipients);
        assert_eq!(document.len(), 20);
        for (i, page) in document.pages.iter().enumerate() {
            let expected = crate::text::normalize(&format!("名{}", i));
            assert!(page.text().contains(&expected));
        }
    }
}
