//! # Page to PNG Preview Renderer
//!
//! Renders one composed page as an on-screen proof of the printed card.
//!
//! ## Architecture
//!
//! ```text
//! Page (IR) → text layer (RGBA, transparent)
//!                 │  shifted by the screen offset
//!                 ▼
//! white base ← background (resized to the page, optional) ← text layer
//!                 │
//!                 ▼
//!              RgbImage → PNG bytes
//! ```
//!
//! The screen offset only exists here: it lines the preview up with a
//! scanned card image and never affects the PDF.
//!
//! ## Example
//!
//! ```
//! use hagaki::font::BuiltinFont;
//! use hagaki::preview::{PreviewOptions, render_preview};
//! use hagaki::records::Recipient;
//! use hagaki::render::PageComposer;
//!
//! let page = PageComposer::default().compose(&Recipient::new("山田太郎", "東京都"));
//! let image = render_preview(&page, &BuiltinFont, &PreviewOptions::default()).unwrap();
//! assert_eq!(image.width(), 1181);
//! ```

mod glyph;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::HagakiError;
use crate::font::FontProvider;
use crate::ir::{DEFAULT_FONT_SIZE, Page};
use crate::postcard::PageSize;

use glyph::{Placement, draw_text};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Errors that can occur during preview rendering.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    #[error("Invalid preview options: {0}")]
    InvalidOptions(String),
}

impl From<PreviewError> for HagakiError {
    fn from(e: PreviewError) -> Self {
        HagakiError::Image(e.to_string())
    }
}

/// Raster settings for previews.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    pub page: PageSize,
    pub dpi: f32,
    /// Screen-only shift, positive x moves right.
    pub offset_x_mm: f32,
    /// Screen-only shift, positive y moves up.
    pub offset_y_mm: f32,
    /// Card image drawn under the text, stretched to the page.
    pub background: Option<PathBuf>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            page: PageSize::HAGAKI,
            dpi: 300.0,
            offset_x_mm: 0.0,
            offset_y_mm: -4.0,
            background: None,
        }
    }
}

impl PreviewOptions {
    fn px_per_mm(&self) -> f32 {
        self.dpi / MM_PER_INCH
    }

    fn px_per_pt(&self) -> f32 {
        self.dpi / PT_PER_INCH
    }

    /// Raster size of the page in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        let scale = self.px_per_mm();
        (
            (self.page.width_mm * scale).round() as u32,
            (self.page.height_mm * scale).round() as u32,
        )
    }
}

/// Rasterize `page` and composite it over the background.
pub fn render_preview(
    page: &Page,
    font: &dyn FontProvider,
    options: &PreviewOptions,
) -> Result<RgbImage, PreviewError> {
    if !(options.dpi.is_finite() && options.dpi > 0.0) {
        return Err(PreviewError::InvalidOptions(format!(
            "dpi must be positive, got {}",
            options.dpi
        )));
    }

    let (width, height) = options.dimensions();
    let text_layer = render_text_layer(page, font, options, width, height);

    let mut base = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    if let Some(background) = options.background.as_deref().and_then(|path| {
        load_background(path, width, height)
    }) {
        imageops::overlay(&mut base, &background, 0, 0);
    }

    let dx = (options.offset_x_mm * options.px_per_mm()).round() as i64;
    let dy = (-options.offset_y_mm * options.px_per_mm()).round() as i64;
    imageops::overlay(&mut base, &text_layer, dx, dy);

    Ok(DynamicImage::ImageRgba8(base).to_rgb8())
}

/// Draw every text op of `page` onto a transparent layer of page size.
fn render_text_layer(
    page: &Page,
    font: &dyn FontProvider,
    options: &PreviewOptions,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let scale = options.px_per_pt();
    let page_height_pt = options.page.height_pt();

    for (x, y, size, text) in page.text_runs(DEFAULT_FONT_SIZE) {
        let left_pt = x - font.text_width(text, size) / 2.0;
        let placement = Placement {
            left: left_pt * scale,
            // PDF y grows upward, raster y downward
            baseline: (page_height_pt - y) * scale,
            em: size * scale,
        };
        draw_text(&mut layer, font, text, placement);
    }

    layer
}

/// Load and stretch the background; failures are logged and skipped.
fn load_background(path: &Path, width: u32, height: u32) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => Some(
            img.resize_exact(width, height, FilterType::Lanczos3)
                .to_rgba8(),
        ),
        Err(e) => {
            log::warn!("Skipping background {}: {}", path.display(), e);
            None
        }
    }
}

/// Encode a preview as PNG bytes.
pub fn to_png(image: &RgbImage) -> Result<Vec<u8>, PreviewError> {
    use image::ImageEncoder;

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| PreviewError::ImageEncode(e.to_string()))?;

    Ok(png_bytes)
}
