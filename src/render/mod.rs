//! # Rendering Module
//!
//! Layout of postcard pages into IR draw ops.
//!
//! ## Modules
//!
//! - [`vertical`]: Single vertical glyph column with shrink-to-fit sizing
//! - [`composer`]: Full page (postal code, address, names) per recipient
//!
//! ## Usage Example
//!
//! ```
//! use hagaki::font::BuiltinFont;
//! use hagaki::records::Recipient;
//! use hagaki::render::PageComposer;
//!
//! let composer = PageComposer::default();
//! let recipient = Recipient::new("山田太郎", "100-0001 東京都千代田区千代田1-1")
//!     .with_co_addressees("花子");
//!
//! // Inspect the ops for one card
//! let page = composer.compose(&recipient);
//! assert!(page.text().starts_with("1000001"));
//!
//! // Or render a whole batch to PDF bytes
//! let pdf = composer.render_document(&[recipient], &BuiltinFont).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

pub mod composer;
pub mod vertical;

pub use composer::PageComposer;
pub use vertical::{GlyphRun, VerticalTextRenderer, effective_font_size};
