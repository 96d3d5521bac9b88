//! # Hagaki - Vertical Postcard Address Layout
//!
//! Hagaki lays out Japanese postcard (100 × 148 mm) addresses in vertical
//! writing and writes them as a print-ready PDF. It provides:
//!
//! - **Text processing**: Postal code extraction, address wrapping,
//!   co-addressee parsing, kanji-numeral normalization
//! - **Layout**: Shrink-to-fit vertical columns, full-page composition
//! - **Output**: Multi-page PDF (builtin or embedded TrueType font),
//!   PNG screen previews over a scanned card background
//!
//! ## Quick Start
//!
//! ```no_run
//! use hagaki::{font, records, render::PageComposer, postcard::LayoutConfig};
//!
//! let recipients = records::load_records_file("recipients.json")?;
//! let font = font::load_or_builtin("brush.ttf");
//!
//! let composer = PageComposer::new(LayoutConfig::default());
//! let pdf = composer.render_document(&records::selected(&recipients), font.as_ref())?;
//! std::fs::write("hagaki.pdf", pdf)?;
//!
//! # Ok::<(), hagaki::error::HagakiError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`text`] | Pure string algorithms (postal code, wrapping, names) |
//! | [`render`] | Vertical text renderer and page composer |
//! | [`ir`] | Page draw ops, optimizer, PDF codegen |
//! | [`font`] | Font providers (builtin CID font, TrueType) |
//! | [`preview`] | PNG previews |
//! | [`postcard`] | Layout configuration and units |
//! | [`records`] | Recipient records and JSON ingestion |
//! | [`error`] | Error types |

pub mod error;
pub mod font;
pub mod ir;
pub mod postcard;
pub mod preview;
pub mod records;
pub mod render;
pub mod text;

// Re-exports for convenience
pub use error::HagakiError;
pub use postcard::LayoutConfig;
pub use records::Recipient;
pub use render::PageComposer;
