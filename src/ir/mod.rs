//! # Intermediate Representation (IR)
//!
//! A composed postcard is a list of draw ops, not PDF bytes. The IR sits
//! between the layout engine and the output formats.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌──────────────┐
//! │  Composer   │ ──► │     IR      │ ──► │ Optimizer │ ──► │ Codegen (PDF)│
//! │  (layout)   │     │  (Vec<Op>)  │     │           │     │ Preview (PNG)│
//! └─────────────┘     └─────────────┘     └───────────┘     └──────────────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **Inspectable**: `hagaki inspect` dumps what will be drawn
//! 2. **Optimizable**: Remove redundant size changes
//! 3. **Testable**: Layout is checked without parsing PDF
//!
//! ## Example
//!
//! ```
//! use hagaki::font::BuiltinFont;
//! use hagaki::ir::{Op, Page, PostcardDocument};
//! use hagaki::postcard::PageSize;
//!
//! let mut page = Page::new();
//! page.push(Op::SetFontSize(14.0));
//! page.push(Op::CenteredText { x: 140.0, y: 380.0, text: "1".into() });
//!
//! let mut doc = PostcardDocument::new(PageSize::HAGAKI);
//! doc.push_page(page.optimize());
//! let bytes = doc.to_pdf(&BuiltinFont).unwrap();
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```

mod codegen;
mod ops;
mod optimize;

// Codegen and optimize add methods to Page/PostcardDocument via impl
pub use codegen::{DEFAULT_FONT_SIZE, RefAllocator};
pub(crate) use codegen::deflate;
pub use ops::*;
