//! # Page Draw Ops
//!
//! This module defines the intermediate representation (IR) of a postcard
//! page: a flat sequence of drawing ops in PDF user space (points, origin at
//! the bottom-left corner).
//!
//! ## Design Philosophy
//!
//! The IR sits between the layout algorithms and the output formats:
//!
//! ```text
//! Composer → Page (inspectable) → Optimizer → Codegen (PDF) / Preview (PNG)
//! ```
//!
//! Ops carry positions and sizes only. Glyph widths are resolved at output
//! time by the font provider, so the same page can be written with any font.

use std::collections::BTreeSet;

use crate::postcard::PageSize;

/// Page draw opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Set the font size (points) used by following text ops.
    SetFontSize(f32),

    /// Draw `text` horizontally centered on `x`, baseline at `y`.
    CenteredText { x: f32, y: f32, text: String },
}

/// One composed postcard page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<Op>,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the page.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops on the page.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Iterate over the text ops with the font size in effect for each:
    /// `(x, y, size, text)`. Text drawn before any size op gets `default_size`.
    pub fn text_runs(&self, default_size: f32) -> impl Iterator<Item = (f32, f32, f32, &str)> {
        let mut size = default_size;
        self.ops.iter().filter_map(move |op| match op {
            Op::SetFontSize(s) => {
                size = *s;
                None
            }
            Op::CenteredText { x, y, text } => Some((*x, *y, size, text.as_str())),
        })
    }

    /// All drawn text concatenated in op order.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::CenteredText { text, .. } => Some(text.as_str()),
                Op::SetFontSize(_) => None,
            })
            .collect()
    }
}

impl FromIterator<Op> for Page {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Page {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Page {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// The accumulating output document: pages in input order, one size.
#[derive(Debug, Clone, PartialEq)]
pub struct PostcardDocument {
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl PostcardDocument {
    /// Create an empty document.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
        }
    }

    /// Append a finished page.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every character drawn anywhere in the document.
    pub fn used_chars(&self) -> BTreeSet<char> {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .filter_map(|op| match op {
                Op::CenteredText { text, .. } => Some(text.chars()),
                Op::SetFontSize(_) => None,
            })
            .flatten()
            .collect()
    }
}
