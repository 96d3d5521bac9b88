//! # Address Text Processing
//!
//! Pure string algorithms behind the postcard layout. Nothing here knows
//! about fonts, pages or PDF; every function maps strings to strings (or
//! positions) and is deterministic.
//!
//! ## Modules
//!
//! - [`normalize`]: Vertical-writing glyph substitution
//! - [`postal`]: Postal code extraction
//! - [`wrap`]: Address line wrapping
//! - [`names`]: Co-addressee parsing and name column layout

pub mod names;
pub mod normalize;
pub mod postal;
pub mod wrap;

pub use names::{
    NameColumn, NameColumns, is_blank_field, layout_name_columns, resolve_co_addressees,
};
pub use normalize::{normalize, vertical_form};
pub use postal::{POSTAL_CODE_DIGITS, PostalSplit, extract_postal_code};
pub use wrap::wrap_address;
