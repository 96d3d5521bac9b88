//! # Postcard Module
//!
//! Page geometry and unit conversion for the postcard layout.
//!
//! ## Modules
//!
//! - [`config`]: Layout constants gathered into an immutable [`LayoutConfig`]

pub mod config;

pub use config::{
    AddressLayout, AddressSlot, LayoutConfig, NameLayout, Offset, PageSize, PostalLayout,
    WrapConfig, WrapStrategy, mm_to_pt, pt_to_mm,
};
