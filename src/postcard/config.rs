//! # Postcard Layout Configuration
//!
//! Geometry for a single fixed postcard size. Every coordinate is in
//! millimeters measured from the bottom-left corner of the card (the PDF
//! convention); font sizes are in points.
//!
//! ## Default Geometry (100 × 148 mm hagaki)
//!
//! ```text
//!  ┌──────────────────────────────┐ 148mm
//!  │        □□□-□□□□              │ ← postal digits, baseline 132.2mm
//!  │                              │
//!  │             名    住 住       │ ← address lines at x = 90, 82, 74mm
//!  │             前    所 所       │   names centered on x = 50mm
//!  │             様    …  …       │
//!  └──────────────────────────────┘ 0
//!  0                            100mm
//! ```
//!
//! ## Usage
//!
//! ```
//! use hagaki::postcard::{LayoutConfig, mm_to_pt};
//!
//! let config = LayoutConfig::default();
//! assert_eq!(config.page.width_mm, 100.0);
//! assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HagakiError;

/// Points per millimeter (PDF user space is 1/72 inch).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to PDF points.
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Convert PDF points to millimeters.
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

// ============================================================================
// PAGE
// ============================================================================

/// Physical page size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    /// Japanese official postcard: 100mm × 148mm.
    pub const HAGAKI: Self = Self {
        width_mm: 100.0,
        height_mm: 148.0,
    };

    #[inline]
    pub fn width_pt(&self) -> f32 {
        mm_to_pt(self.width_mm)
    }

    #[inline]
    pub fn height_pt(&self) -> f32 {
        mm_to_pt(self.height_mm)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::HAGAKI
    }
}

/// A translation applied to drawn elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x_mm: f32,
    pub y_mm: f32,
}

// ============================================================================
// POSTAL CODE
// ============================================================================

/// Placement of the seven postal-code digits.
///
/// Digits 1–3 sit in the left group, digits 4–7 in the right group. The right
/// group starts one `group_gap_mm` further than a plain continuation of the
/// left group's pitch would put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalLayout {
    /// Baseline of all digits.
    pub baseline_y_mm: f32,
    /// Center of the first digit.
    pub left_start_x_mm: f32,
    /// Center-to-center distance between digits.
    pub digit_pitch_mm: f32,
    /// Extra separation between the 3-digit and 4-digit groups.
    pub group_gap_mm: f32,
    pub font_size: f32,
}

impl Default for PostalLayout {
    fn default() -> Self {
        Self {
            baseline_y_mm: 148.0 - 15.8,
            left_start_x_mm: 46.0,
            digit_pitch_mm: 7.3,
            group_gap_mm: 0.6,
            font_size: 14.0,
        }
    }
}

impl PostalLayout {
    /// Center x of digit `index` (0-based, 0..7), before the print offset.
    pub fn digit_x_mm(&self, index: usize) -> f32 {
        if index < 3 {
            self.left_start_x_mm + index as f32 * self.digit_pitch_mm
        } else {
            let right_start =
                self.left_start_x_mm + 3.0 * self.digit_pitch_mm + self.group_gap_mm;
            right_start + (index - 3) as f32 * self.digit_pitch_mm
        }
    }
}

// ============================================================================
// ADDRESS
// ============================================================================

/// Which address-splitting algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapStrategy {
    /// Whitespace-token greedy fill with per-line character limits.
    #[default]
    Greedy,
    /// Two lines split after the first municipality keyword (区, 市, 郡).
    Keyword,
}

/// Limits for the address line wrapper. Lengths count characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    pub strategy: WrapStrategy,
    /// Tokens are joined onto a line only while it stays within this length.
    pub soft_limit: usize,
    /// Width of the chunks an over-long token is hard-broken into.
    pub hard_limit: usize,
    pub max_lines: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            strategy: WrapStrategy::Greedy,
            soft_limit: 17,
            hard_limit: 18,
            max_lines: 3,
        }
    }
}

/// One address column: where it sits and how large its glyphs may get.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddressSlot {
    pub x_mm: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressLayout {
    pub top_y_mm: f32,
    pub max_height_mm: f32,
    pub line_spacing: f32,
    /// Columns right to left. Lines beyond the slot count are not drawn.
    pub slots: Vec<AddressSlot>,
    pub wrap: WrapConfig,
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self {
            top_y_mm: 125.0,
            max_height_mm: 100.0,
            line_spacing: 1.1,
            slots: vec![
                AddressSlot {
                    x_mm: 90.0,
                    font_size: 16.0,
                },
                AddressSlot {
                    x_mm: 82.0,
                    font_size: 14.0,
                },
                AddressSlot {
                    x_mm: 74.0,
                    font_size: 14.0,
                },
            ],
            wrap: WrapConfig::default(),
        }
    }
}

// ============================================================================
// NAMES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameLayout {
    /// Center of the name block; a lone household name sits exactly here.
    pub base_x_mm: f32,
    /// Distance between adjacent name columns.
    pub column_pitch_mm: f32,
    pub top_y_mm: f32,
    pub max_height_mm: f32,
    pub font_size: f32,
    pub line_spacing: f32,
    /// Appended to every name column.
    pub honorific: String,
}

impl Default for NameLayout {
    fn default() -> Self {
        Self {
            base_x_mm: 50.0,
            column_pitch_mm: 14.0,
            top_y_mm: 115.0,
            max_height_mm: 95.0,
            font_size: 34.0,
            line_spacing: 1.15,
            honorific: " 様".to_string(),
        }
    }
}

// ============================================================================
// LAYOUT CONFIG
// ============================================================================

/// Complete, immutable page geometry handed to the page composer.
///
/// Any subset of fields can be overridden from JSON; missing fields keep
/// their defaults:
///
/// ```
/// use hagaki::postcard::LayoutConfig;
///
/// let config: LayoutConfig =
///     serde_json::from_str(r#"{"print_offset": {"x_mm": 0.0, "y_mm": 0.0}}"#).unwrap();
/// assert_eq!(config.print_offset.x_mm, 0.0);
/// assert_eq!(config.names.font_size, 34.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageSize,
    /// Applied uniformly to every drawn element to correct printer bias.
    pub print_offset: Offset,
    pub postal: PostalLayout,
    pub address: AddressLayout,
    pub names: NameLayout,
    /// Vertical runs never shrink below this size; they overflow instead.
    pub min_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageSize::HAGAKI,
            print_offset: Offset {
                x_mm: 0.7,
                y_mm: 1.3,
            },
            postal: PostalLayout::default(),
            address: AddressLayout::default(),
            names: NameLayout::default(),
            min_font_size: 8.0,
        }
    }
}

impl LayoutConfig {
    /// Load overrides from a JSON file and validate the result.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HagakiError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the renderer cannot honor.
    pub fn validate(&self) -> Result<(), HagakiError> {
        fn positive(value: f32, what: &str) -> Result<(), HagakiError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(HagakiError::Config(format!(
                    "{} must be positive, got {}",
                    what, value
                )))
            }
        }

        positive(self.page.width_mm, "page.width_mm")?;
        positive(self.page.height_mm, "page.height_mm")?;
        positive(self.min_font_size, "min_font_size")?;
        positive(self.postal.font_size, "postal.font_size")?;
        positive(self.address.line_spacing, "address.line_spacing")?;
        positive(self.address.max_height_mm, "address.max_height_mm")?;
        positive(self.names.line_spacing, "names.line_spacing")?;
        positive(self.names.max_height_mm, "names.max_height_mm")?;
        positive(self.names.font_size, "names.font_size")?;
        for (i, slot) in self.address.slots.iter().enumerate() {
            positive(slot.font_size, &format!("address.slots[{}].font_size", i))?;
        }

        let wrap = &self.address.wrap;
        if wrap.soft_limit == 0 || wrap.hard_limit == 0 {
            return Err(HagakiError::Config(
                "address.wrap limits must be non-zero".to_string(),
            ));
        }
        if wrap.hard_limit < wrap.soft_limit {
            return Err(HagakiError::Config(format!(
                "address.wrap.hard_limit ({}) is below soft_limit ({})",
                wrap.hard_limit, wrap.soft_limit
            )));
        }
        Ok(())
    }

    /// Convert a page x coordinate (mm) to points, including the print offset.
    #[inline]
    pub fn x_pt(&self, x_mm: f32) -> f32 {
        mm_to_pt(x_mm + self.print_offset.x_mm)
    }

    /// Convert a page y coordinate (mm) to points, including the print offset.
    #[inline]
    pub fn y_pt(&self, y_mm: f32) -> f32 {
        mm_to_pt(y_mm + self.print_offset.y_mm)
    }
}

// ============================================================================
// TESTS
// ============================================================================
