//! # Postal Code Extraction
//!
//! Finds a Japanese postal code (`NNN-NNNN` or `NNNNNNN`) anywhere in a
//! free-form address and separates it from the street address.

use regex::Regex;
use std::sync::LazyLock;

/// Three digits, optional hyphen, four digits. `\d` is Unicode-aware, so
/// full-width codes match too.
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}-?\d{4}").expect("valid regex"));

/// Number of digits in a complete postal code.
pub const POSTAL_CODE_DIGITS: usize = 7;

/// An address split into its postal code and the remaining street address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalSplit {
    /// ASCII digits of the matched code. Fewer than 7 (e.g. a full-width
    /// code) means the code is treated as absent.
    pub digits: String,
    /// The address with the matched code removed and trimmed; the untouched
    /// input when nothing matched.
    pub remainder: String,
}

impl PostalSplit {
    /// Whether a complete code was found (the postal block gets printed).
    pub fn has_code(&self) -> bool {
        self.digits.len() == POSTAL_CODE_DIGITS
    }
}

/// Extract the leftmost postal code from `address`.
///
/// ```
/// use hagaki::text::extract_postal_code;
///
/// let split = extract_postal_code("100-0001 東京都千代田区千代田1-1");
/// assert_eq!(split.digits, "1000001");
/// assert_eq!(split.remainder, "東京都千代田区千代田1-1");
/// ```
pub fn extract_postal_code(address: &str) -> PostalSplit {
    let Some(m) = POSTAL_CODE_RE.find(address) else {
        return PostalSplit {
            digits: String::new(),
            remainder: address.to_string(),
        };
    };

    let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();

    let mut remainder = String::with_capacity(address.len() - m.len());
    remainder.push_str(&address[..m.start()]);
    remainder.push_str(&address[m.end()..]);

    PostalSplit {
        digits,
        remainder: remainder.trim().to_string(),
    }
}
