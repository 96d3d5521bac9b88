//! # Vertical Glyph Normalization
//!
//! Converts characters that only read correctly in horizontal writing into
//! their vertical-writing forms. The mapping is strictly one character in,
//! one character out, so column lengths computed before and after
//! normalization agree.
//!
//! - ASCII digits become kanji numerals: `1` → `一`. Full-width digits
//!   are left alone
//! - Hyphens and the long vowel mark become a vertical bar: `-` → `丨`
//! - Parentheses become vertical presentation forms: `(` → `︵`

/// Normalize a string for vertical writing.
///
/// ```
/// use hagaki::text::normalize;
///
/// assert_eq!(normalize("千代田1-1"), "千代田一丨一");
/// assert_eq!(normalize("(株)"), "︵株︶");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars().map(vertical_form).collect()
}

/// Map one character to its vertical-writing glyph.
///
/// Characters without a vertical form are returned unchanged.
pub fn vertical_form(ch: char) -> char {
    match ch {
        '0' => '〇',
        '1' => '一',
        '2' => '二',
        '3' => '三',
        '4' => '四',
        '5' => '五',
        '6' => '六',
        '7' => '七',
        '8' => '八',
        '9' => '九',

        // ASCII hyphen, katakana long vowel mark, full-width hyphen-minus
        '-' | 'ー' | '－' => '丨',

        '(' | '（' => '︵',
        ')' | '）' => '︶',

        other => other,
    }
}
