//! # Co-addressee Resolution and Name Columns
//!
//! A household name may be followed by any number of co-addressees
//! (spouse, children). Each person gets one vertical column; the block of
//! columns stays centered on the base x as the headcount changes.
//!
//! ```text
//!   3 people, pitch p, base b:
//!
//!   x:  b - p      b        b + p
//!       花子       一郎      山田太郎
//!       (co #2)   (co #1)   (household)
//! ```

/// Separators between co-addressee names: ASCII comma, ideographic comma,
/// and middle dot. Whitespace is deliberately absent; it belongs to names.
const NAME_SEPARATORS: [char; 3] = [',', '、', '・'];

/// Marker a spreadsheet export leaves in empty cells.
const MISSING_MARKER: &str = "nan";

/// Split a co-addressee field into individual trimmed names.
///
/// ```
/// use hagaki::text::resolve_co_addressees;
///
/// assert_eq!(resolve_co_addressees("花子、一郎"), vec!["花子", "一郎"]);
/// assert_eq!(resolve_co_addressees("花子 一郎"), vec!["花子 一郎"]);
/// assert!(resolve_co_addressees("nan").is_empty());
/// ```
pub fn resolve_co_addressees(field: &str) -> Vec<String> {
    if is_blank_field(field) {
        return Vec::new();
    }

    field
        .split(|c: char| NAME_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a raw co-addressee field means "nobody": empty, whitespace only,
/// or the literal `nan`.
pub fn is_blank_field(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.is_empty() || trimmed == MISSING_MARKER
}

/// One vertical name column.
#[derive(Debug, Clone, PartialEq)]
pub struct NameColumn {
    pub text: String,
    /// Horizontal anchor (column center), in the caller's units.
    pub x: f32,
}

/// Household name plus co-addressees, positioned side by side.
///
/// Only built by [`layout_name_columns`], so the household column is
/// always present.
#[derive(Debug, Clone, PartialEq)]
pub struct NameColumns {
    /// Household name first, then co-addressees in source order.
    columns: Vec<NameColumn>,
}

impl NameColumns {
    /// All columns, household first.
    pub fn columns(&self) -> &[NameColumn] {
        &self.columns
    }

    /// Number of people on the card (household name included).
    pub fn total_people(&self) -> usize {
        self.columns.len()
    }

    /// The household (anchor) column.
    pub fn household(&self) -> &NameColumn {
        &self.columns[0]
    }

    /// Co-addressee columns, nearest to the household name first.
    pub fn co_addressees(&self) -> &[NameColumn] {
        &self.columns[1..]
    }
}

/// Compute column anchors for a household name and its co-addressees.
///
/// The household column sits at `base_x + (total_people - 1) * pitch / 2`;
/// each co-addressee steps one `pitch` further left.
pub fn layout_name_columns(
    household: &str,
    co_addressees: &[String],
    base_x: f32,
    pitch: f32,
) -> NameColumns {
    let total_people = co_addressees.len() + 1;
    let household_x = base_x + ((total_people - 1) as f32 * pitch) / 2.0;

    let mut columns = Vec::with_capacity(total_people);
    columns.push(NameColumn {
        text: household.to_string(),
        x: household_x,
    });
    for (i, name) in co_addressees.iter().enumerate() {
        columns.push(NameColumn {
            text: name.clone(),
            x: household_x - (i + 1) as f32 * pitch,
        });
    }

    NameColumns { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_space_is_not_a_separator() {
        assert_eq!(resolve_co_addressees("花子 一郎"), vec!["花子 一郎"]);
    }

    #[test]
    fn test_ideographic_comma() {
        assert_eq!(resolve_co_addressees("花子、一郎"), vec!["花子", "一郎"]);
    }

    #[test]
    fn test_mixed_separator_runs() {
        assert_eq!(
            resolve_co_addressees(" 花子 ,、 一郎・・次郎 ,"),
            vec!["花子", "一郎", "次郎"]
        );
    }

    #[test]
    fn test_blank_fields() {
        assert!(resolve_co_addressees("").is_empty());
        assert!(resolve_co_addressees("   ").is_empty());
        assert!(resolve_co_addressees("\u{3000}").is_empty());
        assert!(resolve_co_addressees("nan").is_empty());
        assert!(resolve_co_addressees(" nan ").is_empty());
    }

    #[test]
    fn test_separators_only() {
        assert!(resolve_co_addressees("、,・").is_empty());
    }

    #[test]
    fn test_never_yields_empty_entries() {
        for field in ["a,,b", ",a,", "、・、x", "x ・ ", "・"] {
            for name in resolve_co_addressees(field) {
                assert!(!name.is_empty());
                assert_eq!(name.trim(), name);
            }
        }
    }

    #[test]
    fn test_household_only_at_base() {
        let columns = layout_name_columns("山田 太郎", &[], 50.0, 14.0);
        assert_eq!(columns.total_people(), 1);
        assert_eq!(columns.household().x, 50.0);
        assert!(columns.co_addressees().is_empty());
        assert_eq!(columns.columns(), std::slice::from_ref(columns.household()));
    }

    #[test]
    fn test_two_people_shift_right_by_half_pitch() {
        let co = vec!["花子".to_string()];
        let columns = layout_name_columns("太郎", &co, 50.0, 14.0);
        assert_eq!(columns.household().x, 57.0);
        assert_eq!(columns.co_addressees()[0].x, 43.0);
    }

    #[test]
    fn test_three_people_centered() {
        let co = vec!["花子".to_string(), "一郎".to_string()];
        let columns = layout_name_columns("太郎", &co, 50.0, 14.0);
        let xs: Vec<f32> = columns.columns().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![64.0, 50.0, 36.0]);
        assert_eq!(columns.co_addressees()[0].text, "花子");
        assert_eq!(columns.co_addressees()[1].text, "一郎");
    }

    #[test]
    fn test_block_stays_centered() {
        for n in 0..6 {
            let co: Vec<String> = (0..n).map(|i| format!("名{}", i)).collect();
            let columns = layout_name_columns("世帯主", &co, 50.0, 10.0);
            let first = columns.columns().first().unwrap().x;
            let last = columns.columns().last().unwrap().x;
            assert!(((first + last) / 2.0 - 50.0).abs() < 1e-4);
        }
    }
}
