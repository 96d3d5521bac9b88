//! # Recipient Records
//!
//! The ingestion boundary. Records arrive as a JSON array of objects keyed
//! either in English or with the address-book column names:
//!
//! ```json
//! [
//!   {"名前": "山田太郎", "連名": "花子、一郎", "住所": "100-0001 東京都千代田区千代田1-1", "印刷": true}
//! ]
//! ```
//!
//! Everything that can be normalized here is: blank or `nan` co-addressee
//! cells become `None`, so layout code never sees them.

use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::HagakiError;
use crate::text::{is_blank_field, resolve_co_addressees};

/// One postcard recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Household name, printed largest.
    #[serde(alias = "名前")]
    pub name: String,

    /// Free-text list of co-addressees, or `None` for nobody.
    #[serde(
        default,
        alias = "連名",
        deserialize_with = "deserialize_co_addressees"
    )]
    pub co_addressees: Option<String>,

    /// Free-text address with an embedded postal code.
    #[serde(alias = "住所")]
    pub address: String,

    /// Selected for the print batch.
    #[serde(default = "default_print", alias = "印刷")]
    pub print: bool,
}

fn default_print() -> bool {
    true
}

/// Accepts a string, `null` or a number (spreadsheet exports put NaN floats
/// in empty cells); anything blank resolves to `None`.
fn deserialize_co_addressees<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "co_addressees must be a string, got {}",
                other
            )));
        }
    };

    if is_blank_field(&text) {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

impl Recipient {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            co_addressees: None,
            address: address.into(),
            print: true,
        }
    }

    /// Builder-style co-addressee field.
    pub fn with_co_addressees(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.co_addressees = if is_blank_field(&field) {
            None
        } else {
            Some(field)
        };
        self
    }

    /// Individual co-addressee names in source order.
    pub fn co_addressee_names(&self) -> Vec<String> {
        self.co_addressees
            .as_deref()
            .map(resolve_co_addressees)
            .unwrap_or_default()
    }

    /// Reject records no page can be composed from. `index` is the record's
    /// position in its batch, for the error message.
    pub fn validate(&self, index: usize) -> Result<(), HagakiError> {
        if self.name.trim().is_empty() {
            return Err(HagakiError::InvalidRecord {
                index,
                reason: "name is blank".to_string(),
            });
        }
        if self.address.trim().is_empty() {
            return Err(HagakiError::InvalidRecord {
                index,
                reason: "address is blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse and validate a JSON array of recipients.
pub fn load_records(reader: impl Read) -> Result<Vec<Recipient>, HagakiError> {
    let records: Vec<Recipient> = serde_json::from_reader(reader)?;
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }
    log::debug!("Loaded {} recipient records", records.len());
    Ok(records)
}

/// [`load_records`] from a file path.
pub fn load_records_file(path: impl AsRef<Path>) -> Result<Vec<Recipient>, HagakiError> {
    let file = std::fs::File::open(path)?;
    load_records(std::io::BufReader::new(file))
}

/// Records marked for printing, in input order.
pub fn selected(records: &[Recipient]) -> Vec<Recipient> {
    records.iter().filter(|r| r.print).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_english_keys() {
        let json = r#"[{"name": "山田太郎", "address": "100-0001 東京都", "co_addressees": "花子"}]"#;
        let records = load_records(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].co_addressees.as_deref(), Some("花子"));
        assert!(records[0].print);
    }

    #[test]
    fn test_japanese_keys() {
        let json = r#"[{"名前": "山田太郎", "住所": "東京都", "連名": "花子、一郎", "印刷": false}]"#;
        let records = load_records(json.as_bytes()).unwrap();
        assert_eq!(records[0].name, "山田太郎");
        assert_eq!(records[0].co_addressee_names(), vec!["花子", "一郎"]);
        assert!(!records[0].print);
    }

    #[test]
    fn test_blank_co_addressees_become_none() {
        let json = r#"[
            {"name": "a", "address": "x"},
            {"name": "b", "address": "x", "co_addressees": null},
            {"name": "c", "address": "x", "co_addressees": "  "},
            {"name": "d", "address": "x", "co_addressees": "nan"}
        ]"#;
        let records = load_records(json.as_bytes()).unwrap();
        assert!(records.iter().all(|r| r.co_addressees.is_none()));
        assert!(records.iter().all(|r| r.co_addressee_names().is_empty()));
    }

    #[test]
    fn test_blank_name_rejected() {
        let json = r#"[{"name": "a", "address": "x"}, {"name": " ", "address": "x"}]"#;
        let err = load_records(json.as_bytes()).unwrap_err();
        assert!(matches!(err, HagakiError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_blank_address_rejected() {
        let err = Recipient::new("山田", "").validate(3).unwrap_err();
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let err = load_records(r#"[{"name": "a"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, HagakiError::Json(_)));
    }

    #[test]
    fn test_selected_keeps_order() {
        let mut skipped = Recipient::new("b", "x");
        skipped.print = false;
        let records = vec![Recipient::new("a", "x"), skipped, Recipient::new("c", "x")];
        let names: Vec<_> = selected(&records).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_with_co_addressees_builder() {
        assert_eq!(Recipient::new("a", "x").with_co_addressees("nan").co_addressees, None);
        assert_eq!(
            Recipient::new("a", "x").with_co_addressees("花子").co_addressee_names(),
            vec!["花子"]
        );
    }
}
