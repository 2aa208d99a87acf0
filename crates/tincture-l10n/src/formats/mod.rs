//! Catalog file formats.
//!
//! Each format parses one table's worth of `key -> template` entries. The
//! table name comes from the caller, or from the file stem when loading from
//! disk (`Localizable.strings` fills the `Localizable` table).
//!
//! | Format | Extensions | Shape |
//! |--------|------------|-------|
//! | [`Format::Strings`] | `.strings` | `"key" = "value";` lines with C comments |
//! | [`Format::Json`] | `.json` | flat object of string values |
//! | [`Format::Yaml`] | `.yaml`, `.yml` | flat mapping of string values |
//! | [`Format::Csv`] | `.csv` | `key,value` header row, one entry per record |
//! | [`Format::AndroidXml`] | `.xml` | `<resources><string name="key">value</string></resources>` |

mod android;
mod apple;
mod tabular;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::LoadError;

/// A catalog file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Strings,
    Json,
    Yaml,
    Csv,
    AndroidXml,
}

impl Format {
    /// Picks a format from a file extension, case-insensitively.
    ///
    /// ```rust
    /// use std::path::Path;
    /// use tincture_l10n::Format;
    ///
    /// assert_eq!(Format::from_path(Path::new("en/Localizable.strings")), Some(Format::Strings));
    /// assert_eq!(Format::from_path(Path::new("messages.YML")), Some(Format::Yaml));
    /// assert_eq!(Format::from_path(Path::new("README")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "strings" => Some(Format::Strings),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "csv" => Some(Format::Csv),
            "xml" => Some(Format::AndroidXml),
            _ => None,
        }
    }

    /// Parses `source` into entries, in file order where the format has one.
    ///
    /// A key that appears twice keeps its last value once inserted into a
    /// catalog.
    pub fn parse(self, source: &str) -> Result<Vec<(String, String)>, LoadError> {
        match self {
            Format::Strings => apple::parse(source),
            Format::Json => {
                let map: BTreeMap<String, String> = serde_json::from_str(source)?;
                Ok(map.into_iter().collect())
            }
            Format::Yaml => {
                let map: Option<BTreeMap<String, String>> = serde_yaml::from_str(source)?;
                Ok(map.unwrap_or_default().into_iter().collect())
            }
            Format::Csv => tabular::parse(source),
            Format::AndroidXml => android::parse(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flat_map() {
        let entries = Format::Json
            .parse(r#"{"b": "Bee", "a": "Ay %@"}"#)
            .unwrap();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), "Ay %@".to_string()),
                ("b".to_string(), "Bee".to_string())
            ]
        );
    }

    #[test]
    fn test_json_rejects_nested_values() {
        let err = Format::Json.parse(r#"{"a": {"b": "c"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_yaml_map_and_empty_document() {
        let entries = Format::Yaml.parse("title: Welcome\ncount: \"%d items\"\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("count".to_string(), "%d items".to_string())));

        assert!(Format::Yaml.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(Format::from_path(Path::new("table.toml")), None);
        assert_eq!(Format::from_path(Path::new("strings.xml")), Some(Format::AndroidXml));
    }
}
