//! In-memory string tables.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::formats::Format;
use crate::store::StringsStore;

/// Tables of localized templates, `table -> key -> template`.
///
/// Serializes as a nested map, so a whole catalog can be stored as one JSON
/// or YAML document.
///
/// # Example
///
/// ```rust
/// use tincture_l10n::{Catalog, Format, StringsStore};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .load_str("Settings", "\"title\" = \"Settings\";", Format::Strings)
///     .unwrap();
/// assert_eq!(catalog.lookup("Settings", "title").as_deref(), Some("Settings"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Catalog::insert`].
    pub fn with_entry(
        mut self,
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(table, key, value);
        self
    }

    /// Adds or replaces one entry, returning the previous template.
    pub fn insert(
        &mut self,
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.tables
            .entry(table.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Merges entries into `table`. Later entries win over earlier ones and
    /// over what the table already held.
    pub fn insert_table<I, K, V>(&mut self, table: impl Into<String>, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let target = self.tables.entry(table.into()).or_default();
        let mut count = 0;
        for (key, value) in entries {
            target.insert(key.into(), value.into());
            count += 1;
        }
        count
    }

    /// Entries of one table.
    pub fn table(&self, table: &str) -> Option<&HashMap<String, String>> {
        self.tables.get(table)
    }

    /// Table names, sorted.
    pub fn tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of entries across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses `source` in `format` and merges it into `table`.
    ///
    /// Returns the number of entries read. Nothing is merged if parsing fails.
    pub fn load_str(
        &mut self,
        table: impl Into<String>,
        source: &str,
        format: Format,
    ) -> Result<usize, LoadError> {
        let entries = format.parse(source)?;
        Ok(self.insert_table(table, entries))
    }

    /// Loads one catalog file into the table named by its file stem.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let format =
            Format::from_path(path).ok_or_else(|| LoadError::UnknownFormat(path.to_path_buf()))?;
        let table = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| LoadError::UnknownFormat(path.to_path_buf()))?
            .to_string();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = decode_text(&bytes).ok_or_else(|| LoadError::Encoding {
            path: path.to_path_buf(),
        })?;

        let count = self.load_str(table.as_str(), &source, format)?;
        tracing::debug!(path = %path.display(), table = %table, entries = count, "loaded catalog file");
        Ok(count)
    }

    /// Loads every recognised catalog file directly inside `dir`.
    ///
    /// Files are read in name order, so when two files share a stem the later
    /// name's entries win. Files with unknown extensions are skipped.
    /// Subdirectories are not descended into. Returns the number of files
    /// loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let io_error = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            if Format::from_path(&path).is_none() {
                tracing::debug!(path = %path.display(), "skipping file with unknown catalog format");
                continue;
            }
            self.load_file(&path)?;
            loaded += 1;
        }
        Ok(loaded)
    }
}

/// Decodes UTF-8, or UTF-16 when the bytes start with a byte order mark.
///
/// Apple's `genstrings` writes UTF-16 tables, so both have to load.
fn decode_text(bytes: &[u8]) -> Option<String> {
    let utf16 = |rest: &[u8], from_bytes: fn([u8; 2]) -> u16| {
        if rest.len() % 2 != 0 {
            return None;
        }
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| from_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    };
    match bytes {
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

impl StringsStore for Catalog {
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        self.tables
            .get(table)?
            .get(key)
            .map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl<T, K, V> FromIterator<(T, K, V)> for Catalog
where
    T: Into<String>,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, K, V)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (table, key, value) in iter {
            catalog.insert(table, key, value);
        }
        catalog
    }
}
