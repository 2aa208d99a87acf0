//! Key resolution with a visible fallback for missing keys.

use std::borrow::Cow;

use serde::Deserialize;

use crate::error::FormatError;
use crate::printf::{format_template, FormatArg};
use crate::store::StringsStore;

/// Table consulted by [`Localizer::localize`] when none is given.
pub const DEFAULT_TABLE: &str = "Localizable";
pub const DEFAULT_MISSING_PREFIX: &str = "[!";
pub const DEFAULT_MISSING_SUFFIX: &str = "]";

/// How a [`Localizer`] resolves keys.
///
/// Deserializes with every field optional:
///
/// ```rust
/// use tincture_l10n::LocalizerConfig;
///
/// let config: LocalizerConfig = serde_json::from_str(r#"{"default_table": "App"}"#).unwrap();
/// assert_eq!(config.default_table, "App");
/// assert_eq!(config.missing_prefix, "[!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    pub default_table: String,
    /// Placed before a missing key in the fallback marker.
    pub missing_prefix: String,
    /// Placed after a missing key in the fallback marker.
    pub missing_suffix: String,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            default_table: DEFAULT_TABLE.to_string(),
            missing_prefix: DEFAULT_MISSING_PREFIX.to_string(),
            missing_suffix: DEFAULT_MISSING_SUFFIX.to_string(),
        }
    }
}

impl LocalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_table(mut self, table: impl Into<String>) -> Self {
        self.default_table = table.into();
        self
    }

    pub fn missing_marker(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.missing_prefix = prefix.into();
        self.missing_suffix = suffix.into();
        self
    }
}

/// Resolves localization keys against a [`StringsStore`].
///
/// Lookups never fail: a key the store does not have resolves to a visible
/// marker, `[!key]` by default, and a warning is logged. Only
/// [`Localizer::localize_formatted`] can fail, when its arguments do not fit
/// the resolved template.
///
/// The localizer holds no mutable state and can be shared across threads
/// whenever its store can.
#[derive(Debug, Clone)]
pub struct Localizer<S> {
    store: S,
    config: LocalizerConfig,
}

impl<S: StringsStore> Localizer<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LocalizerConfig::default())
    }

    pub fn with_config(store: S, config: LocalizerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The template for `key` in `table`, without the missing-key fallback.
    pub fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        self.store.lookup(table, key)
    }

    /// Resolves `key` in the default table.
    pub fn localize(&self, key: &str) -> String {
        self.localize_in(&self.config.default_table, key)
    }

    /// Resolves `key` in `table`.
    ///
    /// ```rust
    /// use tincture_l10n::{Catalog, Localizer};
    ///
    /// let localizer = Localizer::new(Catalog::new().with_entry("Errors", "io", "Disk error"));
    /// assert_eq!(localizer.localize_in("Errors", "io"), "Disk error");
    /// assert_eq!(localizer.localize("io"), "[!io]");
    /// ```
    pub fn localize_in(&self, table: &str, key: &str) -> String {
        match self.store.lookup(table, key) {
            Some(template) => template.into_owned(),
            None => self.missing(table, key),
        }
    }

    /// Resolves `key` in the default table and substitutes `args`.
    pub fn localize_formatted(&self, key: &str, args: &[FormatArg]) -> Result<String, FormatError> {
        self.localize_formatted_in(&self.config.default_table, key, args)
    }

    /// Resolves `key` in `table` and substitutes `args`.
    ///
    /// A missing key resolves to its marker, which is then formatted like any
    /// other template: placeholders in the key itself are substituted and
    /// still need their arguments. A `%` in the configured prefix or suffix
    /// is taken literally.
    ///
    /// ```rust
    /// use tincture_l10n::{Catalog, Localizer};
    ///
    /// let localizer = Localizer::new(Catalog::new());
    /// let text = localizer.localize_formatted("Hello %s", &["World".into()]).unwrap();
    /// assert_eq!(text, "[!Hello World]");
    /// assert!(localizer.localize_formatted("Hello %s", &[]).is_err());
    /// ```
    pub fn localize_formatted_in(
        &self,
        table: &str,
        key: &str,
        args: &[FormatArg],
    ) -> Result<String, FormatError> {
        match self.store.lookup(table, key) {
            Some(template) => format_template(&template, args),
            None => {
                tracing::warn!(table, key, "missing localization key");
                let template = format!(
                    "{}{key}{}",
                    self.config.missing_prefix.replace('%', "%%"),
                    self.config.missing_suffix.replace('%', "%%")
                );
                format_template(&template, args)
            }
        }
    }

    /// The fallback shown in place of a missing `key`.
    pub fn missing_marker(&self, key: &str) -> String {
        format!(
            "{}{key}{}",
            self.config.missing_prefix, self.config.missing_suffix
        )
    }

    fn missing(&self, table: &str, key: &str) -> String {
        tracing::warn!(table, key, "missing localization key");
        self.missing_marker(key)
    }
}
