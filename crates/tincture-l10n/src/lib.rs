//! # Tincture L10n
//!
//! Localized string lookup for display code.
//!
//! - [`StringsStore`]: the read-only `(table, key) -> template` source, injected
//!   by the host. [`Catalog`] is the in-memory implementation; closures can be
//!   adapted with [`FnStore`].
//! - [`Localizer`]: resolves keys against a store with a default table, and
//!   substitutes printf-style arguments into the resolved template.
//! - [`format_template`]: the printf-style formatter on its own.
//!
//! A key that is missing from the store is not an error. The localizer returns
//! the key wrapped in a visible marker (`[!key]` by default) so untranslated
//! strings stand out on screen instead of disappearing.
//!
//! ## Example
//!
//! ```rust
//! use tincture_l10n::{Catalog, FormatArg, Localizer};
//!
//! let catalog = Catalog::new()
//!     .with_entry("Localizable", "greeting", "Hello %@, you have %d messages");
//! let localizer = Localizer::new(catalog);
//!
//! let text = localizer
//!     .localize_formatted("greeting", &[FormatArg::from("Ana"), FormatArg::from(3)])
//!     .unwrap();
//! assert_eq!(text, "Hello Ana, you have 3 messages");
//!
//! assert_eq!(localizer.localize("farewell"), "[!farewell]");
//! ```
//!
//! ## Catalog files
//!
//! Tables can be loaded from Apple `.strings`, flat JSON or YAML maps, CSV with
//! `key,value` headers, and Android `strings.xml`. See [`Format`] and
//! [`Catalog::load_dir`].

mod catalog;
mod error;
pub mod formats;
mod localizer;
mod printf;
mod store;

pub use catalog::Catalog;
pub use error::{FormatError, LoadError};
pub use formats::Format;
pub use localizer::{
    Localizer, LocalizerConfig, DEFAULT_MISSING_PREFIX, DEFAULT_MISSING_SUFFIX, DEFAULT_TABLE,
};
pub use printf::{format_template, required_arguments, FormatArg};
pub use store::{FnStore, StringsStore};
