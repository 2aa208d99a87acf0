//! The string-store seam.

use std::borrow::Cow;
use std::sync::Arc;

/// A read-only source of localized templates, keyed by table and key.
///
/// Implementations must be safe to share across threads; lookups never
/// mutate the store.
pub trait StringsStore: Send + Sync {
    /// Returns the template for `key` in `table`, or `None` when absent.
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>>;
}

impl<S: StringsStore + ?Sized> StringsStore for &S {
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(table, key)
    }
}

impl<S: StringsStore + ?Sized> StringsStore for Arc<S> {
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(table, key)
    }
}

impl<S: StringsStore + ?Sized> StringsStore for Box<S> {
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(table, key)
    }
}

/// Adapts a closure into a [`StringsStore`].
///
/// ```rust
/// use tincture_l10n::{FnStore, Localizer};
///
/// let store = FnStore(|table: &str, key: &str| {
///     (table == "Localizable" && key == "ok").then(|| "OK".to_string())
/// });
/// let localizer = Localizer::new(store);
/// assert_eq!(localizer.localize("ok"), "OK");
/// ```
pub struct FnStore<F>(pub F);

impl<F> StringsStore for FnStore<F>
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
        (self.0)(table, key).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Single;

    impl StringsStore for Single {
        fn lookup(&self, table: &str, key: &str) -> Option<Cow<'_, str>> {
            (table == "t" && key == "k").then_some(Cow::Borrowed("v"))
        }
    }

    #[test]
    fn test_forwarding_impls() {
        let boxed: Box<dyn StringsStore> = Box::new(Single);
        assert_eq!(boxed.lookup("t", "k").as_deref(), Some("v"));

        let shared = Arc::new(Single);
        assert_eq!(shared.lookup("t", "k").as_deref(), Some("v"));
        assert_eq!((&Single).lookup("t", "x"), None);
    }

    #[test]
    fn test_fn_store() {
        let store = FnStore(|_: &str, key: &str| Some(key.to_uppercase()));
        assert_eq!(store.lookup("any", "abc").as_deref(), Some("ABC"));
    }
}
