use std::time::Duration;

/// Options passed along with a value that is saved in a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Overrides the store's own expiry policy if set.
    pub lifetime: Option<Duration>,
}

/// A key-value store with expiry semantics.
///
/// Failures of the underlying store are handled by the
/// implementation: a value that cannot be loaded is absent.
pub trait KeyValueCache {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, value: &str, key: &str, options: &SaveOptions);
}

