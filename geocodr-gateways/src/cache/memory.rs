use geocodr_core::gateways::cache::{KeyValueCache, SaveOptions};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// A process-local cache.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    default_lifetime: Option<Duration>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries saved without an explicit lifetime expire after `lifetime`.
    pub fn with_default_lifetime(lifetime: Duration) -> Self {
        Self {
            default_lifetime: Some(lifetime),
            ..Default::default()
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueCache for InMemoryCache {
    fn load(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if entries.get(key)?.is_expired(now) {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn save(&self, value: &str, key: &str, options: &SaveOptions) {
        let lifetime = options.lifetime.or(self.default_lifetime);
        let entry = Entry {
            value: value.to_owned(),
            expires_at: lifetime.map(|lifetime| Instant::now() + lifetime),
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), entry);
    }
}
