use geocodr_core::gateways::{
    cache::{KeyValueCache, SaveOptions},
    clock::{Clock, SystemClock},
};
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{
    fmt, io,
    path::Path,
    sync::Arc,
    time::Duration,
};

/// A cache that keeps every entry in a JSON file
/// and therefore survives restarts of the process.
pub struct JsonFileCache {
    json_store: Store,
    clock: Arc<dyn Clock + Send + Sync>,
    default_lifetime: Option<Duration>,
}

impl fmt::Debug for JsonFileCache {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("JsonFileCache")
            .field("path", &self.path())
            .field("default_lifetime", &self.default_lifetime)
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonEntry {
    value: String,
    /// Unix timestamp in seconds
    #[serde(default)]
    expires_at: Option<i64>,
}

impl JsonFileCache {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self {
            json_store,
            clock: Arc::new(SystemClock),
            default_lifetime: None,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_default_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_lifetime = Some(lifetime);
        self
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }

    fn now(&self) -> i64 {
        self.clock.now().unix_timestamp()
    }
}

impl KeyValueCache for JsonFileCache {
    fn load(&self, key: &str) -> Option<String> {
        let entry = match self.json_store.get::<JsonEntry>(key) {
            Ok(entry) => entry,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("Unable to read cache entry '{key}': {err}");
                }
                return None;
            }
        };
        if entry.expires_at.is_some_and(|ts| self.now() >= ts) {
            log::debug!("Cache entry '{key}' has expired");
            if let Err(err) = self.json_store.delete(key) {
                log::warn!("Unable to delete expired cache entry '{key}': {err}");
            }
            return None;
        }
        Some(entry.value)
    }

    fn save(&self, value: &str, key: &str, options: &SaveOptions) {
        let expires_at = options
            .lifetime
            .or(self.default_lifetime)
            .map(|lifetime| self.now().saturating_add_unsigned(lifetime.as_secs()));
        let entry = JsonEntry {
            value: value.to_owned(),
            expires_at,
        };
        if let Err(err) = self.json_store.save_with_id(&entry, key) {
            log::warn!("Unable to save cache entry '{key}' in JSON file: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    struct ManualClock(Mutex<i64>);

    impl ManualClock {
        fn at(ts: i64) -> Arc<Self> {
            Arc::new(Self(Mutex::new(ts)))
        }
        fn advance(&self, secs: i64) {
            *self.0.lock().unwrap() += secs;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> OffsetDateTime {
            OffsetDateTime::from_unix_timestamp(*self.0.lock().unwrap()).unwrap()
        }
    }

    #[test]
    fn entries_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::try_new(dir.path()).unwrap();
        cache.save("1700000000", "dailyLimit", &SaveOptions::default());
        drop(cache);

        let cache = JsonFileCache::try_new(dir.path()).unwrap();
        assert_eq!(Some("1700000000".to_string()), cache.load("dailyLimit"));
    }

    #[test]
    fn missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::try_new(dir.path()).unwrap();
        assert!(cache.load("unknown").is_none());
    }

    #[test]
    fn expired_entries_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::at(1_000);
        let cache = JsonFileCache::try_new(dir.path())
            .unwrap()
            .with_clock(clock.clone())
            .with_default_lifetime(Duration::from_secs(60));
        cache.save("value", "key", &SaveOptions::default());

        clock.advance(59);
        assert_eq!(Some("value".to_string()), cache.load("key"));

        clock.advance(1);
        assert!(cache.load("key").is_none());
        assert!(!dir.path().join("key.json").exists());
    }
}
