//! Key-value store for durable site preferences
//!
//! A thin, typed wrapper over sled. Values are stored as JSON so the
//! persisted theme reads back as `"dark"` or `"light"`.

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Background flush interval in milliseconds (None keeps sled's default)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "welight_kv.db".to_string(),
            cache_capacity: 1024 * 1024, // 1MB, one key lives here
            use_compression: true,
            flush_every_ms: None,
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").finish_non_exhaustive()
    }
}

impl KvStore {
    /// Open a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let mut sled_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            sled_config = sled_config.flush_every_ms(Some(ms));
        }

        let db = sled_config.open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a value by key
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value by key
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        if key.is_empty() {
            return Err(KvError::InvalidKey("key must not be empty".to_string()));
        }
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kv_store_creation() {
        let kv = KvStore::in_memory().unwrap();
        let value: Option<String> = kv.get("theme").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_and_get() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("theme", &"dark".to_string()).unwrap();

        let value: Option<String> = kv.get("theme").unwrap();
        assert_eq!(value, Some("dark".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let kv = KvStore::in_memory().unwrap();
        let value: Option<String> = kv.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_overwrite_value() {
        let kv = KvStore::in_memory().unwrap();
        kv.set("theme", &"dark").unwrap();
        kv.set("theme", &"light").unwrap();

        let value: Option<String> = kv.get("theme").unwrap();
        assert_eq!(value.as_deref(), Some("light"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let kv = KvStore::in_memory().unwrap();
        let err = kv.set("", &"dark").unwrap_err();
        assert!(matches!(err, KvError::InvalidKey(_)));
    }

    #[test]
    fn test_type_mismatch_is_serialization_error() {
        let kv = KvStore::in_memory().unwrap();
        kv.set("theme", &42).unwrap();

        let err = kv.get::<bool>("theme").unwrap_err();
        assert!(matches!(err, KvError::Serialization(_)));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();

        {
            let kv = KvStore::new(KvConfig::new(path.clone())).unwrap();
            kv.set("theme", &"dark").unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(KvConfig::new(path)).unwrap();
        let value: Option<String> = kv.get("theme").unwrap();
        assert_eq!(value.as_deref(), Some("dark"));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("site.db")
            .cache_capacity(4096)
            .use_compression(false)
            .flush_every_ms(Some(250));

        assert_eq!(config.path, "site.db");
        assert_eq!(config.cache_capacity, 4096);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, Some(250));
    }

    #[test]
    fn test_custom_flush_interval() {
        assert_eq!(KvConfig::default().flush_every_ms, None);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();
        let kv = KvStore::new(KvConfig::new(path).flush_every_ms(Some(100))).unwrap();
        kv.set("theme", &"dark").unwrap();
        kv.flush().unwrap();
    }
}
