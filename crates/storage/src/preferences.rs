//! The persisted theme preference
//!
//! The site keeps exactly one durable value: whether the visitor chose the
//! light or the dark theme. It lives under [`THEME_KEY`] as `"light"` or
//! `"dark"`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::kv::{KvStore, Result};

/// Key the theme preference is stored under
pub const THEME_KEY: &str = "theme";

/// Light or dark display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemePreference {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// The other preference
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Check if this is the dark theme
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemePreference::Dark)
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Durable home for the theme preference
pub trait PreferenceStore: Send + Sync {
    /// Read the stored preference, `None` when nothing was saved yet
    fn load_theme(&self) -> Result<Option<ThemePreference>>;

    /// Write the preference; it is durable once this returns `Ok`
    fn save_theme(&self, theme: ThemePreference) -> Result<()>;
}

impl PreferenceStore for KvStore {
    fn load_theme(&self) -> Result<Option<ThemePreference>> {
        self.get(THEME_KEY)
    }

    fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        self.set(THEME_KEY, &theme)?;
        self.flush()
    }
}

/// Preference store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    theme: RwLock<Option<ThemePreference>>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a preference
    pub fn with_theme(theme: ThemePreference) -> Self {
        Self { theme: RwLock::new(Some(theme)) }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Result<Option<ThemePreference>> {
        Ok(*self.theme.read())
    }

    fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        *self.theme.write() = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvConfig;
    use std::process::Command;
    use tempfile::TempDir;

    const CHILD_STORE_PATH: &str = "WELIGHT_CHILD_STORE_PATH";

    #[test]
    fn test_theme_preference_default() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
    }

    #[test]
    fn test_theme_preference_toggled() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
        assert!(ThemePreference::Dark.is_dark());
        assert!(!ThemePreference::Light.is_dark());
    }

    #[test]
    fn test_theme_preference_from_str() {
        assert_eq!("dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!("LIGHT".parse::<ThemePreference>(), Ok(ThemePreference::Light));
        assert!("dim".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_theme_preference_serialization() {
        let json = serde_json::to_string(&ThemePreference::Dark).unwrap();
        assert_eq!(json, "\"dark\"");

        let parsed: ThemePreference = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ThemePreference::Light);
    }

    #[test]
    fn test_kv_store_round_trips_theme() {
        let kv = KvStore::in_memory().unwrap();
        assert_eq!(kv.load_theme().unwrap(), None);

        kv.save_theme(ThemePreference::Dark).unwrap();
        assert_eq!(kv.load_theme().unwrap(), Some(ThemePreference::Dark));

        let raw: Option<String> = kv.get(THEME_KEY).unwrap();
        assert_eq!(raw.as_deref(), Some("dark"));
    }

    #[test]
    fn test_kv_store_rejects_garbage_theme() {
        let kv = KvStore::in_memory().unwrap();
        kv.set(THEME_KEY, &"sepia").unwrap();
        assert!(kv.load_theme().is_err());
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.load_theme().unwrap(), None);

        prefs.save_theme(ThemePreference::Light).unwrap();
        assert_eq!(prefs.load_theme().unwrap(), Some(ThemePreference::Light));

        let seeded = MemoryPreferences::with_theme(ThemePreference::Dark);
        assert_eq!(seeded.load_theme().unwrap(), Some(ThemePreference::Dark));
    }

    #[test]
    fn test_saved_theme_survives_abrupt_exit() {
        // Child half: save, then exit without dropping the store
        if let Ok(path) = std::env::var(CHILD_STORE_PATH) {
            let kv = KvStore::new(KvConfig::new(path)).unwrap();
            kv.save_theme(ThemePreference::Dark).unwrap();
            std::process::exit(0);
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").to_string_lossy().to_string();

        let status = Command::new(std::env::current_exe().unwrap())
            .args(["--exact", "preferences::tests::test_saved_theme_survives_abrupt_exit"])
            .env(CHILD_STORE_PATH, &path)
            .status()
            .unwrap();
        assert!(status.success());

        let kv = KvStore::new(KvConfig::new(path)).unwrap();
        assert_eq!(kv.load_theme().unwrap(), Some(ThemePreference::Dark));
    }
}
