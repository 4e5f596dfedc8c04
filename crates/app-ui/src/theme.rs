//! Theme store and theme context
//!
//! The site has two themes, light and dark. The visitor's choice is kept in
//! a [`PreferenceStore`] so it survives reloads; on first visit the OS
//! color-scheme signal decides.
//!
//! Rendering code never reads a global flag. Every change produces a
//! [`ThemeContext`] that is handed to whatever draws the page.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use app_ui::theme::{FixedColorScheme, ThemeStore};
//! use storage::{MemoryPreferences, ThemePreference};
//!
//! let prefs = Arc::new(MemoryPreferences::new());
//! let mut store = ThemeStore::initial(prefs, &FixedColorScheme::dark());
//! assert_eq!(store.current(), ThemePreference::Dark);
//!
//! let ctx = store.toggle();
//! assert!(!ctx.is_dark());
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::PreferenceStore;

pub use storage::ThemePreference;

// =============================================================================
// OS Signal
// =============================================================================

/// Source of the operating system's dark-mode signal
pub trait ColorSchemeProbe {
    /// Whether the OS asks for a dark color scheme
    fn prefers_dark(&self) -> bool;
}

/// A probe with a fixed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedColorScheme {
    prefers_dark: bool,
}

impl FixedColorScheme {
    /// OS reports a light scheme (or nothing at all)
    pub fn light() -> Self {
        Self { prefers_dark: false }
    }

    /// OS reports a dark scheme
    pub fn dark() -> Self {
        Self { prefers_dark: true }
    }
}

impl ColorSchemeProbe for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

// =============================================================================
// Theme Context
// =============================================================================

/// Theme information passed explicitly to rendering components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeContext {
    /// Active preference
    pub preference: ThemePreference,
}

impl ThemeContext {
    /// Create a context for a preference
    pub fn new(preference: ThemePreference) -> Self {
        Self { preference }
    }

    /// Check if the dark theme is active
    pub fn is_dark(&self) -> bool {
        self.preference.is_dark()
    }

    /// CSS `color-scheme` value
    pub fn color_scheme(&self) -> &'static str {
        self.preference.as_str()
    }

    /// Class to put on the document root so global rules apply
    pub fn root_class(&self) -> Option<&'static str> {
        if self.is_dark() {
            Some("dark")
        } else {
            None
        }
    }

    /// Pick between a light and a dark variant
    pub fn pick<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        if self.is_dark() {
            dark
        } else {
            light
        }
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemePreference::Light)
    }
}

// =============================================================================
// Theme Store
// =============================================================================

/// Holds the current preference and writes every change back to storage
///
/// Storage failures never surface: reads fall back to the OS signal and
/// writes leave the store working in memory only.
pub struct ThemeStore {
    current: ThemePreference,
    store: Arc<dyn PreferenceStore>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore").field("current", &self.current).finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Resolve the first-load preference
    ///
    /// Persisted value first, then the OS signal, then light. The resolved
    /// value is written back so the next session starts from it.
    pub fn initial(store: Arc<dyn PreferenceStore>, probe: &dyn ColorSchemeProbe) -> Self {
        let persisted = match store.load_theme() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                None
            }
        };

        let current = persisted.unwrap_or_else(|| {
            if probe.prefers_dark() {
                ThemePreference::Dark
            } else {
                ThemePreference::Light
            }
        });

        let theme_store = Self { current, store };
        theme_store.persist();
        theme_store
    }

    /// Current preference
    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Context for rendering the current preference
    pub fn context(&self) -> ThemeContext {
        ThemeContext::new(self.current)
    }

    /// Flip between light and dark
    pub fn toggle(&mut self) -> ThemeContext {
        self.set(self.current.toggled())
    }

    /// Switch to a specific preference
    pub fn set(&mut self, preference: ThemePreference) -> ThemeContext {
        self.current = preference;
        self.persist();
        tracing::debug!(theme = %preference, "theme changed");
        self.context()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_theme(self.current) {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }
    }
}
