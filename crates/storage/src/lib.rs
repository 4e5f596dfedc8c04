//! Storage layer for the WeLight site
//!
//! This crate provides the sled-backed key-value store and the single
//! persisted preference the site keeps: the light/dark theme.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod preferences;

pub use kv::{KvConfig, KvError, KvStore};
pub use preferences::{MemoryPreferences, PreferenceStore, ThemePreference, THEME_KEY};
