//! WeLight site core
//!
//! Headless state for the WeLight team's single-page site: theme preference,
//! scroll-spy navigation, and the contact form. A rendering layer feeds
//! [`SiteEvent`]s in and carries out the returned [`Effect`]s.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use welight::{FixedColorScheme, SectionGeometry, SectionId, Site, SiteConfig, SiteEvent};
//! use storage::MemoryPreferences;
//!
//! let mut site = Site::with_store(
//!     Arc::new(MemoryPreferences::new()),
//!     SiteConfig::default(),
//!     &FixedColorScheme::light(),
//! );
//! site.handle(SiteEvent::SectionMounted {
//!     id: SectionId::Hero,
//!     geometry: SectionGeometry::new(0.0, 900.0),
//! });
//! site.handle(SiteEvent::ToggleTheme);
//! assert!(site.runtime().theme().is_dark());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod site;

pub use config::SiteConfig;
pub use site::{Site, SiteError};

pub use app_state::{
    ContactTransport, Effect, SimulatedTransport, SiteEvent, SiteRuntime, SubmissionConfig,
    SubmissionError,
};
pub use app_ui::{
    ContactField, ContactForm, FixedColorScheme, ScrollCommand, ScrollSpyConfig,
    SectionGeometry, SectionId, SubmitStatus, ThemeContext, ThemePreference,
};
pub use storage::KvConfig;

use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-aware fmt subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
