//! User interface state for the WeLight site
//!
//! This crate holds everything the page keeps between events, with no
//! rendering code: a rendering layer reads these types and feeds events in.
//!
//! # Modules
//!
//! - [`theme`] - Theme store, OS color-scheme probe, theme context
//! - [`sections`] - Section ids, geometry, navigation metadata
//! - [`navigation`] - Section registry, scroll spy, navigator, mobile menu
//! - [`contact`] - Contact form validation and submit state machine
//! - [`accordion`] - Single-open accordion for the tracker and phases
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::Navigator;
//! use app_ui::sections::{SectionGeometry, SectionId};
//!
//! let mut nav = Navigator::default();
//! nav.register(SectionId::Hero, SectionGeometry::new(0.0, 800.0));
//! nav.register(SectionId::Team, SectionGeometry::new(800.0, 900.0));
//!
//! nav.on_scroll(750.0);
//! assert_eq!(nav.active_section(), SectionId::Team);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accordion;
pub mod contact;
pub mod navigation;
pub mod sections;
pub mod theme;

// Re-export commonly used types
pub use theme::{ColorSchemeProbe, FixedColorScheme, ThemeContext, ThemePreference, ThemeStore};

pub use sections::{footer_links, hero_targets, nav_items, NavItem, SectionGeometry, SectionId};

pub use navigation::{
    NavigationState, Navigator, ScrollBehavior, ScrollCommand, ScrollSpy, ScrollSpyConfig,
    SectionRegistry, DEFAULT_LOOK_AHEAD,
};

pub use contact::{
    validate, ContactField, ContactForm, ContactFormState, FieldError, FormErrors,
    SubmitRejected, SubmitStatus,
};

pub use accordion::Accordion;
