//! In-page navigation for the WeLight site
//!
//! This module provides:
//! - A section registry mapping each [`SectionId`] to its on-page extent
//! - Scroll-spy detection of the active section
//! - Smooth-scroll navigation to a section
//! - Mobile menu visibility

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sections::{SectionGeometry, SectionId};

/// Look-ahead applied to the scroll position, matching the fixed nav bar
pub const DEFAULT_LOOK_AHEAD: f64 = 100.0;

// =============================================================================
// Section Registry
// =============================================================================

/// Mapping from section id to its current geometry
///
/// Sections register when they mount and deregister when they unmount.
/// Geometry is looked up by id, never through a reference to the element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionRegistry {
    sections: HashMap<SectionId, SectionGeometry>,
}

impl SectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a section's geometry, returning the previous one
    pub fn register(&mut self, id: SectionId, geometry: SectionGeometry) -> Option<SectionGeometry> {
        self.sections.insert(id, geometry)
    }

    /// Remove a section
    pub fn unregister(&mut self, id: SectionId) -> Option<SectionGeometry> {
        self.sections.remove(&id)
    }

    /// Geometry of a registered section
    pub fn get(&self, id: SectionId) -> Option<SectionGeometry> {
        self.sections.get(&id).copied()
    }

    /// Check if a section is registered
    pub fn contains(&self, id: SectionId) -> bool {
        self.sections.contains_key(&id)
    }

    /// Number of registered sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Registered sections in page order
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, SectionGeometry)> + '_ {
        SectionId::all()
            .into_iter()
            .filter_map(|id| self.get(id).map(|geometry| (id, geometry)))
    }
}

// =============================================================================
// Scroll Spy
// =============================================================================

/// Scroll-spy configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpyConfig {
    /// Pixels added to the scroll position before matching
    pub look_ahead: f64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self { look_ahead: DEFAULT_LOOK_AHEAD }
    }
}

impl ScrollSpyConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the look-ahead offset
    pub fn look_ahead(mut self, pixels: f64) -> Self {
        self.look_ahead = pixels;
        self
    }
}

/// Detects which section is in view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSpy {
    config: ScrollSpyConfig,
}

impl ScrollSpy {
    /// Create a scroll spy
    pub fn new(config: ScrollSpyConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ScrollSpyConfig {
        &self.config
    }

    /// Position compared against section extents
    pub fn effective_position(&self, scroll_y: f64) -> f64 {
        scroll_y + self.config.look_ahead
    }

    /// First registered section, in page order, containing the effective
    /// position
    ///
    /// A linear scan; the page has six sections at most.
    pub fn detect(&self, registry: &SectionRegistry, scroll_y: f64) -> Option<SectionId> {
        let position = self.effective_position(scroll_y);
        registry
            .iter()
            .find(|(_, geometry)| geometry.contains(position))
            .map(|(id, _)| id)
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// How the viewport should move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll
    #[default]
    Smooth,
    /// Jump
    Instant,
}

/// Request to move the viewport so a section's top meets the viewport top
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollCommand {
    /// Section being scrolled to
    pub target: SectionId,
    /// Document offset to scroll to
    pub top: f64,
    /// Scroll behavior
    pub behavior: ScrollBehavior,
}

/// Highlight and menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Section highlighted in the navigation
    pub active_section: SectionId,
    /// Whether the mobile menu is open
    pub mobile_menu_open: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self { active_section: SectionId::default(), mobile_menu_open: false }
    }
}

impl NavigationState {
    /// Create the initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a section is highlighted
    pub fn is_active(&self, id: SectionId) -> bool {
        self.active_section == id
    }

    /// Open or close the mobile menu, returning the new visibility
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }

    /// Close the mobile menu (returns true if it was open)
    pub fn close_mobile_menu(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_menu_open, false)
    }

    /// Handle a pointer press anywhere on the page
    ///
    /// A press outside an open menu closes it. Returns true if the menu
    /// closed.
    pub fn on_pointer_down(&mut self, inside_menu: bool) -> bool {
        if inside_menu {
            return false;
        }
        self.close_mobile_menu()
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Ties the registry, the scroll spy and the navigation state together
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    registry: SectionRegistry,
    spy: ScrollSpy,
    state: NavigationState,
}

impl Navigator {
    /// Create a navigator with no sections registered
    pub fn new(config: ScrollSpyConfig) -> Self {
        Self {
            registry: SectionRegistry::new(),
            spy: ScrollSpy::new(config),
            state: NavigationState::new(),
        }
    }

    /// Current navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Registered sections
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Highlighted section
    pub fn active_section(&self) -> SectionId {
        self.state.active_section
    }

    /// Section mounted or resized
    pub fn register(&mut self, id: SectionId, geometry: SectionGeometry) {
        if self.registry.register(id, geometry).is_some() {
            tracing::debug!(section = %id, "section geometry replaced");
        }
    }

    /// Section unmounted
    ///
    /// If it was the highlighted one the highlight returns to the default.
    pub fn unregister(&mut self, id: SectionId) {
        self.registry.unregister(id);
        if self.state.active_section == id {
            self.state.active_section = SectionId::default();
        }
    }

    /// Recompute the active section for an absolute scroll position
    ///
    /// When nothing matches the previous section stays active. Returns true
    /// if the highlight moved.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        match self.spy.detect(&self.registry, scroll_y) {
            Some(id) if id != self.state.active_section => {
                tracing::debug!(section = %id, scroll_y, "active section changed");
                self.state.active_section = id;
                true
            }
            _ => false,
        }
    }

    /// Scroll a section into view and close the mobile menu
    ///
    /// Unregistered sections are ignored.
    pub fn go_to(&mut self, id: SectionId) -> Option<ScrollCommand> {
        let geometry = self.registry.get(id)?;
        self.state.close_mobile_menu();
        Some(ScrollCommand { target: id, top: geometry.top, behavior: ScrollBehavior::Smooth })
    }

    /// Like [`Navigator::go_to`] but from an anchor string
    pub fn go_to_anchor(&mut self, anchor: &str) -> Option<ScrollCommand> {
        let id = anchor.parse::<SectionId>().ok()?;
        self.go_to(id)
    }

    /// Open or close the mobile menu
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.state.toggle_mobile_menu()
    }

    /// Pointer press anywhere on the page
    pub fn on_pointer_down(&mut self, inside_menu: bool) -> bool {
        self.state.on_pointer_down(inside_menu)
    }
}
