//! Page sections and their navigation metadata

use serde::{Deserialize, Serialize};

/// The navigable sections of the page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    /// Hero banner
    #[default]
    Hero,
    /// Team bios
    Team,
    /// Project description
    Project,
    /// Weekly progress tracker
    Tracking,
    /// Budget table
    Budget,
    /// Contact form
    Contact,
}

impl SectionId {
    /// In-page anchor (`#hero`, `#team`, ...) without the hash
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Team => "team",
            SectionId::Project => "project",
            SectionId::Tracking => "tracking",
            SectionId::Budget => "budget",
            SectionId::Contact => "contact",
        }
    }

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Inicio",
            SectionId::Team => "Equipo",
            SectionId::Project => "Proyecto",
            SectionId::Tracking => "Seguimiento",
            SectionId::Budget => "Presupuesto",
            SectionId::Contact => "Contacto",
        }
    }

    /// Icon name for navigation
    pub fn icon(&self) -> &'static str {
        match self {
            SectionId::Hero => "rocket",
            SectionId::Team => "users",
            SectionId::Project => "lightbulb",
            SectionId::Tracking => "calendar-week",
            SectionId::Budget => "money-bill-wave",
            SectionId::Contact => "file-alt",
        }
    }

    /// Get all sections in page order
    pub fn all() -> [SectionId; 6] {
        [
            SectionId::Hero,
            SectionId::Team,
            SectionId::Project,
            SectionId::Tracking,
            SectionId::Budget,
            SectionId::Contact,
        ]
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.anchor())
    }
}

impl std::str::FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchor = s.strip_prefix('#').unwrap_or(s);
        SectionId::all()
            .into_iter()
            .find(|id| id.anchor() == anchor)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// Vertical extent of a section on the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Distance from the top of the document
    pub top: f64,
    /// Rendered height
    pub height: f64,
}

impl SectionGeometry {
    /// Create geometry from an offset and a height
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// First position past the section
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `position` falls in `[top, top + height)`
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.bottom()
    }
}

/// One entry of a navigation bar or link list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Target section
    pub id: SectionId,
    /// Visible label
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
}

impl From<SectionId> for NavItem {
    fn from(id: SectionId) -> Self {
        Self { id, label: id.label(), icon: id.icon() }
    }
}

/// Items of the desktop bar and the mobile menu
pub fn nav_items() -> Vec<NavItem> {
    SectionId::all().into_iter().map(NavItem::from).collect()
}

/// Quick links shown in the footer
pub fn footer_links() -> Vec<NavItem> {
    SectionId::all()
        .into_iter()
        .filter(|id| *id != SectionId::Hero)
        .map(NavItem::from)
        .collect()
}

/// Targets of the hero banner's buttons: the two calls to action and the
/// scroll-down arrow
pub fn hero_targets() -> [SectionId; 3] {
    [SectionId::Project, SectionId::Tracking, SectionId::Team]
}
