//! Single-threaded update queue for the site
//!
//! Every external event (scroll, click, keystroke, timer) becomes a
//! [`SiteEvent`]. Events are applied one at a time, in arrival order, either
//! directly through [`SiteRuntime::dispatch`] or by queueing them through an
//! [`EventSender`] and draining with [`SiteRuntime::run_pending`]. Applying an
//! event returns the [`Effect`]s the host has to carry out.

use app_ui::{
    Accordion, ContactField, ContactForm, ContactFormState, NavigationState, Navigator,
    ScrollCommand, ScrollSpyConfig, SectionGeometry, SectionId, SubmitRejected, ThemeContext,
    ThemeStore,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::submission::SubmissionError;

// =============================================================================
// Events and Effects
// =============================================================================

/// Something that happened outside the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SiteEvent {
    /// A section mounted or was laid out again
    SectionMounted {
        /// Section id
        id: SectionId,
        /// Its current extent
        geometry: SectionGeometry,
    },
    /// A section unmounted
    SectionUnmounted {
        /// Section id
        id: SectionId,
    },
    /// The window scrolled
    Scrolled {
        /// Absolute vertical scroll offset
        scroll_y: f64,
    },
    /// A navigation link was clicked
    NavigateTo {
        /// Target section
        id: SectionId,
    },
    /// The hamburger button was clicked
    ToggleMobileMenu,
    /// A pointer was pressed somewhere on the page
    PointerDown {
        /// Whether the press landed inside the mobile menu
        inside_menu: bool,
    },
    /// The theme button was clicked
    ToggleTheme,
    /// A week card in the tracker was clicked
    ToggleWeek {
        /// Week number
        week: u32,
    },
    /// A phase card was clicked
    TogglePhase {
        /// Phase number
        phase: u32,
    },
    /// The visitor typed into a contact field
    FieldEdited {
        /// Field
        field: ContactField,
        /// New value
        value: String,
    },
    /// The contact form was submitted
    SubmitRequested,
    /// The in-flight delivery finished
    SubmissionSettled {
        /// Delivery outcome
        outcome: Result<(), SubmissionError>,
    },
}

/// Work the host must perform after an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Move the viewport
    ScrollTo(ScrollCommand),
    /// Re-render with a new theme
    ApplyTheme(ThemeContext),
    /// Deliver this form, then send back `SubmissionSettled`
    BeginSubmission(ContactForm),
}

// =============================================================================
// Event Sender
// =============================================================================

/// Queues events for a [`SiteRuntime`]
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SiteEvent>,
}

impl EventSender {
    /// Queue an event (returns false if the runtime is gone)
    pub fn send(&self, event: SiteEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

// =============================================================================
// Runtime
// =============================================================================

/// Owns all page state and applies events to it in order
#[derive(Debug)]
pub struct SiteRuntime {
    theme: ThemeStore,
    navigator: Navigator,
    contact: ContactFormState,
    weeks: Accordion<u32>,
    phases: Accordion<u32>,
    tx: mpsc::UnboundedSender<SiteEvent>,
    rx: mpsc::UnboundedReceiver<SiteEvent>,
}

impl SiteRuntime {
    /// Create a runtime around a resolved theme store
    pub fn new(theme: ThemeStore, scroll_spy: ScrollSpyConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            theme,
            navigator: Navigator::new(scroll_spy),
            contact: ContactFormState::new(),
            weeks: Accordion::new(),
            phases: Accordion::new(),
            tx,
            rx,
        }
    }

    /// Handle for queueing events from callbacks
    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    /// Theme to render with
    pub fn theme(&self) -> ThemeContext {
        self.theme.context()
    }

    /// Highlight and menu state
    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    /// Navigator, including the section registry
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Contact form state
    pub fn contact(&self) -> &ContactFormState {
        &self.contact
    }

    /// Expanded week in the tracker
    pub fn tracking_weeks(&self) -> &Accordion<u32> {
        &self.weeks
    }

    /// Expanded project phase
    pub fn project_phases(&self) -> &Accordion<u32> {
        &self.phases
    }

    /// Apply every queued event in arrival order
    pub fn run_pending(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            effects.extend(self.dispatch(event));
        }
        effects
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: SiteEvent) -> Vec<Effect> {
        match event {
            SiteEvent::SectionMounted { id, geometry } => {
                self.navigator.register(id, geometry);
                Vec::new()
            }
            SiteEvent::SectionUnmounted { id } => {
                self.navigator.unregister(id);
                Vec::new()
            }
            SiteEvent::Scrolled { scroll_y } => {
                self.navigator.on_scroll(scroll_y);
                Vec::new()
            }
            SiteEvent::NavigateTo { id } => {
                self.navigator.go_to(id).map(Effect::ScrollTo).into_iter().collect()
            }
            SiteEvent::ToggleMobileMenu => {
                self.navigator.toggle_mobile_menu();
                Vec::new()
            }
            SiteEvent::PointerDown { inside_menu } => {
                self.navigator.on_pointer_down(inside_menu);
                Vec::new()
            }
            SiteEvent::ToggleTheme => vec![Effect::ApplyTheme(self.theme.toggle())],
            SiteEvent::ToggleWeek { week } => {
                self.weeks.toggle(week);
                Vec::new()
            }
            SiteEvent::TogglePhase { phase } => {
                self.phases.toggle(phase);
                Vec::new()
            }
            SiteEvent::FieldEdited { field, value } => {
                self.contact.edit(field, value);
                Vec::new()
            }
            SiteEvent::SubmitRequested => match self.contact.begin_submit() {
                Ok(form) => {
                    tracing::info!("Submitting contact form");
                    vec![Effect::BeginSubmission(form)]
                }
                Err(SubmitRejected::InFlight) => {
                    tracing::debug!("Ignoring submit while a submission is in flight");
                    Vec::new()
                }
                Err(SubmitRejected::Invalid(_)) => Vec::new(),
            },
            SiteEvent::SubmissionSettled { outcome } => {
                match outcome {
                    Ok(()) => self.contact.complete(),
                    Err(_) => self.contact.fail(),
                }
                Vec::new()
            }
        }
    }

    /// Convenience for a mount event built from parts
    pub fn mount(&mut self, id: SectionId, top: f64, height: f64) {
        self.dispatch(SiteEvent::SectionMounted { id, geometry: SectionGeometry::new(top, height) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::{FixedColorScheme, ScrollBehavior, SubmitStatus, ThemePreference};
    use std::sync::Arc;
    use storage::{MemoryPreferences, PreferenceStore};

    fn runtime_with(prefs: Arc<MemoryPreferences>) -> SiteRuntime {
        let theme = ThemeStore::initial(prefs, &FixedColorScheme::light());
        let mut runtime = SiteRuntime::new(theme, ScrollSpyConfig::default());
        for (i, id) in SectionId::all().into_iter().enumerate() {
            runtime.mount(id, i as f64 * 1000.0, 1000.0);
        }
        runtime
    }

    fn runtime() -> SiteRuntime {
        runtime_with(Arc::new(MemoryPreferences::new()))
    }

    fn fill(runtime: &mut SiteRuntime, name: &str, email: &str, subject: &str, message: &str) {
        for (field, value) in [
            (ContactField::Name, name),
            (ContactField::Email, email),
            (ContactField::Subject, subject),
            (ContactField::Message, message),
        ] {
            runtime.dispatch(SiteEvent::FieldEdited { field, value: value.to_string() });
        }
    }

    #[test]
    fn test_scroll_updates_active_section() {
        let mut runtime = runtime();
        runtime.dispatch(SiteEvent::Scrolled { scroll_y: 2950.0 });
        assert_eq!(runtime.navigation().active_section, SectionId::Tracking);
    }

    #[test]
    fn test_navigate_emits_smooth_scroll_and_closes_menu() {
        let mut runtime = runtime();
        runtime.dispatch(SiteEvent::ToggleMobileMenu);
        assert!(runtime.navigation().mobile_menu_open);

        let effects = runtime.dispatch(SiteEvent::NavigateTo { id: SectionId::Budget });
        assert_eq!(
            effects,
            vec![Effect::ScrollTo(ScrollCommand {
                target: SectionId::Budget,
                top: 4000.0,
                behavior: ScrollBehavior::Smooth,
            })]
        );
        assert!(!runtime.navigation().mobile_menu_open);
    }

    #[test]
    fn test_navigate_to_unmounted_section_is_noop() {
        let mut runtime = runtime();
        runtime.dispatch(SiteEvent::SectionUnmounted { id: SectionId::Contact });
        let effects = runtime.dispatch(SiteEvent::NavigateTo { id: SectionId::Contact });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_pointer_down_outside_closes_menu() {
        let mut runtime = runtime();
        runtime.dispatch(SiteEvent::PointerDown { inside_menu: false });
        assert!(!runtime.navigation().mobile_menu_open);

        runtime.dispatch(SiteEvent::ToggleMobileMenu);
        runtime.dispatch(SiteEvent::PointerDown { inside_menu: true });
        assert!(runtime.navigation().mobile_menu_open);
        runtime.dispatch(SiteEvent::PointerDown { inside_menu: false });
        assert!(!runtime.navigation().mobile_menu_open);
    }

    #[test]
    fn test_toggle_theme_emits_context_and_persists() {
        let prefs = Arc::new(MemoryPreferences::new());
        let mut runtime = runtime_with(prefs.clone());

        let effects = runtime.dispatch(SiteEvent::ToggleTheme);
        assert_eq!(effects, vec![Effect::ApplyTheme(ThemeContext::new(ThemePreference::Dark))]);
        assert_eq!(prefs.load_theme().unwrap(), Some(ThemePreference::Dark));

        runtime.dispatch(SiteEvent::ToggleTheme);
        assert_eq!(runtime.theme().preference, ThemePreference::Light);
        assert_eq!(prefs.load_theme().unwrap(), Some(ThemePreference::Light));
    }

    #[test]
    fn test_accordions_are_independent() {
        let mut runtime = runtime();
        runtime.dispatch(SiteEvent::ToggleWeek { week: 2 });
        runtime.dispatch(SiteEvent::TogglePhase { phase: 1 });

        assert!(runtime.tracking_weeks().is_expanded(&2));
        assert!(runtime.project_phases().is_expanded(&1));

        runtime.dispatch(SiteEvent::ToggleWeek { week: 2 });
        assert_eq!(runtime.tracking_weeks().expanded(), None);
        assert!(runtime.project_phases().is_expanded(&1));
    }

    #[test]
    fn test_invalid_submit_emits_nothing() {
        let mut runtime = runtime();
        fill(&mut runtime, "", "a@b.com", "x", "short");

        let effects = runtime.dispatch(SiteEvent::SubmitRequested);
        assert!(effects.is_empty());
        assert_eq!(runtime.contact().status(), SubmitStatus::Idle);
        assert!(runtime.contact().errors().has(ContactField::Name));
        assert!(runtime.contact().errors().has(ContactField::Message));
    }

    #[test]
    fn test_valid_submit_cycle() {
        let mut runtime = runtime();
        fill(&mut runtime, "Ana", "ana@x.com", "Hi", "This is long enough.");

        let effects = runtime.dispatch(SiteEvent::SubmitRequested);
        assert!(matches!(effects.as_slice(), [Effect::BeginSubmission(form)] if form.name == "Ana"));
        assert_eq!(runtime.contact().status(), SubmitStatus::Submitting);

        // Second click while in flight
        assert!(runtime.dispatch(SiteEvent::SubmitRequested).is_empty());

        runtime.dispatch(SiteEvent::SubmissionSettled { outcome: Ok(()) });
        assert_eq!(runtime.contact().status(), SubmitStatus::Success);
        assert_eq!(runtime.contact().form(), &ContactForm::default());
    }

    #[test]
    fn test_failed_submission_then_edit_returns_to_idle() {
        let mut runtime = runtime();
        fill(&mut runtime, "Ana", "ana@x.com", "Hi", "This is long enough.");
        runtime.dispatch(SiteEvent::SubmitRequested);
        runtime.dispatch(SiteEvent::SubmissionSettled { outcome: Err(SubmissionError::Timeout) });
        assert_eq!(runtime.contact().status(), SubmitStatus::Error);

        runtime.dispatch(SiteEvent::FieldEdited {
            field: ContactField::Subject,
            value: "Hola".to_string(),
        });
        assert_eq!(runtime.contact().status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_queued_events_apply_in_order() {
        let mut runtime = runtime();
        let sender = runtime.sender();

        assert!(sender.send(SiteEvent::Scrolled { scroll_y: 1950.0 }));
        assert!(sender.send(SiteEvent::ToggleMobileMenu));
        assert!(sender.send(SiteEvent::NavigateTo { id: SectionId::Team }));
        assert!(sender.send(SiteEvent::Scrolled { scroll_y: 950.0 }));

        let effects = runtime.run_pending();
        assert_eq!(effects.len(), 1);
        assert_eq!(runtime.navigation().active_section, SectionId::Team);
        assert!(!runtime.navigation().mobile_menu_open);

        assert!(runtime.run_pending().is_empty());
    }

    #[test]
    fn test_event_from_json() {
        let event: SiteEvent =
            serde_json::from_str(r#"{"type":"navigate_to","id":"contact"}"#).unwrap();
        assert_eq!(event, SiteEvent::NavigateTo { id: SectionId::Contact });

        let event: SiteEvent = serde_json::from_str(
            r#"{"type":"section_mounted","id":"team","geometry":{"top":800.0,"height":600.0}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            SiteEvent::SectionMounted {
                id: SectionId::Team,
                geometry: SectionGeometry::new(800.0, 600.0)
            }
        );
    }

    #[test]
    fn test_effect_to_json() {
        let effect = Effect::ApplyTheme(ThemeContext::new(ThemePreference::Dark));
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["type"], "apply_theme");
        assert_eq!(json["preference"], "dark");
    }
}
