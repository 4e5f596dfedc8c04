//! The site core wired together
//!
//! [`Site`] opens the preference store, resolves the theme, and owns the
//! [`SiteRuntime`]. Submissions requested by events are started on the
//! tokio runtime and settle back through the event queue. Without a running
//! tokio runtime a submission fails at once and the form shows its error
//! banner.

use app_state::{
    spawn_submission, ContactTransport, Effect, SimulatedTransport, SiteEvent, SiteRuntime,
    SubmissionError,
};
use app_ui::{ColorSchemeProbe, ThemeStore};
use std::sync::Arc;
use storage::{KvError, KvStore, MemoryPreferences, PreferenceStore};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::SiteConfig;

/// Site errors
#[derive(Debug, Error)]
pub enum SiteError {
    /// The preference store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// Page state plus the collaborators it needs
pub struct Site {
    runtime: SiteRuntime,
    transport: Arc<dyn ContactTransport>,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site").field("runtime", &self.runtime).finish_non_exhaustive()
    }
}

impl Site {
    /// Open the site, falling back to in-memory preferences if the store
    /// cannot be opened
    pub fn open(config: SiteConfig, probe: &dyn ColorSchemeProbe) -> Self {
        let store: Arc<dyn PreferenceStore> = match KvStore::new(config.storage.clone()) {
            Ok(kv) => Arc::new(kv),
            Err(e) => {
                tracing::warn!("Falling back to in-memory preferences: {}", e);
                Arc::new(MemoryPreferences::new())
            }
        };
        Self::with_store(store, config, probe)
    }

    /// Open the site, failing if the store cannot be opened
    pub fn try_open(config: SiteConfig, probe: &dyn ColorSchemeProbe) -> Result<Self> {
        let kv = KvStore::new(config.storage.clone())?;
        Ok(Self::with_store(Arc::new(kv), config, probe))
    }

    /// Build the site around an existing preference store
    pub fn with_store(
        store: Arc<dyn PreferenceStore>,
        config: SiteConfig,
        probe: &dyn ColorSchemeProbe,
    ) -> Self {
        let theme = ThemeStore::initial(store, probe);
        tracing::info!(theme = %theme.current(), "site core started");
        Self {
            runtime: SiteRuntime::new(theme, config.scroll_spy),
            transport: Arc::new(SimulatedTransport::new(config.submission)),
            in_flight: None,
        }
    }

    /// Replace the contact transport
    pub fn with_transport(mut self, transport: Arc<dyn ContactTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Page state
    pub fn runtime(&self) -> &SiteRuntime {
        &self.runtime
    }

    /// Apply an event
    ///
    /// Submissions are started here; the remaining effects are returned for
    /// the host.
    pub fn handle(&mut self, event: SiteEvent) -> Vec<Effect> {
        let effects = self.runtime.dispatch(event);
        self.start_submissions(effects)
    }

    /// Apply every queued event, including settled submissions
    pub fn run_pending(&mut self) -> Vec<Effect> {
        let effects = self.runtime.run_pending();
        self.start_submissions(effects)
    }

    /// Wait for the in-flight submission, if any, and apply its outcome
    pub async fn settle(&mut self) -> Vec<Effect> {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Submission task ended abnormally: {}", e);
            }
        }
        self.run_pending()
    }

    fn start_submissions(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        effects
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::BeginSubmission(form) => {
                    if tokio::runtime::Handle::try_current().is_ok() {
                        self.in_flight = Some(spawn_submission(
                            Arc::clone(&self.transport),
                            form,
                            self.runtime.sender(),
                        ));
                    } else {
                        tracing::warn!("No tokio runtime, failing contact submission");
                        self.runtime.dispatch(SiteEvent::SubmissionSettled {
                            outcome: Err(SubmissionError::Delivery(
                                "no async runtime available".to_string(),
                            )),
                        });
                    }
                    None
                }
                other => Some(other),
            })
            .collect()
    }
}
