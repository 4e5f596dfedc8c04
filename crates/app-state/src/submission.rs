//! Contact form delivery
//!
//! The site has no backend yet, so the default transport waits a fixed delay
//! and reports success. Anything that can deliver a [`ContactForm`] can be
//! plugged in through [`ContactTransport`].

use app_ui::ContactForm;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::runtime::{EventSender, SiteEvent};

/// Delay of the simulated network call
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Submission errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SubmissionError {
    /// The destination refused or could not be reached
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The destination took too long
    #[error("Delivery timed out")]
    Timeout,
}

/// Result type for submission operations
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Submission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// How long the simulated delivery takes
    pub delay: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { delay: DEFAULT_SUBMIT_DELAY }
    }
}

impl SubmissionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simulated delay
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Something that can deliver a contact form
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// Deliver the form
    async fn deliver(&self, form: &ContactForm) -> Result<()>;
}

/// Transport that only waits, standing in for the real network call
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport {
    config: SubmissionConfig,
}

impl SimulatedTransport {
    /// Create a simulated transport
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ContactTransport for SimulatedTransport {
    async fn deliver(&self, form: &ContactForm) -> Result<()> {
        tokio::time::sleep(self.config.delay).await;
        tracing::info!(
            name = %form.name,
            email = %form.email,
            subject = %form.subject,
            "Contact form submitted"
        );
        Ok(())
    }
}

/// Deliver a form and turn the outcome into the event that settles it
pub async fn perform_submission(transport: &dyn ContactTransport, form: ContactForm) -> SiteEvent {
    let outcome = transport.deliver(&form).await;
    if let Err(e) = &outcome {
        tracing::warn!("Contact form delivery failed: {}", e);
    }
    SiteEvent::SubmissionSettled { outcome }
}

/// Deliver on the tokio runtime and queue the outcome
///
/// There is no cancellation. If the site runtime is gone by the time the
/// delivery finishes, the outcome is dropped.
pub fn spawn_submission(
    transport: Arc<dyn ContactTransport>,
    form: ContactForm,
    sender: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = perform_submission(transport.as_ref(), form).await;
        if !sender.send(event) {
            tracing::debug!("Site runtime dropped before submission settled");
        }
    })
}
