//! Application state management for the WeLight site
//!
//! This crate provides the single-threaded event queue that drives the page
//! state, and the transport that delivers the contact form.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod runtime;
pub mod submission;

pub use runtime::{Effect, EventSender, SiteEvent, SiteRuntime};
pub use submission::{
    perform_submission, spawn_submission, ContactTransport, SimulatedTransport, SubmissionConfig,
    SubmissionError, DEFAULT_SUBMIT_DELAY,
};
