//! Per-session browser state over an endpoint's model catalog.

use crate::{
    errors::{Error, Result},
    types::ModelDescriptor,
    validate::{validate, ModelClient, ValidationOutcome},
};

/// Fallback message when a failed refresh carried no message of its own.
const GENERIC_FETCH_ERROR: &str = "Failed to fetch models";

/// Where a session's last refresh stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserStatus {
    /// No refresh attempted yet. Only reachable as the initial state.
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// State container for one browsing session.
///
/// Owned by whichever session/request context the host maintains; not
/// designed for concurrent mutation, so hosts parallelizing across sessions
/// give each its own instance. Mutated only through [`begin_refresh`] and
/// [`complete_refresh`]; every reachable state is well formed:
/// `Success` implies no error message, `Error` implies an empty model list
/// and a message set.
///
/// [`begin_refresh`]: BrowserState::begin_refresh
/// [`complete_refresh`]: BrowserState::complete_refresh
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    current_url: Option<String>,
    models: Vec<ModelDescriptor>,
    status: BrowserStatus,
    error_message: Option<String>,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BrowserStatus {
        self.status
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == BrowserStatus::Loading
    }

    /// Mark a refresh against `url` as in flight.
    ///
    /// Clears the previous catalog and error message so a concurrent caller
    /// observing `Loading` sees no stale data. No network traffic happens
    /// here; the caller runs [`validate`] and feeds the outcome to
    /// [`complete_refresh`](Self::complete_refresh).
    pub fn begin_refresh(&mut self, url: impl Into<String>) {
        self.current_url = Some(url.into());
        self.status = BrowserStatus::Loading;
        self.models.clear();
        self.error_message = None;
    }

    /// Record the outcome of the refresh started by `begin_refresh`.
    ///
    /// Never fails. A `Success` with an empty catalog (which [`validate`]
    /// does not produce, but an alternate outcome source might) lands in
    /// the `Error` state like any failure.
    pub fn complete_refresh(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Success(models) if !models.is_empty() => {
                self.status = BrowserStatus::Success;
                self.models = models;
                self.error_message = None;
            }
            ValidationOutcome::Success(_) => {
                self.status = BrowserStatus::Error;
                self.models.clear();
                self.error_message = Some(GENERIC_FETCH_ERROR.to_string());
            }
            ValidationOutcome::Failure { message, .. } => {
                self.status = BrowserStatus::Error;
                self.models.clear();
                self.error_message = Some(if message.trim().is_empty() {
                    GENERIC_FETCH_ERROR.to_string()
                } else {
                    message
                });
            }
        }
    }

    /// The LLM subset of the current catalog, in original order.
    pub fn llm_models(&self) -> Vec<&ModelDescriptor> {
        self.models.iter().filter(|m| m.is_llm()).collect()
    }

    /// Linear lookup by identifier among the current catalog.
    pub fn find_by_identifier(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.identifier == id)
    }

    /// Drive a whole refresh cycle: begin, validate, complete.
    ///
    /// Rejects re-entry while a refresh is already in flight, mirroring the
    /// loading guard a UI keeps around its fetch trigger.
    pub async fn refresh<C, F>(&mut self, url: impl Into<String>, client_factory: F) -> Result<()>
    where
        C: ModelClient,
        F: FnOnce(&str) -> Result<C>,
    {
        if self.is_loading() {
            return Err(Error::Config("refresh already in flight".into()));
        }
        let url = url.into();
        self.begin_refresh(url.clone());
        let outcome = validate(&url, client_factory).await;
        self.complete_refresh(outcome);
        Ok(())
    }
}
