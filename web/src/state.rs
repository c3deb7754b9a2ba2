//! Application state for the gate validation HTTP server.

use matchday_validation::providers::{Clock, CredentialStore};
use matchday_validation::ValidationService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds the validation service behind an `Arc`; cloning is cheap and
/// happens once per request. Request-scoped concerns (sessions, cookies)
/// are resolved by the HTTP layer and never reach the validation service.
pub struct AppState<S, C> {
    /// The credential validation service.
    pub validation: Arc<ValidationService<S, C>>,
}

impl<S, C> AppState<S, C>
where
    S: CredentialStore,
    C: Clock,
{
    /// Create a new application state.
    #[must_use]
    pub fn new(validation: ValidationService<S, C>) -> Self {
        Self {
            validation: Arc::new(validation),
        }
    }
}

// Manual Clone: the derive would demand S: Clone + C: Clone even though
// only the Arc is cloned.
impl<S, C> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            validation: Arc::clone(&self.validation),
        }
    }
}
