//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use crate::handlers::health::{health_check, readiness_check};
use crate::handlers::validate::validate_credential;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use matchday_validation::providers::{Clock, CredentialStore};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures all routes:
/// - Health and readiness probes
/// - The credential validation endpoint under `/api`
///
/// # Arguments
///
/// - `state`: Application state to share with handlers
///
/// # Returns
///
/// Configured Axum router ready to serve requests.
pub fn build_router<S, C>(state: AppState<S, C>) -> Router
where
    S: CredentialStore + 'static,
    C: Clock + 'static,
{
    let api_routes = Router::new().route("/validate", post(validate_credential::<S, C>));

    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // API routes under /api prefix
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
