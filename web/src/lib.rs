//! HTTP surface for the Matchday gate validation service.
//!
//! A thin Axum shell over [`matchday_validation::ValidationService`]:
//! request parsing, response serialization, and the mapping from the
//! validation error taxonomy onto HTTP status codes. No business rule
//! lives in this crate.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at the Axum handler
//! 2. **Extract** the scanned code from the JSON body
//! 3. **Dispatch** to the validation service
//! 4. **Map result** to an HTTP response
//!
//! # Status taxonomy
//!
//! - `400`: malformed input, cross-check mismatches, and the expected
//!   business-rule rejections (used ticket, expired fixture, closed window)
//! - `404`: no credential matches the scanned id
//! - `500`: storage faults
//!
//! Success bodies are `{ "success": true, "message", "data": { … } }`;
//! failure bodies are `{ "error", "details" }`.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
