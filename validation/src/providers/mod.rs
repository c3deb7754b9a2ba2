//! Validation providers.
//!
//! This module defines traits for the external dependencies of the
//! validation service. These traits enable dependency injection and make
//! the gate logic testable.
//!
//! Providers are **interfaces**, not implementations. The service depends
//! on these traits; the server binary wires in concrete implementations.
//!
//! This enables:
//! - **Testing**: use mocks (in-memory, deterministic)
//! - **Production**: use the PostgreSQL store and the system clock
//! - **Determinism**: the clock seam pins "today" and "now" in tests

pub mod clock;
pub mod store;

// Re-export provider traits
pub use clock::{Clock, SystemClock};
pub use store::CredentialStore;
