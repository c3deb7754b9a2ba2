//! # Matchday Gate Validation
//!
//! Credential validation for the Matchday sports-club platform: given a
//! scanned code from a gate scanner, decide whether it refers to a valid,
//! unused ticket or an active subscription.
//!
//! ## Credential encodings
//!
//! Two encodings arrive at the gate:
//!
//! - **Enhanced**: a self-describing payload with a `kind` discriminator and
//!   redundant holder fields, cross-checked against the stored record to
//!   detect tampering or stale codes.
//! - **Legacy**: a bare entity id with no type information. Tickets are
//!   tried first; only a clean "no such ticket" falls through to the
//!   subscription lookup.
//!
//! ## Architecture
//!
//! The service depends on two injected seams:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ ValidationService            │
//! │  - payload parsing           │
//! │  - gate sequence             │
//! ├──────────────┬───────────────┤
//! │ CredentialStore │   Clock    │  ← traits (DI)
//! ├──────────────┴───────────────┤
//! │ PostgresCredentialStore      │  ← production ("postgres" feature)
//! │ MockCredentialStore          │  ← tests ("test-utils" feature)
//! └──────────────────────────────┘
//! ```
//!
//! Tickets are consumed exactly once: the validated flag is flipped with an
//! atomic conditional update, so two scanners racing on the same ticket
//! cannot both succeed. Subscriptions are never mutated and validate any
//! number of times inside their window.
//!
//! ## Example
//!
//! ```rust,ignore
//! use matchday_validation::{ValidationService, SystemClock};
//! use matchday_validation::stores::postgres::PostgresCredentialStore;
//!
//! let store = PostgresCredentialStore::new(pool);
//! let service = ValidationService::new(store, SystemClock);
//!
//! match service.validate(scanned).await {
//!     Ok(credential) => println!("admit: {credential:?}"),
//!     Err(reason) => println!("reject: {reason}"),
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

// Public modules
pub mod error;
pub mod payload;
pub mod providers;
pub mod service;
pub mod stores;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use error::{Result, ValidationError};
pub use payload::ScannedPayload;
pub use providers::{Clock, CredentialStore, SystemClock};
pub use service::ValidationService;
pub use types::{
    CredentialEncoding, FixtureId, SubscriptionId, TicketId, ValidatedCredential,
};
