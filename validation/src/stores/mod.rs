//! Credential store implementations.

// PostgreSQL store requires the "postgres" feature
#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresCredentialStore;
