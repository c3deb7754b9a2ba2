//! Error types for credential validation.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Error taxonomy for gate credential validation.
///
/// Every rejection a scanner can produce is a variant here; validation never
/// reports failure by panicking or by leaking a raw storage error. Variants
/// are organized by category so the HTTP layer can map them onto its status
/// taxonomy (bad request / not found / server error).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // ═══════════════════════════════════════════════════════════
    // Input Errors
    // ═══════════════════════════════════════════════════════════

    /// Scanned input was empty or whitespace-only. No lookup is attempted.
    #[error("Scanned code is empty")]
    InvalidInput,

    // ═══════════════════════════════════════════════════════════
    // Not-Found Errors
    // ═══════════════════════════════════════════════════════════

    /// No ticket exists with the given id.
    #[error("Ticket not found")]
    TicketNotFound,

    /// No subscription exists with the given id.
    #[error("Subscription not found")]
    SubscriptionNotFound,

    /// A legacy id matched neither a ticket nor a subscription.
    #[error("No ticket or subscription matches the scanned code")]
    CredentialNotFound,

    // ═══════════════════════════════════════════════════════════
    // Business-Rule Violations
    // ═══════════════════════════════════════════════════════════

    /// A field embedded in the scanned payload does not match the stored
    /// record. The payload is stale or has been tampered with.
    #[error("Scanned {field} does not match the stored record")]
    DataMismatch {
        /// Which embedded field failed the cross-check.
        field: &'static str,
    },

    /// The ticket was already consumed at an earlier scan.
    #[error("Ticket has already been validated")]
    AlreadyValidated {
        /// When the earlier validation happened, if known.
        validated_at: Option<DateTime<Utc>>,
    },

    /// The ticket's fixture took place before today.
    #[error("Fixture took place on {date}")]
    FixtureExpired {
        /// Calendar date of the fixture.
        date: NaiveDate,
    },

    /// The subscription's validity window has not opened yet.
    #[error("Subscription is not active until {valid_from}")]
    SubscriptionNotYetActive {
        /// Start of the validity window.
        valid_from: DateTime<Utc>,
    },

    /// The subscription's validity window has closed.
    #[error("Subscription expired on {valid_to}")]
    SubscriptionExpired {
        /// End of the validity window.
        valid_to: DateTime<Utc>,
    },

    // ═══════════════════════════════════════════════════════════
    // Infrastructure Errors
    // ═══════════════════════════════════════════════════════════

    /// The validated-flag write failed. The ticket was NOT consumed.
    #[error("Failed to record validation: {0}")]
    WriteFailed(String),

    /// A storage operation failed for reasons unrelated to the credential.
    #[error("Database error: {0}")]
    Database(String),
}

impl ValidationError {
    /// Returns `true` for the "no such id" outcomes that drive the
    /// ticket → subscription fallthrough in the legacy path.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound | Self::SubscriptionNotFound | Self::CredentialNotFound
        )
    }

    /// Returns `true` if this is an expected outcome of normal gate
    /// operation (a scanner routinely sees used tickets and expired
    /// subscriptions). These are reported to the operator, never alerted on.
    pub const fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::DataMismatch { .. }
                | Self::AlreadyValidated { .. }
                | Self::FixtureExpired { .. }
                | Self::SubscriptionNotYetActive { .. }
                | Self::SubscriptionExpired { .. }
        )
    }

    /// Returns `true` if this is an infrastructure fault that should be
    /// logged with full context for investigation.
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::WriteFailed(_) | Self::Database(_))
    }
}
