//! Credential repository trait.

use crate::error::Result;
use crate::types::{Subscription, SubscriptionId, Ticket, TicketId};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Credential repository.
///
/// This trait abstracts over the persistence store that owns tickets and
/// subscriptions. The validation service only ever reads credentials and
/// flips the single validated flag; creation and deletion belong to the
/// purchase flow.
pub trait CredentialStore: Send + Sync {
    /// Get a ticket by id, joined with its fixture and pricing tier.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ticket not found → `ValidationError::TicketNotFound`
    /// - Database query fails → `ValidationError::Database`
    fn find_ticket_by_id(
        &self,
        ticket_id: &TicketId,
    ) -> impl Future<Output = Result<Ticket>> + Send;

    /// Atomically mark a ticket validated, stamping `validated_at`.
    ///
    /// The update is conditional on the ticket being unvalidated
    /// (compare-and-swap). Two scanners racing on the same ticket must not
    /// both succeed.
    ///
    /// # Returns
    ///
    /// `true` if this call consumed the ticket; `false` if the ticket was
    /// already validated when the write landed.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ticket not found → `ValidationError::TicketNotFound`
    /// - The write fails → `ValidationError::WriteFailed`
    fn mark_ticket_validated(
        &self,
        ticket_id: &TicketId,
        validated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Get a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Subscription not found → `ValidationError::SubscriptionNotFound`
    /// - Database query fails → `ValidationError::Database`
    fn find_subscription_by_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> impl Future<Output = Result<Subscription>> + Send;
}
