//! Mock credential store for testing.

use crate::error::{Result, ValidationError};
use crate::providers::CredentialStore;
use crate::types::{Subscription, SubscriptionId, Ticket, TicketId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock credential store.
///
/// Uses in-memory storage for testing, with failure injection so the
/// infrastructure-fault paths are reachable without a database.
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStore {
    tickets: Arc<Mutex<HashMap<TicketId, Ticket>>>,
    subscriptions: Arc<Mutex<HashMap<SubscriptionId, Subscription>>>,
    fail_lookups: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<Mutex<Option<String>>>,
}

impl MockCredentialStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ticket.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only code).
    #[allow(clippy::unwrap_used)]
    pub fn insert_ticket(&self, ticket: Ticket) {
        self.tickets
            .lock()
            .unwrap()
            .insert(ticket.id.clone(), ticket);
    }

    /// Seed a subscription.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only code).
    #[allow(clippy::unwrap_used)]
    pub fn insert_subscription(&self, subscription: Subscription) {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(subscription.id.clone(), subscription);
    }

    /// Read back a seeded ticket, for asserting on persisted state.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only code).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn ticket(&self, ticket_id: &TicketId) -> Option<Ticket> {
        self.tickets.lock().unwrap().get(ticket_id).cloned()
    }

    /// Make every subsequent lookup fail with a database error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only code).
    #[allow(clippy::unwrap_used)]
    pub fn fail_lookups_with(&self, message: &str) {
        *self.fail_lookups.lock().unwrap() = Some(message.to_string());
    }

    /// Make every subsequent validated-flag write fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only code).
    #[allow(clippy::unwrap_used)]
    pub fn fail_writes_with(&self, message: &str) {
        *self.fail_writes.lock().unwrap() = Some(message.to_string());
    }
}

impl CredentialStore for MockCredentialStore {
    fn find_ticket_by_id(
        &self,
        ticket_id: &TicketId,
    ) -> impl Future<Output = Result<Ticket>> + Send {
        let tickets = Arc::clone(&self.tickets);
        let fail_lookups = Arc::clone(&self.fail_lookups);
        let ticket_id = ticket_id.clone();

        async move {
            if let Some(message) = fail_lookups
                .lock()
                .map_err(|_| ValidationError::Database("mock lock poisoned".to_string()))?
                .clone()
            {
                return Err(ValidationError::Database(message));
            }

            tickets
                .lock()
                .map_err(|_| ValidationError::Database("mock lock poisoned".to_string()))?
                .get(&ticket_id)
                .cloned()
                .ok_or(ValidationError::TicketNotFound)
        }
    }

    fn mark_ticket_validated(
        &self,
        ticket_id: &TicketId,
        validated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool>> + Send {
        let tickets = Arc::clone(&self.tickets);
        let fail_writes = Arc::clone(&self.fail_writes);
        let ticket_id = ticket_id.clone();

        async move {
            if let Some(message) = fail_writes
                .lock()
                .map_err(|_| ValidationError::WriteFailed("mock lock poisoned".to_string()))?
                .clone()
            {
                return Err(ValidationError::WriteFailed(message));
            }

            let mut guard = tickets
                .lock()
                .map_err(|_| ValidationError::WriteFailed("mock lock poisoned".to_string()))?;
            let ticket = guard
                .get_mut(&ticket_id)
                .ok_or(ValidationError::TicketNotFound)?;

            // Same compare-and-swap contract as the real store: a ticket
            // that is already validated is left untouched.
            if ticket.validated {
                return Ok(false);
            }
            ticket.validated = true;
            ticket.validated_at = Some(validated_at);
            Ok(true)
        }
    }

    fn find_subscription_by_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> impl Future<Output = Result<Subscription>> + Send {
        let subscriptions = Arc::clone(&self.subscriptions);
        let fail_lookups = Arc::clone(&self.fail_lookups);
        let subscription_id = subscription_id.clone();

        async move {
            if let Some(message) = fail_lookups
                .lock()
                .map_err(|_| ValidationError::Database("mock lock poisoned".to_string()))?
                .clone()
            {
                return Err(ValidationError::Database(message));
            }

            subscriptions
                .lock()
                .map_err(|_| ValidationError::Database("mock lock poisoned".to_string()))?
                .get(&subscription_id)
                .cloned()
                .ok_or(ValidationError::SubscriptionNotFound)
        }
    }
}
