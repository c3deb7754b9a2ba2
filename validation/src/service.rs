//! The credential validation service.
//!
//! One public operation: [`ValidationService::validate`]. Everything else
//! in this module is the gate sequence behind it.

use crate::error::{Result, ValidationError};
use crate::payload::ScannedPayload;
use crate::providers::{Clock, CredentialStore};
use crate::types::{
    CredentialEncoding, SubscriptionId, SubscriptionReceipt, TicketId, TicketReceipt,
    ValidatedCredential,
};
use tracing::{debug, info, warn};

/// Cross-check fields embedded in an enhanced ticket payload.
struct TicketCrossCheck {
    fixture_id: String,
    holder_name: String,
    holder_email: String,
}

/// Cross-check fields embedded in an enhanced subscription payload.
struct SubscriptionCrossCheck {
    holder_name: String,
    holder_email: String,
}

/// Gate credential validation service.
///
/// Holds its persistence store and clock as injected dependencies; no
/// request-scoped state lives here, so one instance serves every request.
///
/// # Examples
///
/// ```
/// use matchday_validation::mocks::{FixedClock, MockCredentialStore};
/// use matchday_validation::ValidationService;
///
/// let service = ValidationService::new(MockCredentialStore::new(), FixedClock::default());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationService<S, C> {
    store: S,
    clock: C,
}

impl<S, C> ValidationService<S, C>
where
    S: CredentialStore,
    C: Clock,
{
    /// Create a new validation service.
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Validate a scanned code.
    ///
    /// The decision procedure, first success wins:
    ///
    /// 1. Empty input (after trimming) is rejected outright.
    /// 2. If the input decodes as an enhanced payload, dispatch on its
    ///    `kind` with the embedded cross-check fields.
    /// 3. Otherwise the whole trimmed input is a candidate legacy id:
    ///    tickets are tried first, and only a clean [`ValidationError::TicketNotFound`]
    ///    falls through to the subscription lookup. Any other ticket outcome
    ///    (mismatch, already used, expired fixture, storage fault)
    ///    short-circuits. Both kinds missing is [`ValidationError::CredentialNotFound`].
    ///
    /// # Errors
    ///
    /// Every rejection is a [`ValidationError`] variant; see the error
    /// taxonomy for the full list. Storage faults surface as
    /// [`ValidationError::Database`] or [`ValidationError::WriteFailed`],
    /// never as a panic.
    pub async fn validate(&self, raw_input: &str) -> Result<ValidatedCredential> {
        let input = raw_input.trim();
        if input.is_empty() {
            debug!("rejected empty scan");
            return Err(ValidationError::InvalidInput);
        }

        let result = match ScannedPayload::parse(input) {
            Some(ScannedPayload::Ticket {
                ticket_id,
                fixture_id,
                holder_name,
                holder_email,
            }) => {
                let cross_check = TicketCrossCheck {
                    fixture_id,
                    holder_name,
                    holder_email,
                };
                self.validate_ticket(
                    &TicketId(ticket_id),
                    Some(&cross_check),
                    CredentialEncoding::Enhanced,
                )
                .await
            }
            Some(ScannedPayload::Subscription {
                subscription_id,
                holder_name,
                holder_email,
            }) => {
                let cross_check = SubscriptionCrossCheck {
                    holder_name,
                    holder_email,
                };
                self.validate_subscription(
                    &SubscriptionId(subscription_id),
                    Some(&cross_check),
                    CredentialEncoding::Enhanced,
                )
                .await
            }
            None => self.validate_legacy(input).await,
        };

        match &result {
            Ok(credential) => {
                info!(outcome = "accepted", encoding = ?credential.encoding(), "scan accepted");
            }
            Err(reason) if reason.is_infrastructure() => {
                warn!(outcome = "error", %reason, "scan failed on infrastructure");
            }
            Err(reason) => {
                debug!(outcome = "rejected", %reason, "scan rejected");
            }
        }

        result
    }

    /// Legacy path: the trimmed input is a candidate entity id of unknown
    /// kind. Ticket lookup runs first; only its clean not-found falls
    /// through to subscriptions.
    async fn validate_legacy(&self, input: &str) -> Result<ValidatedCredential> {
        match self
            .validate_ticket(&TicketId::from(input), None, CredentialEncoding::Legacy)
            .await
        {
            Err(ValidationError::TicketNotFound) => {
                match self
                    .validate_subscription(
                        &SubscriptionId::from(input),
                        None,
                        CredentialEncoding::Legacy,
                    )
                    .await
                {
                    Err(ValidationError::SubscriptionNotFound) => {
                        Err(ValidationError::CredentialNotFound)
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    /// Ticket sub-procedure. Each gate is hard; the first failure wins.
    async fn validate_ticket(
        &self,
        ticket_id: &TicketId,
        cross_check: Option<&TicketCrossCheck>,
        encoding: CredentialEncoding,
    ) -> Result<ValidatedCredential> {
        let ticket = self.store.find_ticket_by_id(ticket_id).await?;

        if let Some(expected) = cross_check {
            if ticket.fixture.id.0 != expected.fixture_id {
                return Err(ValidationError::DataMismatch { field: "fixture" });
            }
            if ticket.holder_name != expected.holder_name {
                return Err(ValidationError::DataMismatch {
                    field: "holder name",
                });
            }
            if ticket.holder_email != expected.holder_email {
                return Err(ValidationError::DataMismatch {
                    field: "holder email",
                });
            }
        }

        if ticket.validated {
            return Err(ValidationError::AlreadyValidated {
                validated_at: ticket.validated_at,
            });
        }

        // Date-only comparison: a ticket admits through the whole match day.
        if ticket.fixture.date < self.clock.today() {
            return Err(ValidationError::FixtureExpired {
                date: ticket.fixture.date,
            });
        }

        // The flag write is conditional on the ticket still being
        // unvalidated. A no-op update means another scanner got here
        // between our read and our write.
        let validated_at = self.clock.now();
        let consumed = self
            .store
            .mark_ticket_validated(ticket_id, validated_at)
            .await?;
        if !consumed {
            return Err(ValidationError::AlreadyValidated { validated_at: None });
        }

        Ok(ValidatedCredential::Ticket(TicketReceipt {
            ticket_id: ticket.id,
            fixture_title: ticket.fixture.title,
            fixture_date: ticket.fixture.date,
            kickoff: ticket.fixture.kickoff,
            holder_name: ticket.holder_name,
            tier: ticket.tier.name,
            validated_at,
            encoding,
        }))
    }

    /// Subscription sub-procedure. Pure read-check; nothing is mutated and
    /// a subscription validates any number of times inside its window.
    async fn validate_subscription(
        &self,
        subscription_id: &SubscriptionId,
        cross_check: Option<&SubscriptionCrossCheck>,
        encoding: CredentialEncoding,
    ) -> Result<ValidatedCredential> {
        let subscription = self.store.find_subscription_by_id(subscription_id).await?;

        if let Some(expected) = cross_check {
            if subscription.holder_name != expected.holder_name {
                return Err(ValidationError::DataMismatch {
                    field: "holder name",
                });
            }
            if subscription.holder_email != expected.holder_email {
                return Err(ValidationError::DataMismatch {
                    field: "holder email",
                });
            }
        }

        // Closed interval: both window endpoints themselves validate.
        let now = self.clock.now();
        if now < subscription.valid_from {
            return Err(ValidationError::SubscriptionNotYetActive {
                valid_from: subscription.valid_from,
            });
        }
        if now > subscription.valid_to {
            return Err(ValidationError::SubscriptionExpired {
                valid_to: subscription.valid_to,
            });
        }

        Ok(ValidatedCredential::Subscription(SubscriptionReceipt {
            subscription_id: subscription.id,
            holder_name: subscription.holder_name,
            holder_surname: subscription.holder_surname,
            valid_from: subscription.valid_from,
            valid_to: subscription.valid_to,
            validated_at: now,
            encoding,
        }))
    }
}
