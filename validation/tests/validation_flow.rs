//! Integration tests for the gate validation flow.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use matchday_validation::mocks::{FixedClock, MockCredentialStore};
use matchday_validation::payload::ScannedPayload;
use matchday_validation::providers::{Clock, CredentialStore};
use matchday_validation::types::{
    CredentialEncoding, Fixture, FixtureId, PricingTier, Subscription, SubscriptionId, Ticket,
    TicketId,
};
use matchday_validation::{ValidatedCredential, ValidationError, ValidationService};

/// Scan date used throughout: 2025-06-15 12:00:00 UTC.
fn test_clock() -> FixedClock {
    FixedClock::default()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn ticket(id: &str, fixture_date: NaiveDate) -> Ticket {
    Ticket {
        id: TicketId::from(id),
        fixture: Fixture {
            id: FixtureId::from("FIX-7"),
            title: "Matchday 30 vs. Rovers".to_string(),
            date: fixture_date,
            kickoff: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        },
        tier: PricingTier {
            name: "Main Stand".to_string(),
        },
        holder_name: "Ada Lovelace".to_string(),
        holder_email: "ada@example.com".to_string(),
        validated: false,
        validated_at: None,
    }
}

fn subscription(id: &str) -> Subscription {
    Subscription {
        id: SubscriptionId::from(id),
        holder_name: "Ada".to_string(),
        holder_surname: "Lovelace".to_string(),
        holder_email: "ada@example.com".to_string(),
        valid_from: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        valid_to: Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
    }
}

fn service(store: &MockCredentialStore) -> ValidationService<MockCredentialStore, FixedClock> {
    ValidationService::new(store.clone(), test_clock())
}

fn enhanced_ticket_payload(ticket: &Ticket) -> String {
    ScannedPayload::Ticket {
        ticket_id: ticket.id.0.clone(),
        fixture_id: ticket.fixture.id.0.clone(),
        holder_name: ticket.holder_name.clone(),
        holder_email: ticket.holder_email.clone(),
    }
    .encode()
    .unwrap()
}

fn enhanced_subscription_payload(subscription: &Subscription) -> String {
    ScannedPayload::Subscription {
        subscription_id: subscription.id.0.clone(),
        holder_name: subscription.holder_name.clone(),
        holder_email: subscription.holder_email.clone(),
    }
    .encode()
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Scenario A/B + P1: legacy ticket consumed exactly once
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_legacy_ticket_validates_then_rejects_second_scan() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));
    let service = service(&store);

    // First scan succeeds with the legacy encoding marker.
    let first = service.validate("TICKET-ABC123").await.unwrap();
    match &first {
        ValidatedCredential::Ticket(receipt) => {
            assert_eq!(receipt.ticket_id, TicketId::from("TICKET-ABC123"));
            assert_eq!(receipt.encoding, CredentialEncoding::Legacy);
            assert_eq!(receipt.fixture_title, "Matchday 30 vs. Rovers");
            assert_eq!(receipt.tier, "Main Stand");
            assert_eq!(receipt.validated_at, test_clock().now());
        }
        ValidatedCredential::Subscription(_) => panic!("expected a ticket receipt"),
    }

    // The flag and timestamp were persisted.
    let stored = store.ticket(&TicketId::from("TICKET-ABC123")).unwrap();
    assert!(stored.validated);
    assert_eq!(stored.validated_at, Some(test_clock().now()));

    // Second scan of the same code reports the earlier validation.
    let second = service.validate("TICKET-ABC123").await;
    assert_eq!(
        second,
        Err(ValidationError::AlreadyValidated {
            validated_at: Some(test_clock().now()),
        })
    );
}

#[tokio::test]
async fn test_whitespace_around_legacy_id_is_trimmed() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));

    let result = service(&store).validate("  TICKET-ABC123\n").await;
    assert!(result.is_ok());
}

// ═══════════════════════════════════════════════════════════════════════
// P2: legacy fallthrough is ticket-first
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_legacy_id_falls_through_to_subscription() {
    let store = MockCredentialStore::new();
    store.insert_subscription(subscription("SUB-42"));
    let service = service(&store);

    let result = service.validate("SUB-42").await.unwrap();
    match result {
        ValidatedCredential::Subscription(receipt) => {
            assert_eq!(receipt.subscription_id, SubscriptionId::from("SUB-42"));
            assert_eq!(receipt.encoding, CredentialEncoding::Legacy);
            assert_eq!(receipt.holder_surname, "Lovelace");
        }
        ValidatedCredential::Ticket(_) => panic!("expected a subscription receipt"),
    }
}

#[tokio::test]
async fn test_non_not_found_ticket_outcome_does_not_fall_through() {
    // A used ticket and a valid subscription share the id. The ticket
    // outcome must short-circuit; the subscription is never consulted.
    let store = MockCredentialStore::new();
    let mut used = ticket("SHARED-1", today());
    used.validated = true;
    used.validated_at = Some(test_clock().now());
    store.insert_ticket(used);
    store.insert_subscription(subscription("SHARED-1"));

    let result = service(&store).validate("SHARED-1").await;
    assert!(matches!(
        result,
        Err(ValidationError::AlreadyValidated { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Scenario D: both kinds missing
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_unknown_legacy_id_reports_credential_not_found() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));
    store.insert_subscription(subscription("SUB-42"));

    let result = service(&store).validate("NO-SUCH-ID").await;
    assert_eq!(result, Err(ValidationError::CredentialNotFound));
}

// ═══════════════════════════════════════════════════════════════════════
// P3: enhanced cross-check mismatch short-circuits
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_enhanced_ticket_email_mismatch() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));
    // A subscription under the same id with matching fields must not rescue
    // a mismatched ticket payload.
    store.insert_subscription(subscription("TICKET-ABC123"));

    let payload = ScannedPayload::Ticket {
        ticket_id: "TICKET-ABC123".to_string(),
        fixture_id: "FIX-7".to_string(),
        holder_name: "Ada Lovelace".to_string(),
        holder_email: "mallory@example.com".to_string(),
    }
    .encode()
    .unwrap();

    let result = service(&store).validate(&payload).await;
    assert_eq!(
        result,
        Err(ValidationError::DataMismatch {
            field: "holder email",
        })
    );

    // The mismatch left the ticket unconsumed.
    assert!(!store.ticket(&TicketId::from("TICKET-ABC123")).unwrap().validated);
}

#[tokio::test]
async fn test_enhanced_ticket_fixture_mismatch() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));

    let payload = ScannedPayload::Ticket {
        ticket_id: "TICKET-ABC123".to_string(),
        fixture_id: "FIX-OTHER".to_string(),
        holder_name: "Ada Lovelace".to_string(),
        holder_email: "ada@example.com".to_string(),
    }
    .encode()
    .unwrap();

    let result = service(&store).validate(&payload).await;
    assert_eq!(result, Err(ValidationError::DataMismatch { field: "fixture" }));
}

#[tokio::test]
async fn test_enhanced_ticket_happy_path_reports_enhanced_encoding() {
    let store = MockCredentialStore::new();
    let seeded = ticket("TICKET-ABC123", today());
    let payload = enhanced_ticket_payload(&seeded);
    store.insert_ticket(seeded);

    let result = service(&store).validate(&payload).await.unwrap();
    assert_eq!(result.encoding(), CredentialEncoding::Enhanced);
}

#[tokio::test]
async fn test_enhanced_subscription_name_mismatch() {
    let store = MockCredentialStore::new();
    store.insert_subscription(subscription("SUB-42"));

    let payload = ScannedPayload::Subscription {
        subscription_id: "SUB-42".to_string(),
        holder_name: "Mallory".to_string(),
        holder_email: "ada@example.com".to_string(),
    }
    .encode()
    .unwrap();

    let result = service(&store).validate(&payload).await;
    assert_eq!(
        result,
        Err(ValidationError::DataMismatch {
            field: "holder name",
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// P4: fixture date boundary
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_ticket_for_todays_fixture_validates() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-TODAY", today()));

    assert!(service(&store).validate("TICKET-TODAY").await.is_ok());
}

#[tokio::test]
async fn test_ticket_for_yesterdays_fixture_is_expired() {
    let yesterday = today().pred_opt().unwrap();
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-LATE", yesterday));

    let result = service(&store).validate("TICKET-LATE").await;
    assert_eq!(result, Err(ValidationError::FixtureExpired { date: yesterday }));

    // An expired ticket is not consumed.
    assert!(!store.ticket(&TicketId::from("TICKET-LATE")).unwrap().validated);
}

#[tokio::test]
async fn test_ticket_for_future_fixture_validates() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-EARLY", today().succ_opt().unwrap()));

    assert!(service(&store).validate("TICKET-EARLY").await.is_ok());
}

// ═══════════════════════════════════════════════════════════════════════
// Scenario C + P5: subscription window, closed interval, no mutation
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_subscription_rescans_succeed_unbounded() {
    let store = MockCredentialStore::new();
    let seeded = subscription("SUB-42");
    let payload = enhanced_subscription_payload(&seeded);
    store.insert_subscription(seeded);
    let service = service(&store);

    for _ in 0..5 {
        let result = service.validate(&payload).await.unwrap();
        match &result {
            ValidatedCredential::Subscription(receipt) => {
                assert_eq!(receipt.encoding, CredentialEncoding::Enhanced);
                assert_eq!(receipt.validated_at, test_clock().now());
            }
            ValidatedCredential::Ticket(_) => panic!("expected a subscription receipt"),
        }
    }
}

#[tokio::test]
async fn test_subscription_window_endpoints_are_valid() {
    let store = MockCredentialStore::new();
    let mut sub = subscription("SUB-EDGE");
    sub.valid_from = test_clock().now();
    store.insert_subscription(sub.clone());

    // Scan at exactly valid_from succeeds.
    assert!(service(&store).validate("SUB-EDGE").await.is_ok());

    // Scan at exactly valid_to succeeds (closed interval).
    let mut sub_end = subscription("SUB-EDGE-END");
    sub_end.valid_to = test_clock().now();
    store.insert_subscription(sub_end);
    assert!(service(&store).validate("SUB-EDGE-END").await.is_ok());
}

#[tokio::test]
async fn test_subscription_not_yet_active() {
    let store = MockCredentialStore::new();
    let mut sub = subscription("SUB-FUTURE");
    sub.valid_from = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    store.insert_subscription(sub.clone());

    let result = service(&store).validate("SUB-FUTURE").await;
    assert_eq!(
        result,
        Err(ValidationError::SubscriptionNotYetActive {
            valid_from: sub.valid_from,
        })
    );
}

#[tokio::test]
async fn test_subscription_expired() {
    let store = MockCredentialStore::new();
    let mut sub = subscription("SUB-PAST");
    sub.valid_to = Utc.with_ymd_and_hms(2025, 5, 31, 23, 59, 59).unwrap();
    store.insert_subscription(sub.clone());

    let result = service(&store).validate("SUB-PAST").await;
    assert_eq!(
        result,
        Err(ValidationError::SubscriptionExpired {
            valid_to: sub.valid_to,
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// P6: empty input
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_empty_input_rejected_without_lookup() {
    let store = MockCredentialStore::new();
    // A poisoned store proves no lookup is attempted.
    store.fail_lookups_with("must not be called");
    let service = service(&store);

    assert_eq!(service.validate("").await, Err(ValidationError::InvalidInput));
    assert_eq!(service.validate("   ").await, Err(ValidationError::InvalidInput));
}

// ═══════════════════════════════════════════════════════════════════════
// Infrastructure faults
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_lookup_fault_surfaces_as_database_error() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));
    store.fail_lookups_with("connection refused");

    let result = service(&store).validate("TICKET-ABC123").await;
    assert_eq!(
        result,
        Err(ValidationError::Database("connection refused".to_string()))
    );
}

#[tokio::test]
async fn test_write_fault_surfaces_as_write_failed_and_ticket_unconsumed() {
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-ABC123", today()));
    store.fail_writes_with("statement timeout");
    let service = service(&store);

    let result = service.validate("TICKET-ABC123").await;
    assert_eq!(
        result,
        Err(ValidationError::WriteFailed("statement timeout".to_string()))
    );
    assert!(!store.ticket(&TicketId::from("TICKET-ABC123")).unwrap().validated);
}

#[tokio::test]
async fn test_validated_flag_write_is_compare_and_swap() {
    // The store-level contract behind the double-scan guarantee: of two
    // racing writes exactly one consumes the ticket, the other is a no-op.
    let store = MockCredentialStore::new();
    store.insert_ticket(ticket("TICKET-RACE", today()));
    let id = TicketId::from("TICKET-RACE");

    let first = store.mark_ticket_validated(&id, test_clock().now()).await;
    let second = store.mark_ticket_validated(&id, test_clock().now()).await;
    assert_eq!(first, Ok(true));
    assert_eq!(second, Ok(false));

    let missing = TicketId::from("NO-SUCH-TICKET");
    let result = store.mark_ticket_validated(&missing, test_clock().now()).await;
    assert_eq!(result, Err(ValidationError::TicketNotFound));
}
