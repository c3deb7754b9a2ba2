//! Structured payload codec.
//!
//! The code-generation side renders scannable codes in one of two shapes:
//! a JSON document with a `kind` discriminator (the "enhanced" encoding),
//! or a bare entity id (the "legacy" encoding). This module owns the
//! enhanced wire format.
//!
//! Decoding **fails closed**: anything that is not a complete, well-formed
//! enhanced payload (a legacy id, truncated JSON, an unknown `kind`, a
//! missing field) is a normal negative result (`None`), never an error.
//! Partial field access on a half-matching document is exactly the failure
//! mode this codec exists to rule out.

use serde::{Deserialize, Serialize};

/// A decoded enhanced credential payload.
///
/// Carries the entity id plus redundant copies of identifying fields.
/// The redundant fields are cross-checked byte-for-byte against the stored
/// record so a tampered or stale code is rejected even when the id is real.
///
/// The wire format is JSON with a `kind` tag and camelCase fields, matching
/// what the code-generation side emits:
///
/// ```json
/// {"kind":"ticket","ticketId":"TICKET-ABC123","fixtureId":"FIX-7",
///  "holderName":"Ada Lovelace","holderEmail":"ada@example.com"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScannedPayload {
    /// A single-use ticket credential.
    #[serde(rename_all = "camelCase")]
    Ticket {
        /// Ticket id.
        ticket_id: String,
        /// Fixture the ticket claims to admit to.
        fixture_id: String,
        /// Holder name as embedded at generation time.
        holder_name: String,
        /// Holder email as embedded at generation time.
        holder_email: String,
    },

    /// A multi-use subscription credential.
    #[serde(rename_all = "camelCase")]
    Subscription {
        /// Subscription id.
        subscription_id: String,
        /// Holder name as embedded at generation time.
        holder_name: String,
        /// Holder email as embedded at generation time.
        holder_email: String,
    },
}

impl ScannedPayload {
    /// Try to decode `input` as an enhanced payload.
    ///
    /// Returns `None` for anything that is not a complete enhanced payload.
    /// Callers treat `None` as "this is a legacy bare id".
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        serde_json::from_str(input).ok()
    }

    /// Encode this payload to its wire form.
    ///
    /// Round-trips with [`ScannedPayload::parse`]:
    /// `parse(&encode(p)) == Some(p)` for every payload.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ticket_payload() -> ScannedPayload {
        ScannedPayload::Ticket {
            ticket_id: "TICKET-ABC123".to_string(),
            fixture_id: "FIX-7".to_string(),
            holder_name: "Ada Lovelace".to_string(),
            holder_email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_parse_ticket_payload() {
        let input = r#"{"kind":"ticket","ticketId":"TICKET-ABC123","fixtureId":"FIX-7","holderName":"Ada Lovelace","holderEmail":"ada@example.com"}"#;
        assert_eq!(ScannedPayload::parse(input), Some(ticket_payload()));
    }

    #[test]
    fn test_parse_subscription_payload() {
        let input = r#"{"kind":"subscription","subscriptionId":"SUB-42","holderName":"Ada","holderEmail":"ada@example.com"}"#;
        assert_eq!(
            ScannedPayload::parse(input),
            Some(ScannedPayload::Subscription {
                subscription_id: "SUB-42".to_string(),
                holder_name: "Ada".to_string(),
                holder_email: "ada@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_bare_id_is_not_structured() {
        assert_eq!(ScannedPayload::parse("TICKET-ABC123"), None);
    }

    #[test]
    fn test_malformed_json_fails_closed() {
        assert_eq!(ScannedPayload::parse(r#"{"kind":"ticket","ticketId":"#), None);
    }

    #[test]
    fn test_unknown_kind_fails_closed() {
        let input = r#"{"kind":"voucher","ticketId":"TICKET-ABC123"}"#;
        assert_eq!(ScannedPayload::parse(input), None);
    }

    #[test]
    fn test_missing_field_fails_closed() {
        // A ticket payload without the redundant holder fields is not a
        // partial match, it is not structured at all.
        let input = r#"{"kind":"ticket","ticketId":"TICKET-ABC123"}"#;
        assert_eq!(ScannedPayload::parse(input), None);
    }

    #[test]
    fn test_round_trip() {
        let payload = ticket_payload();
        let encoded = payload.encode().unwrap();
        assert_eq!(ScannedPayload::parse(&encoded), Some(payload));
    }
}
