//! Credential data types.
//!
//! ID newtypes, the persisted models owned by the purchase flow, and the
//! receipts returned to the gate operator on a successful scan.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Opaque ticket identifier.
///
/// Tickets are identified by whatever string the purchase flow minted
/// (e.g. `TICKET-ABC123`); legacy scans carry this string verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque subscription identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub String);

impl From<&str> for SubscriptionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque fixture (match event) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureId(pub String);

impl From<&str> for FixtureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for FixtureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Persisted Models
// ═══════════════════════════════════════════════════════════════════════

/// A match fixture a ticket admits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Fixture ID.
    pub id: FixtureId,

    /// Display title (e.g. "Matchday 12 vs. Rovers").
    pub title: String,

    /// Calendar date of the fixture. Tickets stay scannable through this
    /// whole day; the time component plays no part in expiry.
    pub date: NaiveDate,

    /// Kickoff time, shown to the operator.
    pub kickoff: NaiveTime,
}

/// A pricing tier a ticket was sold under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Display name (e.g. "Main Stand", "Family").
    pub name: String,
}

/// A single-use match ticket, joined with its fixture and tier.
///
/// Created by the purchase flow; this component only ever flips
/// `validated` from `false` to `true`, exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID.
    pub id: TicketId,

    /// The fixture this ticket admits to.
    pub fixture: Fixture,

    /// The tier it was sold under.
    pub tier: PricingTier,

    /// Name of the purchaser, printed on the code.
    pub holder_name: String,

    /// Email of the purchaser.
    pub holder_email: String,

    /// Whether the ticket has been consumed at a gate.
    pub validated: bool,

    /// When it was consumed, if it has been.
    pub validated_at: Option<DateTime<Utc>>,
}

/// A season subscription.
///
/// Read-only from this component's perspective: the window is fixed at
/// purchase time and a subscription validates any number of times inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,

    /// Holder's given name.
    pub holder_name: String,

    /// Holder's surname.
    pub holder_surname: String,

    /// Holder's email.
    pub holder_email: String,

    /// Window start. The instant itself is valid.
    pub valid_from: DateTime<Utc>,

    /// Window end. The instant itself is valid.
    pub valid_to: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Scan Results
// ═══════════════════════════════════════════════════════════════════════

/// Which encoding the scanned code arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialEncoding {
    /// Self-describing payload with cross-check fields.
    Enhanced,

    /// Bare entity id with no type discriminator.
    Legacy,
}

/// Receipt for a successfully consumed ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReceipt {
    /// Ticket ID.
    pub ticket_id: TicketId,

    /// Fixture title.
    pub fixture_title: String,

    /// Fixture date.
    pub fixture_date: NaiveDate,

    /// Kickoff time.
    pub kickoff: NaiveTime,

    /// Holder name, for a visual check at the gate.
    pub holder_name: String,

    /// Pricing tier name.
    pub tier: String,

    /// The validation timestamp just written.
    pub validated_at: DateTime<Utc>,

    /// Which encoding was scanned.
    #[serde(rename = "qrCodeType")]
    pub encoding: CredentialEncoding,
}

/// Receipt for an accepted subscription scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionReceipt {
    /// Subscription ID.
    pub subscription_id: SubscriptionId,

    /// Holder's given name.
    pub holder_name: String,

    /// Holder's surname.
    pub holder_surname: String,

    /// Window start.
    pub valid_from: DateTime<Utc>,

    /// Window end.
    pub valid_to: DateTime<Utc>,

    /// The instant the scan was accepted. Nothing is persisted.
    pub validated_at: DateTime<Utc>,

    /// Which encoding was scanned.
    #[serde(rename = "qrCodeType")]
    pub encoding: CredentialEncoding,
}

/// A successfully validated credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidatedCredential {
    /// A ticket was consumed.
    Ticket(TicketReceipt),

    /// A subscription scan was accepted.
    Subscription(SubscriptionReceipt),
}

impl ValidatedCredential {
    /// Operator-facing summary line for this scan.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Ticket(_) => "Ticket validated",
            Self::Subscription(_) => "Subscription active",
        }
    }

    /// Which encoding the accepted scan arrived in.
    #[must_use]
    pub const fn encoding(&self) -> CredentialEncoding {
        match self {
            Self::Ticket(receipt) => receipt.encoding,
            Self::Subscription(receipt) => receipt.encoding,
        }
    }
}
