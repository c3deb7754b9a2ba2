//! PostgreSQL credential store implementation.
//!
//! Reads tickets (joined with fixture and pricing tier) and subscriptions,
//! and owns the one mutation in the whole component: the conditional
//! validated-flag update.
//!
//! # Example
//!
//! ```no_run
//! use matchday_validation::stores::postgres::PostgresCredentialStore;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/matchday").await?;
//! let store = PostgresCredentialStore::new(pool);
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, ValidationError};
use crate::providers::CredentialStore;
use crate::types::{
    Fixture, FixtureId, PricingTier, Subscription, SubscriptionId, Ticket, TicketId,
};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// PostgreSQL credential store.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresCredentialStore {
    /// Create a new PostgreSQL credential store.
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ValidationError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    fn row_to_ticket(row: &sqlx::postgres::PgRow) -> Result<Ticket> {
        let map_err = |e: sqlx::Error| ValidationError::Database(format!("Bad ticket row: {e}"));

        Ok(Ticket {
            id: TicketId(row.try_get("id").map_err(map_err)?),
            fixture: Fixture {
                id: FixtureId(row.try_get("fixture_id").map_err(map_err)?),
                title: row.try_get("fixture_title").map_err(map_err)?,
                date: row.try_get("fixture_date").map_err(map_err)?,
                kickoff: row.try_get("kickoff").map_err(map_err)?,
            },
            tier: PricingTier {
                name: row.try_get("tier_name").map_err(map_err)?,
            },
            holder_name: row.try_get("holder_name").map_err(map_err)?,
            holder_email: row.try_get("holder_email").map_err(map_err)?,
            validated: row.try_get("validated").map_err(map_err)?,
            validated_at: row.try_get("validated_at").map_err(map_err)?,
        })
    }
}

impl CredentialStore for PostgresCredentialStore {
    async fn find_ticket_by_id(&self, ticket_id: &TicketId) -> Result<Ticket> {
        let row = sqlx::query(
            r"
            SELECT
                t.id, t.holder_name, t.holder_email, t.validated, t.validated_at,
                f.id AS fixture_id, f.title AS fixture_title, f.fixture_date, f.kickoff,
                p.name AS tier_name
            FROM tickets t
            JOIN fixtures f ON f.id = t.fixture_id
            JOIN pricing_tiers p ON p.id = t.tier_id
            WHERE t.id = $1
            ",
        )
        .bind(&ticket_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(ticket_id = %ticket_id, operation = "find_ticket_by_id", error = %e, "Credential lookup failed");
            ValidationError::Database(format!("Failed to get ticket: {e}"))
        })?
        .ok_or(ValidationError::TicketNotFound)?;

        Self::row_to_ticket(&row)
    }

    async fn mark_ticket_validated(
        &self,
        ticket_id: &TicketId,
        validated_at: DateTime<Utc>,
    ) -> Result<bool> {
        // Conditional update: only an unvalidated ticket is consumed.
        // Under concurrent scans of the same ticket exactly one UPDATE
        // matches; the loser sees zero rows affected.
        let result = sqlx::query(
            r"
            UPDATE tickets
            SET validated = TRUE,
                validated_at = $2
            WHERE id = $1 AND validated = FALSE
            ",
        )
        .bind(&ticket_id.0)
        .bind(validated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(ticket_id = %ticket_id, operation = "mark_ticket_validated", error = %e, "Validated-flag write failed");
            ValidationError::WriteFailed(format!("Failed to mark ticket validated: {e}"))
        })?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // Zero rows: either the ticket vanished or it was already
        // validated. Distinguish so the caller reports the right outcome.
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tickets WHERE id = $1)")
                .bind(&ticket_id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    ValidationError::Database(format!("Failed to check ticket: {e}"))
                })?;

        if exists.0 {
            Ok(false)
        } else {
            Err(ValidationError::TicketNotFound)
        }
    }

    async fn find_subscription_by_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription> {
        let row = sqlx::query(
            r"
            SELECT id, holder_name, holder_surname, holder_email, valid_from, valid_to
            FROM subscriptions
            WHERE id = $1
            ",
        )
        .bind(&subscription_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(subscription_id = %subscription_id, operation = "find_subscription_by_id", error = %e, "Credential lookup failed");
            ValidationError::Database(format!("Failed to get subscription: {e}"))
        })?
        .ok_or(ValidationError::SubscriptionNotFound)?;

        let map_err =
            |e: sqlx::Error| ValidationError::Database(format!("Bad subscription row: {e}"));

        Ok(Subscription {
            id: SubscriptionId(row.try_get("id").map_err(map_err)?),
            holder_name: row.try_get("holder_name").map_err(map_err)?,
            holder_surname: row.try_get("holder_surname").map_err(map_err)?,
            holder_email: row.try_get("holder_email").map_err(map_err)?,
            valid_from: row.try_get("valid_from").map_err(map_err)?,
            valid_to: row.try_get("valid_to").map_err(map_err)?,
        })
    }
}
