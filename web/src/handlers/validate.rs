//! Credential validation endpoint.
//!
//! - POST /api/validate - Validate a scanned gate credential

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use matchday_validation::providers::{Clock, CredentialStore};
use matchday_validation::types::ValidatedCredential;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request carrying a scanned code.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    /// The raw scanned string: an enhanced payload or a bare legacy id.
    #[serde(rename = "qrData")]
    pub qr_data: String,
}

/// Response for an accepted scan.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// Operator-facing summary line.
    pub message: String,
    /// The validated credential receipt.
    pub data: ValidatedCredential,
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a scanned gate credential.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/validate \
///   -H "Content-Type: application/json" \
///   -d '{"qrData": "TICKET-ABC123"}'
/// ```
///
/// # Errors
///
/// Every rejection from the validation service maps onto the status
/// taxonomy in [`crate::error::AppError`]: 400 for credential-caused
/// rejections, 404 for unknown ids, 500 for storage faults.
pub async fn validate_credential<S, C>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError>
where
    S: CredentialStore + 'static,
    C: Clock + 'static,
{
    let credential = state.validation.validate(&request.qr_data).await?;

    Ok(Json(ValidateResponse {
        success: true,
        message: credential.message().to_string(),
        data: credential,
    }))
}
