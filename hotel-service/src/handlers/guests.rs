//! Guest registration.

use crate::models::CreateGuest;
use crate::services::metrics::{ERRORS_TOTAL, GUESTS_CREATED};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// POST /guests
///
/// Registers a guest and creates the linked customer master in the hotel
/// customer group. Unexpected failures are logged with full detail and
/// surfaced to the caller as a generic message.
pub async fn create_guest(
    State(state): State<AppState>,
    Json(input): Json<CreateGuest>,
) -> Result<impl IntoResponse, AppError> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Guest full name is required"
        )));
    }

    let guest = state
        .db
        .create_guest(&input, &state.config.bootstrap.customer_group)
        .await
        .map_err(|e| {
            tracing::error!(full_name = %input.full_name, error = %e, "Error creating customer");
            ERRORS_TOTAL.with_label_values(&["guest_registration"]).inc();
            GUESTS_CREATED.with_label_values(&["error"]).inc();
            AppError::InternalError(anyhow::anyhow!(
                "An error occurred while creating the customer record. Please try again later."
            ))
        })?;

    GUESTS_CREATED.with_label_values(&["ok"]).inc();

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "guest_id": guest.guest_id,
            "customer_id": guest.customer_id,
        })),
    ))
}
