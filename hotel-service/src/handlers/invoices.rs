//! Invoice creation for check-ins.

use crate::models::{CheckIn, Guest, Room};
use crate::services::metrics::{ERRORS_TOTAL, INVOICES_TOTAL};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AdditionalInvoiceRequest {
    pub amount: Decimal,
}

/// POST /check-ins/{check_in_id}/invoice
///
/// Creates and finalizes a sales invoice from a check-in's stay details,
/// stores the invoice reference on the check-in, and marks the room
/// occupied.
pub async fn create_invoice(
    State(state): State<AppState>,
    Path(check_in_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (check_in, guest, room) = load_invoice_context(&state, check_in_id).await?;

    if let Some(existing) = check_in.sales_invoice_id {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Check-in {} already has sales invoice {}",
            check_in_id,
            existing
        )));
    }

    let customer_id = customer_for(&guest)?;

    let invoice = state
        .db
        .create_sales_invoice(
            &check_in,
            &room,
            customer_id,
            check_in.total_charge,
            &state.config.accounts,
            true,
        )
        .await
        .map_err(|e| invoice_error(check_in_id, e))?;

    INVOICES_TOTAL.with_label_values(&["standard"]).inc();

    Ok(Json(json!({ "invoice_id": invoice.invoice_id })))
}

/// POST /check-ins/{check_in_id}/additional-invoice
///
/// Same invoice construction with a caller-supplied amount; does not
/// touch the room or the check-in record.
pub async fn create_additional_invoice(
    State(state): State<AppState>,
    Path(check_in_id): Path<Uuid>,
    Json(request): Json<AdditionalInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invoice amount must be positive"
        )));
    }

    let (check_in, guest, room) = load_invoice_context(&state, check_in_id).await?;
    let customer_id = customer_for(&guest)?;

    let invoice = state
        .db
        .create_sales_invoice(
            &check_in,
            &room,
            customer_id,
            request.amount,
            &state.config.accounts,
            false,
        )
        .await
        .map_err(|e| invoice_error(check_in_id, e))?;

    INVOICES_TOTAL.with_label_values(&["additional"]).inc();

    Ok(Json(json!({ "invoice_id": invoice.invoice_id })))
}

/// Resolve the check-in, its guest and its room, with not-found errors
/// that name the missing record.
async fn load_invoice_context(
    state: &AppState,
    check_in_id: Uuid,
) -> Result<(CheckIn, Guest, Room), AppError> {
    let check_in = state
        .db
        .get_check_in(check_in_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Check-in {} not found", check_in_id)))?;

    let guest = state
        .db
        .get_guest(check_in.guest_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Guest {} not found", check_in.guest_id))
        })?;

    let room = state
        .db
        .get_room_by_number(&check_in.room_number)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("Room {} not found", check_in.room_number))
        })?;

    Ok((check_in, guest, room))
}

fn customer_for(guest: &Guest) -> Result<Uuid, AppError> {
    guest.customer_id.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!(
            "Guest {} has no customer record",
            guest.guest_id
        ))
    })
}

/// Write-path failure policy: validation conflicts surface directly;
/// anything else is logged in full and replaced by a generic user-facing
/// message.
fn invoice_error(check_in_id: Uuid, error: AppError) -> AppError {
    match error {
        AppError::Conflict(_) => error,
        other => {
            tracing::error!(
                check_in_id = %check_in_id,
                error = %other,
                "Error creating sales invoice"
            );
            ERRORS_TOTAL.with_label_values(&["invoice_creation"]).inc();
            AppError::InternalError(anyhow::anyhow!(
                "An error occurred while creating the sales invoice. Please try again later."
            ))
        }
    }
}
