//! Guest ledger and general ledger reporting views.

use crate::reporting::{
    history_rows, ledger_rows, reconcile_history, DisplayFormatter, HistoryRow, LedgerRow,
};
use crate::services::GuestLedgerSnapshot;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use service_core::error::AppError;
use uuid::Uuid;

/// Combined guest ledger view: financial postings with running balances
/// plus the reconciled stay history, both display-formatted.
#[derive(Debug, Serialize)]
pub struct GuestLedgerResponse {
    pub ledger: Vec<LedgerRow>,
    pub guest_history: Vec<HistoryRow>,
}

#[derive(Debug, Deserialize)]
pub struct GuestLedgerParams {
    pub guest: Option<Uuid>,
}

/// GET /guest-ledger?guest={id}
///
/// An absent guest parameter returns the empty shape rather than erroring;
/// so does an unknown guest id. Read paths degrade, they do not fail.
pub async fn guest_ledger(
    State(state): State<AppState>,
    Query(params): Query<GuestLedgerParams>,
) -> Result<Json<GuestLedgerResponse>, AppError> {
    let Some(guest_id) = params.guest else {
        return Ok(Json(empty_response()));
    };

    build_guest_ledger(&state, guest_id).await
}

/// GET /guests/{guest_id}/ledger
pub async fn guest_ledger_by_id(
    State(state): State<AppState>,
    Path(guest_id): Path<Uuid>,
) -> Result<Json<GuestLedgerResponse>, AppError> {
    build_guest_ledger(&state, guest_id).await
}

async fn build_guest_ledger(
    state: &AppState,
    guest_id: Uuid,
) -> Result<Json<GuestLedgerResponse>, AppError> {
    let snapshot = match state.db.guest_ledger_snapshot(guest_id).await? {
        Some(snapshot) => snapshot,
        None => return Ok(Json(empty_response())),
    };

    Ok(Json(render_ledger(&snapshot, &state.formatter)))
}

fn render_ledger(
    snapshot: &GuestLedgerSnapshot,
    formatter: &DisplayFormatter,
) -> GuestLedgerResponse {
    let history = reconcile_history(
        &snapshot.reservations,
        &snapshot.check_ins,
        &snapshot.check_outs,
    );

    GuestLedgerResponse {
        ledger: ledger_rows(&snapshot.gl_entries, formatter),
        guest_history: history_rows(&history, formatter),
    }
}

fn empty_response() -> GuestLedgerResponse {
    GuestLedgerResponse {
        ledger: Vec::new(),
        guest_history: Vec::new(),
    }
}

/// Column set of the general-ledger view for a check-in.
const GENERAL_LEDGER_COLUMNS: [&str; 7] = [
    "posting_date",
    "account",
    "debit",
    "credit",
    "balance",
    "voucher_type",
    "voucher_no",
];

/// GET /check-ins/{check_in_id}/general-ledger
///
/// Ledger postings for the check-in's customer filtered to the stay's
/// date range (today when no departure is recorded yet).
pub async fn general_ledger(
    State(state): State<AppState>,
    Path(check_in_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
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

    let customer_id = guest.customer_id.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!(
            "Guest {} has no customer record",
            guest.guest_id
        ))
    })?;

    let to_date = check_in
        .check_out_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let entries = state
        .db
        .gl_entries_for_customer(customer_id, check_in.check_in_date, to_date)
        .await?;

    Ok(Json(json!({
        "columns": GENERAL_LEDGER_COLUMNS,
        "data": ledger_rows(&entries, &state.formatter),
    })))
}
