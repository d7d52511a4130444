//! Reservation-scoped room search.

use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use service_core::error::AppError;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RoomSearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /reservations/{reservation_id}/rooms?query=txt
///
/// Rooms linked to the reservation, substring-filtered on room id or
/// room number. An empty query matches every linked room.
pub async fn search_rooms(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    Query(params): Query<RoomSearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let rooms = state
        .db
        .search_rooms_by_reservation(reservation_id, &params.query)
        .await?;

    Ok(Json(json!({ "rooms": rooms })))
}
