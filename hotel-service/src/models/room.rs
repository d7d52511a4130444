//! Room catalog model and the room status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Room occupancy status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Vacant,
    Occupied,
}

/// Events that may move a room between statuses. Status never changes
/// outside of this table; in particular there is no implicit transition
/// when a check-in document is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    InvoiceCreated,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Vacant => "vacant",
            RoomStatus::Occupied => "occupied",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "occupied" => RoomStatus::Occupied,
            _ => RoomStatus::Vacant,
        }
    }

    /// Apply an event. Returns `None` when the transition is not legal
    /// from the current status.
    pub fn transition(self, event: RoomEvent) -> Option<RoomStatus> {
        match (self, event) {
            (RoomStatus::Vacant, RoomEvent::InvoiceCreated) => Some(RoomStatus::Occupied),
            (RoomStatus::Occupied, RoomEvent::InvoiceCreated) => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room catalog record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub room_id: Uuid,
    pub room_number: String,
    pub room_type: String,
    pub room_item: String,
    pub price: Decimal,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Row shape returned by reservation-scoped room searches.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomSummary {
    pub room_id: Uuid,
    pub room_number: String,
    pub room_type: String,
}
