//! Reservation model: a stay booked in advance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub reservation_id: Uuid,
    pub guest_id: Uuid,
    pub room_number: String,
    /// Planned arrival date.
    pub check_in_date: NaiveDate,
    /// Planned departure date.
    pub check_out_date: NaiveDate,
    pub created_utc: DateTime<Utc>,
}
