//! Actual stay records: check-ins and check-outs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Record of a guest's actual arrival and the charges for the stay.
///
/// `reservation_id` may reference a reservation that no longer exists;
/// such check-ins are still reported (as walk-ins) by the history view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckIn {
    pub check_in_id: Uuid,
    pub guest_id: Uuid,
    pub reservation_id: Option<Uuid>,
    pub room_number: String,
    /// Actual arrival date.
    pub check_in_date: NaiveDate,
    /// Actual departure date, once recorded on the check-in itself.
    pub check_out_date: Option<NaiveDate>,
    pub nights: i32,
    pub total_charge: Decimal,
    pub sales_invoice_id: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}

/// Record of a guest's actual departure.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckOut {
    pub check_out_id: Uuid,
    pub check_in_id: Uuid,
    pub guest_id: Uuid,
    pub check_out_time: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}
