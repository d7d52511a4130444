//! Guest and customer master models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A hotel guest. Registration links every guest to a customer master so
/// that accounting postings can be keyed by customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guest {
    pub guest_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_id: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}

/// Input for registering a guest.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
