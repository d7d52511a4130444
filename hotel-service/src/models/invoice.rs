//! Sales invoice model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice status. Invoices here are created and submitted in one atomic
/// step, so no draft state ever exists in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Submitted,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Submitted => "submitted",
        }
    }
}

/// Single-line sales invoice raised against a customer for a stay.
/// Submission posts the paired receivable/income ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesInvoice {
    pub invoice_id: Uuid,
    pub customer_id: Uuid,
    pub posting_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub item_code: String,
    pub item_name: String,
    pub description: Option<String>,
    pub qty: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub cost_center: String,
    pub status: String,
    pub created_utc: DateTime<Utc>,
    pub submitted_utc: Option<DateTime<Utc>>,
}
