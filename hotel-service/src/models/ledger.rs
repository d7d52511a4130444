//! General ledger entry model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One double-entry accounting line tied to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GlEntry {
    pub entry_id: Uuid,
    pub posting_date: NaiveDate,
    pub account: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub voucher_type: String,
    pub voucher_no: String,
    pub customer_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl GlEntry {
    /// Net effect of this entry, treating missing sides as zero.
    pub fn net(&self) -> Decimal {
        self.debit.unwrap_or(Decimal::ZERO) - self.credit.unwrap_or(Decimal::ZERO)
    }
}
