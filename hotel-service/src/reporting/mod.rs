//! Read-only reporting views: guest history reconciliation, running
//! balances and their display projections.

pub mod balance;
pub mod format;
pub mod history;

pub use balance::running_balances;
pub use format::DisplayFormatter;
pub use history::{reconcile_history, HistoryEntry, StayStatus};

use crate::models::GlEntry;
use rust_decimal::Decimal;
use serde::Serialize;

/// Wire shape of one formatted ledger row.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub posting_date: String,
    pub account: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
    pub voucher_type: String,
    pub voucher_no: String,
}

/// Wire shape of one formatted guest-history row.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub reservation: String,
    pub room: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<String>,
    pub actual_check_in: Option<String>,
    pub actual_check_out: Option<String>,
}

/// Label used when a walk-in carries no reservation reference at all.
pub const NO_RESERVATION: &str = "No Reservation";

/// Project ledger postings into display rows with running balances.
/// Debit and credit render as empty strings when absent or zero; the
/// balance column is always rendered.
pub fn ledger_rows(entries: &[GlEntry], formatter: &DisplayFormatter) -> Vec<LedgerRow> {
    let balances = running_balances(entries);
    entries
        .iter()
        .zip(balances)
        .map(|(entry, balance)| LedgerRow {
            posting_date: formatter.fmt_date(entry.posting_date),
            account: entry.account.clone(),
            debit: fmt_side(entry.debit, formatter),
            credit: fmt_side(entry.credit, formatter),
            balance: formatter.fmt_money(balance),
            voucher_type: entry.voucher_type.clone(),
            voucher_no: entry.voucher_no.clone(),
        })
        .collect()
}

fn fmt_side(side: Option<Decimal>, formatter: &DisplayFormatter) -> String {
    match side {
        Some(amount) if !amount.is_zero() => formatter.fmt_money(amount),
        _ => String::new(),
    }
}

/// Project reconciled history entries into display rows.
pub fn history_rows(entries: &[HistoryEntry], formatter: &DisplayFormatter) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|entry| HistoryRow {
            reservation: entry
                .reservation
                .map(|id| id.to_string())
                .unwrap_or_else(|| NO_RESERVATION.to_string()),
            room: entry.room.clone(),
            check_in_date: entry.check_in_date.map(|d| formatter.fmt_date(d)),
            check_out_date: entry.check_out_date.map(|d| formatter.fmt_date(d)),
            status: entry.status.map(|s| s.as_str().to_string()),
            total_amount: entry.total_amount.map(|a| formatter.fmt_money(a)),
            actual_check_in: entry.actual_check_in.map(|d| formatter.fmt_date(d)),
            actual_check_out: entry.actual_check_out.map(|d| formatter.fmt_date(d)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn formatter() -> DisplayFormatter {
        DisplayFormatter::new("USD", "%d-%m-%Y")
    }

    fn entry(day: u32, debit: Option<i64>, credit: Option<i64>) -> GlEntry {
        GlEntry {
            entry_id: Uuid::new_v4(),
            posting_date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            account: "Debtors".to_string(),
            debit: debit.map(Decimal::from),
            credit: credit.map(Decimal::from),
            voucher_type: "Sales Invoice".to_string(),
            voucher_no: "SI-0007".to_string(),
            customer_id: Uuid::new_v4(),
            created_utc: Utc::now(),
        }
    }

    #[test]
    fn ledger_rows_blank_absent_sides_but_always_render_balance() {
        let rows = ledger_rows(
            &[entry(1, Some(100), None), entry(2, None, Some(100))],
            &formatter(),
        );

        assert_eq!(rows[0].debit, "USD 100.00");
        assert_eq!(rows[0].credit, "");
        assert_eq!(rows[0].balance, "USD 100.00");
        assert_eq!(rows[1].debit, "");
        assert_eq!(rows[1].balance, "USD 0.00");
    }

    #[test]
    fn ledger_rows_treat_explicit_zero_as_blank() {
        let rows = ledger_rows(&[entry(1, Some(0), Some(40))], &formatter());

        assert_eq!(rows[0].debit, "");
        assert_eq!(rows[0].credit, "USD 40.00");
        assert_eq!(rows[0].balance, "USD -40.00");
    }

    #[test]
    fn history_rows_label_missing_reservation_reference() {
        let entry = HistoryEntry {
            reservation: None,
            room: "104".to_string(),
            check_in_date: None,
            check_out_date: None,
            status: Some(StayStatus::WalkIn),
            total_amount: Some(Decimal::from(90)),
            actual_check_in: NaiveDate::from_ymd_opt(2025, 2, 3),
            actual_check_out: None,
        };

        let rows = history_rows(&[entry], &formatter());

        assert_eq!(rows[0].reservation, NO_RESERVATION);
        assert_eq!(rows[0].status.as_deref(), Some("Walk-in"));
        assert_eq!(rows[0].total_amount.as_deref(), Some("USD 90.00"));
        assert_eq!(rows[0].actual_check_in.as_deref(), Some("03-02-2025"));
    }
}
