//! Running balance over ordered ledger postings.

use crate::models::GlEntry;
use rust_decimal::Decimal;

/// Compute the running balance for each posting: the cumulative net of
/// debits minus credits up to and including that row. Postings must
/// already be ordered by posting date ascending; missing debit/credit
/// sides count as zero.
pub fn running_balances(entries: &[GlEntry]) -> Vec<Decimal> {
    let mut balance = Decimal::ZERO;
    entries
        .iter()
        .map(|entry| {
            balance += entry.net();
            balance
        })
        .collect()
}
