//! Display formatting for dates and monetary amounts.
//!
//! Formatting is a projection over already-merged report data, never part
//! of the merge itself. The formatter is constructed from the `[locale]`
//! configuration section and handed to the report handlers, so the
//! reconciliation and balance logic stay free of locale concerns.

use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    currency: String,
    date_format: String,
}

impl DisplayFormatter {
    pub fn new(currency: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            date_format: date_format.into(),
        }
    }

    /// Render an amount as `<CUR> 1,234.50`, with a leading minus sign for
    /// negative values.
    pub fn fmt_money(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        format!(
            "{} {}{}.{}",
            self.currency,
            sign,
            group_thousands(int_part),
            frac_part
        )
    }

    pub fn fmt_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
