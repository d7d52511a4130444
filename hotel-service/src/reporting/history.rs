//! Guest stay history reconciliation.
//!
//! Merges three independently-keyed record sets (reservations, check-ins,
//! check-outs) into one chronological narrative. Reservations are matched
//! to check-ins by reservation reference; check-ins left over after the
//! match are classified as walk-ins.

use crate::models::{CheckIn, CheckOut, Reservation};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::collections::VecDeque;
use uuid::Uuid;

/// Classification of a history entry, where one applies. Entries produced
/// from a reservation carry no status; only unmatched check-ins are tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayStatus {
    WalkIn,
}

impl StayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayStatus::WalkIn => "Walk-in",
        }
    }
}

/// One row of the unified guest history, unformatted. Display projection
/// happens separately in [`super::history_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Reservation reference. `None` for a walk-in with no reference at
    /// all; a dangling reference (no such reservation loaded) is kept
    /// as-is so the report shows what the check-in claimed.
    pub reservation: Option<Uuid>,
    pub room: String,
    /// Planned arrival, from the reservation.
    pub check_in_date: Option<NaiveDate>,
    /// Planned departure, from the reservation.
    pub check_out_date: Option<NaiveDate>,
    pub status: Option<StayStatus>,
    pub total_amount: Option<Decimal>,
    pub actual_check_in: Option<NaiveDate>,
    pub actual_check_out: Option<NaiveDate>,
}

/// Merge stay records into a unified history, most recent first.
///
/// Inputs must be pre-ordered: reservations by planned check-in date
/// descending, check-ins by actual check-in date descending, check-outs by
/// check-out time descending. Matching is first-match-wins in that order:
/// each reservation consumes at most one check-in, and a consumed check-in
/// never reappears as a walk-in.
pub fn reconcile_history(
    reservations: &[Reservation],
    check_ins: &[CheckIn],
    check_outs: &[CheckOut],
) -> Vec<HistoryEntry> {
    // Index check-ins by reservation reference once, keeping list order
    // per key so the first loaded check-in still wins the match.
    let mut by_reservation: HashMap<Uuid, VecDeque<usize>> = HashMap::new();
    for (idx, check_in) in check_ins.iter().enumerate() {
        if let Some(reference) = check_in.reservation_id {
            by_reservation.entry(reference).or_default().push_back(idx);
        }
    }

    let mut consumed = vec![false; check_ins.len()];
    let mut history = Vec::with_capacity(reservations.len());

    for reservation in reservations {
        let mut entry = HistoryEntry {
            reservation: Some(reservation.reservation_id),
            room: reservation.room_number.clone(),
            check_in_date: Some(reservation.check_in_date),
            check_out_date: Some(reservation.check_out_date),
            status: None,
            total_amount: None,
            actual_check_in: None,
            actual_check_out: None,
        };

        if let Some(queue) = by_reservation.get_mut(&reservation.reservation_id) {
            if let Some(idx) = queue.pop_front() {
                let check_in = &check_ins[idx];
                consumed[idx] = true;

                entry.actual_check_in = Some(check_in.check_in_date);
                entry.actual_check_out = check_in.check_out_date;
                entry.total_amount = Some(check_in.total_charge);

                // The guest may have been moved to a different room on
                // arrival; the actual room wins.
                if !check_in.room_number.is_empty()
                    && check_in.room_number != reservation.room_number
                {
                    entry.room = check_in.room_number.clone();
                }
            }
        }

        history.push(entry);
    }

    // Check-ins not claimed by any loaded reservation surface as walk-ins.
    // This includes check-ins whose reservation reference is dangling.
    for (idx, check_in) in check_ins.iter().enumerate() {
        if consumed[idx] {
            continue;
        }

        let actual_check_out = check_outs
            .iter()
            .find(|check_out| check_out.check_in_id == check_in.check_in_id)
            .map(|check_out| check_out.check_out_time.date_naive());

        history.push(HistoryEntry {
            reservation: check_in.reservation_id,
            room: check_in.room_number.clone(),
            check_in_date: None,
            check_out_date: None,
            status: Some(StayStatus::WalkIn),
            total_amount: Some(check_in.total_charge),
            actual_check_in: Some(check_in.check_in_date),
            actual_check_out,
        });
    }

    history
}
