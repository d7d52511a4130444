//! HTTP handlers for the hotel-service API.

pub mod guests;
pub mod invoices;
pub mod ledger;
pub mod rooms;
