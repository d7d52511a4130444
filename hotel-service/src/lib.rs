//! hotel-service: guest lifecycle, invoicing and ledger reporting.

pub mod config;
pub mod handlers;
pub mod models;
pub mod reporting;
pub mod services;
pub mod startup;
