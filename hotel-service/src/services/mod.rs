//! Service layer: database access, metrics, bootstrap.

pub mod database;
pub mod metrics;
pub mod setup;

pub use database::{Database, GuestLedgerSnapshot};
pub use metrics::{get_metrics, init_metrics};
