//! Domain models for hotel-service.

mod guest;
mod invoice;
mod ledger;
mod reservation;
mod room;
mod stay;

pub use guest::{CreateGuest, Guest};
pub use invoice::{InvoiceStatus, SalesInvoice};
pub use ledger::GlEntry;
pub use reservation::Reservation;
pub use room::{Room, RoomEvent, RoomStatus, RoomSummary};
pub use stay::{CheckIn, CheckOut};
