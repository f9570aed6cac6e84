//! ICS export of scholarship deadlines.

mod generate;

pub use generate::{event_uid, generate_ics};
