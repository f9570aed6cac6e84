//! Core types for scholarship-finder.
//!
//! - `scholarship`: the scholarship catalog and its records
//! - `event_index` / `month_grid`: calendar view over due dates
//! - `credentials`: account storage and password verification
//! - `profile`: the student profile collected by the form

pub mod config;
pub mod credentials;
pub mod date_range;
pub mod error;
pub mod event_index;
pub mod ics;
pub mod month_grid;
pub mod profile;
pub mod scholarship;

pub use error::{ScholarError, ScholarResult};
