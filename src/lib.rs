//! # school-days
//!
//! Counts remaining school days (weekdays minus a fixed holiday list) toward
//! a fixed end-of-term date and serves the breakdown as JSON.
//!
//! ## Modules
//!
//! - `calendar` - Pure school-day arithmetic over date ranges
//! - `config` - Immutable calendar configuration (holidays, target, schedules)
//! - `server` - Axum HTTP layer serving the landing page and JSON endpoints
//! - `error` - Library error type

pub mod calendar;
pub mod config;
pub mod error;
pub mod server;

pub use error::{Error, Result};
