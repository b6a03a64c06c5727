//! Lab-fair presentation scheduler.
//!
//! Spreads each laboratory's students across the sessions of an event with a
//! round-robin pass, then fills leftover capacity in student-number order.

mod core;
mod state;

pub use core::{schedule, schedule_with_config, SchedulingError};
pub use state::GroupQueues;
