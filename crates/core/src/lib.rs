//! # Rollcall Core
//!
//! The schedule model behind the class editor of the attendance admin panel.
//!
//! A class meets in one or more time slots, each a set of weekdays sharing a
//! start and end time. Slots are exchanged with the backend as a single
//! human-readable string such as `MWF 10:00 AM-12:00 PM, TTh 1:00 PM-2:30 PM`.
//!
//! - **Models**: day codes, [`TimeSlot`], [`Schedule`] and its formatter
//! - **Parser**: reads stored schedule strings back into slots
//! - **Builder**: the editing session that owns the slot list while the editor is open
//!
//! Nothing here performs I/O. The conflict check lives in `rollcall-client`.

pub mod builder;
/// Error types shared by the builder, parser and client
pub mod errors;
pub mod models;
pub mod parser;

pub use builder::ScheduleBuilder;
pub use errors::{ParseError, ScheduleError, ScheduleResult, ValidationError};
pub use models::{Day, Schedule, TimeSlot};
