pub mod conflict;
pub mod day;
pub mod schedule;
pub mod time_slot;

pub use conflict::{CheckConflictRequest, CheckConflictResponse, ConflictReport};
pub use day::Day;
pub use schedule::{Schedule, ScheduleWindow};
pub use time_slot::TimeSlot;
