//! # Rollcall Client
//!
//! The edge of the schedule editor that talks to the outside world.
//!
//! - **Config**: endpoint and timeout settings read from the environment
//! - **Conflict**: the fail-open conflict check against the admin panel backend
//! - **Form**: the class form's schedule section, wrapping the core builder

pub mod config;
pub mod conflict;
pub mod form;

pub use config::ClientConfig;
pub use conflict::{ConflictChecker, HttpConflictChecker};
pub use form::{ClassScheduleForm, SubmitDecision, Toast, ToastLevel};
