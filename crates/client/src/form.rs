use rollcall_core::{
    builder::{ScheduleBuilder, ScheduleView},
    models::Day,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::conflict::ConflictChecker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Send `schedule` as the class record's `schedule` attribute.
    Proceed {
        schedule: String,
        notice: Option<String>,
    },
    /// The schedule overlaps another class.
    Blocked { message: String },
}

/// Schedule section of the class create/edit form.
///
/// Wraps a [`ScheduleBuilder`] and translates its results into what the
/// page shows: toasts for rejected input and the hidden `schedule` field.
/// A fresh form is opened for every modal, so nothing leaks between
/// consecutive edits.
#[derive(Debug, Default)]
pub struct ClassScheduleForm {
    builder: ScheduleBuilder,
    toasts: Vec<Toast>,
}

impl ClassScheduleForm {
    pub fn open_for_create() -> Self {
        Self::default()
    }

    pub fn open_for_edit(stored: &str) -> Self {
        Self {
            builder: ScheduleBuilder::from_schedule_str(stored),
            toasts: Vec::new(),
        }
    }

    pub fn builder(&self) -> &ScheduleBuilder {
        &self.builder
    }

    pub fn view(&self) -> ScheduleView {
        self.builder.view()
    }

    /// Value of the hidden `schedule` input.
    pub fn schedule_field(&self) -> &str {
        self.builder.staged_value()
    }

    pub fn toggle_day(&mut self, day: Day, checked: bool) {
        self.builder.toggle_day(day, checked);
    }

    /// Adds a slot for the ticked days. Rejected input becomes a warning toast.
    pub fn add_time(&mut self, start: &str, end: &str, overnight: bool) -> Option<Uuid> {
        match self.builder.add_selected_slot(start, end, overnight) {
            Ok(slot) => Some(slot.id()),
            Err(err) => {
                self.toasts.push(Toast::warning(err.to_string()));
                None
            }
        }
    }

    pub fn remove_time(&mut self, id: Uuid) {
        self.builder.remove_slot(id);
    }

    pub fn reset(&mut self) {
        self.builder.reset_all();
    }

    /// Drains pending notifications.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    /// Runs the conflict check once and decides whether the form may be sent.
    pub async fn prepare_submit<C>(&mut self, checker: &C) -> SubmitDecision
    where
        C: ConflictChecker + ?Sized,
    {
        let report = checker.check_conflicts(self.builder.schedule()).await;

        if report.has_conflict {
            info!(message = %report.message, "Submit blocked by schedule conflict");
            self.toasts.push(Toast::error(report.message.clone()));
            return SubmitDecision::Blocked {
                message: report.message,
            };
        }

        let notice = (!report.message.is_empty()).then_some(report.message);
        if let Some(message) = &notice {
            self.toasts.push(Toast::info(message.clone()));
        }

        SubmitDecision::Proceed {
            schedule: self.schedule_field().to_string(),
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate;
    use pretty_assertions::assert_eq;
    use rollcall_core::models::{ConflictReport, Schedule};

    use super::*;
    use crate::conflict::MockConflictChecker;

    #[test]
    fn add_time_without_days_warns() {
        let mut form = ClassScheduleForm::open_for_create();

        assert_eq!(form.add_time("09:00", "10:00", false), None);
        assert_eq!(
            form.take_toasts(),
            vec![Toast::warning("Please select at least one day")]
        );
        assert!(form.take_toasts().is_empty());
        assert_eq!(form.schedule_field(), "");
    }

    #[test]
    fn add_and_remove_updates_field() {
        let mut form = ClassScheduleForm::open_for_create();
        form.toggle_day(Day::Tuesday, true);
        form.toggle_day(Day::Thursday, true);

        let id = form.add_time("13:00", "14:30", false).expect("slot added");
        assert_eq!(form.schedule_field(), "TTh 1:00 PM-2:30 PM");

        form.remove_time(id);
        assert_eq!(form.schedule_field(), "");
        assert!(form.take_toasts().is_empty());
    }

    #[test]
    fn reset_clears_edit_session() {
        let mut form = ClassScheduleForm::open_for_edit("MWF 10:00 AM-12:00 PM");
        assert_eq!(form.view().rows.len(), 1);

        form.reset();
        assert_eq!(form.schedule_field(), "");
        assert!(form.view().empty_message.is_some());
    }

    #[tokio::test]
    async fn conflict_blocks_submit() {
        let mut form = ClassScheduleForm::open_for_edit("MWF 10:00 AM-12:00 PM");
        let mut checker = MockConflictChecker::new();
        checker
            .expect_check_conflicts()
            .withf(|schedule: &Schedule| schedule.format() == "MWF 10:00 AM-12:00 PM")
            .times(1)
            .returning(|_| ConflictReport {
                has_conflict: true,
                message: "Schedule conflict in Room 310".to_string(),
            });

        let decision = form.prepare_submit(&checker).await;

        assert_eq!(
            decision,
            SubmitDecision::Blocked {
                message: "Schedule conflict in Room 310".to_string()
            }
        );
        assert_eq!(form.take_toasts()[0].level, ToastLevel::Error);
    }

    #[tokio::test]
    async fn fail_open_report_proceeds_with_notice() {
        let mut form = ClassScheduleForm::open_for_edit("TTh 1:00 PM-2:30 PM");
        let mut checker = MockConflictChecker::new();
        checker
            .expect_check_conflicts()
            .times(1)
            .returning(|_| ConflictReport::fail_open("Could not check for schedule conflicts"));

        let decision = form.prepare_submit(&checker).await;

        assert_eq!(
            decision,
            SubmitDecision::Proceed {
                schedule: "TTh 1:00 PM-2:30 PM".to_string(),
                notice: Some("Could not check for schedule conflicts".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn clear_report_proceeds_silently() {
        let mut form = ClassScheduleForm::open_for_create();
        let mut checker = MockConflictChecker::new();
        checker
            .expect_check_conflicts()
            .with(predicate::eq(Schedule::new()))
            .times(1)
            .returning(|_| ConflictReport::clear());

        let decision = form.prepare_submit(&checker).await;

        assert_eq!(
            decision,
            SubmitDecision::Proceed {
                schedule: String::new(),
                notice: None,
            }
        );
        assert!(form.take_toasts().is_empty());
    }
}
