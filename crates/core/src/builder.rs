use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::models::day::Day;
use crate::models::schedule::Schedule;
use crate::models::time_slot::{TIME_24H_FORMAT, TimeSlot, format_12h};

pub const EMPTY_STATE_MESSAGE: &str = "No time slots added";

/// One rendered row of the slot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    pub id: Uuid,
    pub days: String,
    pub day_names: String,
    pub time_range: String,
    pub overnight: bool,
}

/// Everything the slot list needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub rows: Vec<SlotRow>,
    pub empty_message: Option<&'static str>,
    pub value: String,
}

/// Editing session for one open schedule editor.
///
/// Holds the slot list, the days currently ticked in the day picker,
/// and the canonical string staged for the surrounding form. The staged
/// value is recomputed after every mutation.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    schedule: Schedule,
    selected_days: BTreeSet<Day>,
    staged: String,
}

/// Reads a 24-hour `HH:MM` value as produced by a time input.
fn parse_time_input(value: &str, missing: ValidationError) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(missing);
    }
    NaiveTime::parse_from_str(value, TIME_24H_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

impl ScheduleBuilder {
    /// Empty session, used when creating a class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-filled from a stored schedule, used when editing a class.
    pub fn from_schedule_str(stored: &str) -> Self {
        let mut builder = Self::new();
        builder.load(stored);
        builder
    }

    /// Discards the current state and loads a stored schedule string.
    pub fn load(&mut self, stored: &str) {
        self.reset_all();
        self.schedule = Schedule::parse(stored);
        self.recompute();
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn selected_days(&self) -> &BTreeSet<Day> {
        &self.selected_days
    }

    /// Value for the hidden `schedule` form field.
    pub fn staged_value(&self) -> &str {
        &self.staged
    }

    pub fn toggle_day(&mut self, day: Day, checked: bool) {
        if checked {
            self.selected_days.insert(day);
        } else {
            self.selected_days.remove(&day);
        }
    }

    /// Adds a same-day slot. The end time must be after the start time.
    pub fn add_slot<I>(&mut self, days: I, start: &str, end: &str) -> Result<TimeSlot, ValidationError>
    where
        I: IntoIterator<Item = Day>,
    {
        self.insert(days.into_iter().collect(), start, end, false)
    }

    /// Adds a slot that may run past midnight (end earlier than start).
    pub fn add_overnight_slot<I>(
        &mut self,
        days: I,
        start: &str,
        end: &str,
    ) -> Result<TimeSlot, ValidationError>
    where
        I: IntoIterator<Item = Day>,
    {
        self.insert(days.into_iter().collect(), start, end, true)
    }

    /// Adds a slot for the ticked days and clears the picker on success.
    pub fn add_selected_slot(
        &mut self,
        start: &str,
        end: &str,
        overnight: bool,
    ) -> Result<TimeSlot, ValidationError> {
        let days = self.selected_days.clone();
        let slot = self.insert(days, start, end, overnight)?;
        self.selected_days.clear();
        Ok(slot)
    }

    fn insert(
        &mut self,
        days: BTreeSet<Day>,
        start: &str,
        end: &str,
        overnight: bool,
    ) -> Result<TimeSlot, ValidationError> {
        if days.is_empty() {
            return Err(ValidationError::NoDaySelected);
        }
        let start_time = parse_time_input(start, ValidationError::MissingStartTime)?;
        let end_time = parse_time_input(end, ValidationError::MissingEndTime)?;

        if !overnight && end_time <= start_time {
            return Err(ValidationError::EndNotAfterStart);
        }

        let slot = TimeSlot::new(days, start_time, end_time)?;
        debug!(id = %slot.id(), slot = %slot, "Added time slot");
        self.schedule.push(slot.clone());
        self.recompute();
        Ok(slot)
    }

    /// Removes a slot. Unknown ids are ignored.
    pub fn remove_slot(&mut self, id: Uuid) {
        if self.schedule.remove(id).is_some() {
            debug!(%id, "Removed time slot");
        }
        self.recompute();
    }

    pub fn reset_all(&mut self) {
        self.schedule.clear();
        self.selected_days.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.staged = self.schedule.format();
    }

    pub fn view(&self) -> ScheduleView {
        let rows: Vec<SlotRow> = self
            .schedule
            .slots()
            .iter()
            .map(|slot| SlotRow {
                id: slot.id(),
                days: slot.days_label(),
                day_names: slot
                    .days()
                    .iter()
                    .map(|day| day.name())
                    .collect::<Vec<_>>()
                    .join(", "),
                time_range: format!(
                    "{} - {}",
                    format_12h(slot.start_time()),
                    format_12h(slot.end_time())
                ),
                overnight: slot.is_overnight(),
            })
            .collect();

        ScheduleView {
            empty_message: rows.is_empty().then_some(EMPTY_STATE_MESSAGE),
            rows,
            value: self.staged.clone(),
        }
    }
}
