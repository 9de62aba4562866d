use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use super::day::Day;
use super::time_slot::TimeSlot;
use crate::errors::ParseError;
use crate::parser;

/// Separator between slots in the canonical schedule string.
pub const SLOT_SEPARATOR: &str = ", ";

/// An ordered list of time slots.
///
/// Slots stay in the order they were added; only the days inside each
/// slot are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    slots: Vec<TimeSlot>,
}

/// A slot placed on a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub days: BTreeSet<Day>,
    pub label: String,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best-effort parse; malformed entries are logged and dropped.
    pub fn parse(input: &str) -> Self {
        parser::parse(input).into_iter().collect()
    }

    /// Parses only when every entry is well formed.
    pub fn parse_strict(input: &str) -> Result<Self, ParseError> {
        parser::validate(input)?;
        Ok(Self::parse(input))
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.id() == id)
    }

    pub fn push(&mut self, slot: TimeSlot) {
        self.slots.push(slot);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<TimeSlot> {
        let index = self.slots.iter().position(|slot| slot.id() == id)?;
        Some(self.slots.remove(index))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Canonical string form, e.g. `MWF 10:00 AM-12:00 PM, TTh 1:00 PM-2:30 PM`.
    ///
    /// An empty schedule formats as an empty string.
    pub fn format(&self) -> String {
        self.slots
            .iter()
            .map(TimeSlot::to_string)
            .collect::<Vec<_>>()
            .join(SLOT_SEPARATOR)
    }

    /// Same multiset of (days, start, end) blocks, ignoring ids and order.
    pub fn equivalent(&self, other: &Schedule) -> bool {
        let mut ours: Vec<_> = self.slots.iter().map(TimeSlot::block_key).collect();
        let mut theirs: Vec<_> = other.slots.iter().map(TimeSlot::block_key).collect();
        ours.sort();
        theirs.sort();
        ours == theirs
    }

    /// The first slot meeting on the date's weekday, falling back to the
    /// first slot of the schedule.
    pub fn slot_for_date(&self, date: NaiveDate) -> Option<&TimeSlot> {
        let day = Day::for_date(date);
        self.slots
            .iter()
            .find(|slot| slot.meets_on(day))
            .or_else(|| self.slots.first())
    }

    pub fn resolve_window(&self, date: NaiveDate) -> Option<ScheduleWindow> {
        let slot = self.slot_for_date(date)?;
        let start = date.and_time(slot.start_time());
        let mut end = date.and_time(slot.end_time());
        if end <= start {
            end += Duration::days(1);
        }

        Some(ScheduleWindow {
            start,
            end,
            duration_minutes: slot.duration_minutes(),
            days: slot.days().clone(),
            label: slot.to_string(),
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromIterator<TimeSlot> for Schedule {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
