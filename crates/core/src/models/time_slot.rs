use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::day::{join_codes, Day};
use crate::errors::ValidationError;

/// `HH:MM`, the internal 24-hour form.
pub const TIME_24H_FORMAT: &str = "%H:%M";
/// `H:MM AM`, the form used in schedule strings.
pub const TIME_12H_FORMAT: &str = "%-I:%M %p";

const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn format_24h(time: NaiveTime) -> String {
    time.format(TIME_24H_FORMAT).to_string()
}

/// Renders `13:30` as `1:30 PM`, `00:05` as `12:05 AM`.
pub fn format_12h(time: NaiveTime) -> String {
    time.format(TIME_12H_FORMAT).to_string()
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_24h(*time))
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// One block of a class schedule: a set of days sharing a start and end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    id: Uuid,
    days: BTreeSet<Day>,
    #[serde(serialize_with = "serialize_hhmm")]
    start_time: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    end_time: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot with a fresh id.
    ///
    /// An end time earlier than the start time is accepted and makes the
    /// slot overnight. Whether a same-day slot must end after it starts is
    /// the caller's decision; see `ScheduleBuilder::add_slot`.
    pub fn new<I>(days: I, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Day>,
    {
        let days: BTreeSet<Day> = days.into_iter().collect();
        if days.is_empty() {
            return Err(ValidationError::NoDaySelected);
        }

        let start_time = truncate_to_minute(start_time);
        let end_time = truncate_to_minute(end_time);
        if start_time == end_time {
            return Err(ValidationError::ZeroLength);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            days,
            start_time,
            end_time,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn days(&self) -> &BTreeSet<Day> {
        &self.days
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn meets_on(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    /// True when the slot ends after midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        let minutes = self.end_time.signed_duration_since(self.start_time).num_minutes();
        if minutes <= 0 {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }

    /// `MWF`
    pub fn days_label(&self) -> String {
        join_codes(&self.days)
    }

    /// `10:00 AM-12:00 PM`
    pub fn time_range_label(&self) -> String {
        format!("{}-{}", format_12h(self.start_time), format_12h(self.end_time))
    }

    /// Same days and times, ignoring the id.
    pub fn same_block(&self, other: &TimeSlot) -> bool {
        self.days == other.days
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }

    pub(crate) fn block_key(&self) -> (BTreeSet<Day>, NaiveTime, NaiveTime) {
        (self.days.clone(), self.start_time, self.end_time)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days_label(), self.time_range_label())
    }
}
