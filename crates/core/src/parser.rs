//! # Schedule String Parser
//!
//! Turns stored schedule strings such as `MWF 10:00 AM-12:00 PM, TTh 1:00 PM-2:30 PM`
//! back into [`TimeSlot`]s.
//!
//! ## Grammar
//!
//! Entries are separated by commas. Each entry is
//!
//! ```text
//! <day letters> <whitespace> <H:MM>[ AM|PM] - <H:MM> AM|PM
//! ```
//!
//! Day letters are read left to right, preferring the two-letter codes
//! `Th` and `Su` over single letters, so `TTh` is Tuesday and Thursday.
//! Matching is case-insensitive.
//!
//! The entry pattern lets the start time omit its AM/PM suffix, but the
//! time parser always requires one. An entry written that way is
//! therefore dropped. This asymmetry is kept on purpose so stored data
//! behaves the same as it always has.
//!
//! ## Failure policy
//!
//! [`parse`] is best effort: an entry that does not match the grammar, or
//! whose times do not parse, is logged and skipped while the remaining
//! entries are still returned. [`validate`] is the strict counterpart and
//! reports the first problem instead.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use tracing::warn;

use crate::errors::ParseError;
use crate::models::day::Day;
use crate::models::schedule::SLOT_SEPARATOR;
use crate::models::time_slot::TimeSlot;

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)\s+([0-9]{1,2}:[0-9]{2}(?:\s*[ap]m)?)\s*-\s*([0-9]{1,2}:[0-9]{2}\s*[ap]m)$")
        .expect("entry pattern is valid")
});

static TIME_12H_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2}):([0-9]{2})\s*([ap]m)$").expect("time pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayToken {
    Known(Day),
    Unknown(char),
}

/// Reads day letters, longest match first.
fn scan_days(letters: &str) -> Vec<DayToken> {
    let chars: Vec<char> = letters.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut idx = 0;

    while idx < chars.len() {
        let current = chars[idx].to_ascii_uppercase();
        let next = chars.get(idx + 1).map(char::to_ascii_uppercase);

        let pair = match (current, next) {
            ('T', Some('H')) => Some(Day::Thursday),
            ('S', Some('U')) => Some(Day::Sunday),
            _ => None,
        };
        if let Some(day) = pair {
            tokens.push(DayToken::Known(day));
            idx += 2;
            continue;
        }

        let token = match current {
            'M' => DayToken::Known(Day::Monday),
            'T' => DayToken::Known(Day::Tuesday),
            'W' => DayToken::Known(Day::Wednesday),
            'F' => DayToken::Known(Day::Friday),
            'S' => DayToken::Known(Day::Saturday),
            _ => DayToken::Unknown(chars[idx]),
        };
        tokens.push(token);
        idx += 1;
    }

    tokens
}

/// Converts a 12-hour token (`1:30 PM`) to a time of day.
///
/// The hour must be 1 through 12 and the AM/PM suffix is required.
pub fn parse_time_12h(token: &str) -> Result<NaiveTime, ParseError> {
    let invalid = || ParseError::Time(token.to_string());

    let captures = TIME_12H_REGEX.captures(token.trim()).ok_or_else(invalid)?;
    let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minute: u32 = captures[2].parse().map_err(|_| invalid())?;
    let is_pm = captures[3].eq_ignore_ascii_case("pm");

    if !(1..=12).contains(&hour) {
        return Err(invalid());
    }

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn parse_entry_with(entry: &str, strict: bool) -> Result<TimeSlot, ParseError> {
    let captures = ENTRY_REGEX
        .captures(entry)
        .ok_or_else(|| ParseError::Entry(entry.to_string()))?;

    let start_time = parse_time_12h(&captures[2])?;
    let end_time = parse_time_12h(&captures[3])?;

    let mut days = BTreeSet::new();
    for token in scan_days(&captures[1]) {
        match token {
            DayToken::Known(day) => {
                days.insert(day);
            }
            DayToken::Unknown(letter) if strict => {
                return Err(ParseError::UnknownDay {
                    day: letter.to_string(),
                    entry: entry.to_string(),
                });
            }
            DayToken::Unknown(letter) => {
                warn!(%letter, %entry, "Ignoring unrecognized day letter");
            }
        }
    }

    if days.is_empty() {
        return Err(ParseError::NoDays(entry.to_string()));
    }

    TimeSlot::new(days, start_time, end_time)
        .map_err(|_| ParseError::ZeroLength(entry.to_string()))
}

/// Parses one comma-free entry, skipping unknown day letters.
pub fn parse_entry(entry: &str) -> Result<TimeSlot, ParseError> {
    parse_entry_with(entry.trim(), false)
}

fn entries(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Lazily parses each entry, keeping per-entry failures.
pub fn parse_entries(input: &str) -> impl Iterator<Item = Result<TimeSlot, ParseError>> + '_ {
    entries(input).map(|entry| parse_entry_with(entry, false))
}

/// Best-effort parse of a full schedule string.
///
/// Every returned slot has a fresh id. Order follows the input.
pub fn parse(input: &str) -> Vec<TimeSlot> {
    parse_entries(input)
        .filter_map(|result| match result {
            Ok(slot) => Some(slot),
            Err(err) => {
                warn!(error = %err, "Skipping schedule entry");
                None
            }
        })
        .collect()
}

/// Strict check of a schedule string before it is sent anywhere.
pub fn validate(input: &str) -> Result<(), ParseError> {
    let mut seen = 0;
    for entry in entries(input) {
        parse_entry_with(entry, true)?;
        seen += 1;
    }

    if seen == 0 {
        return Err(ParseError::Empty);
    }
    Ok(())
}

/// Rewrites every parseable entry in canonical form and keeps the rest verbatim.
///
/// `TMW 10:00 am-12:00 pm` becomes `MTW 10:00 AM-12:00 PM`.
pub fn normalize(input: &str) -> String {
    entries(input)
        .map(|entry| match parse_entry_with(entry, false) {
            Ok(slot) => slot.to_string(),
            Err(err) => {
                warn!(error = %err, "Keeping schedule entry as written");
                entry.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(SLOT_SEPARATOR)
}
