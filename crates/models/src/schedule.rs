use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Accepted 24-hour input formats for schedule times
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// 12-hour display format without a leading zero (e.g. "8:00 AM")
const DISPLAY_FORMAT: &str = "%-I:%M %p";

/// Reasons a schedule entry draft is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule day must not be blank")]
    BlankDay,
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("end time {end} is not after start time {start}")]
    EndNotAfterStart { start: NaiveTime, end: NaiveTime },
}

/// Parses a 24-hour time string as stored by the data store
pub fn parse_time(value: &str) -> Result<NaiveTime, ScheduleError> {
    let value = value.trim();

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ScheduleError::InvalidTime(value.to_owned()))
}

/// Renders a time as "h:mm AM/PM"
pub fn format_time_12h(time: NaiveTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Represents a time range for a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub begin: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new `TimeRange` if `begin` is before `end`
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Option<Self> {
        (begin < end).then_some(Self { begin, end })
    }

    /// Parses two 24-hour time strings into a validated range
    pub fn from_strings(begin: &str, end: &str) -> Result<Self, ScheduleError> {
        let begin = parse_time(begin)?;
        let end = parse_time(end)?;

        Self::new(begin, end).ok_or(ScheduleError::EndNotAfterStart { start: begin, end })
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            format_time_12h(self.begin),
            format_time_12h(self.end)
        )
    }
}

/// One weekly meeting of a section offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day name as entered (e.g. "mon", "Monday")
    pub day: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: Option<String>,
}

impl ScheduleEntry {
    /// Validates a draft entry coming from user input
    pub fn parse(
        day: &str,
        start: &str,
        end: &str,
        room: Option<&str>,
    ) -> Result<Self, ScheduleError> {
        let day = day.trim();
        if day.is_empty() {
            return Err(ScheduleError::BlankDay);
        }

        let range = TimeRange::from_strings(start, end)?;

        Ok(Self {
            day: day.to_owned(),
            start: range.begin,
            end: range.end,
            room: room
                .map(str::trim)
                .filter(|room| !room.is_empty())
                .map(str::to_owned),
        })
    }

    /// Builds an entry from an already stored row.
    ///
    /// Rows written before end-after-start was enforced are kept as they are,
    /// so every stored meeting still shows up in the assembled schedule.
    pub fn from_stored(
        day: String,
        start: NaiveTime,
        end: NaiveTime,
        room: Option<String>,
    ) -> Self {
        Self {
            day,
            start,
            end,
            room,
        }
    }

    /// The room, if one is set and not blank
    pub fn room(&self) -> Option<&str> {
        self.room
            .as_deref()
            .map(str::trim)
            .filter(|room| !room.is_empty())
    }
}

impl Display for ScheduleEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {}-{}",
            self.day.trim().to_uppercase(),
            format_time_12h(self.start),
            format_time_12h(self.end)
        )?;

        match self.room() {
            Some(room) => write!(f, " ({room})"),
            None => Ok(()),
        }
    }
}
