// ABOUTME: Relative time ranges and their resolution into absolute half-open intervals
// ABOUTME: Day boundaries come from a chrono time zone; "now" is sampled once by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Time Ranges
//!
//! `Today` and `Yesterday` are aligned to calendar days in the configured zone,
//! while `LastDays(n)` is a sliding window ending at "now". Resolution is a pure
//! function of the range, the instant passed in, and the calendar.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pierre_health_core::{resolve, TimeRange};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
//! let today = resolve(&TimeRange::Today, &now);
//! assert_eq!(today.start, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
//! assert_eq!(today.end, now);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Days, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Abstract time specification supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeRange {
    /// From local midnight until now
    Today,
    /// The previous calendar day
    Yesterday,
    /// Sliding window covering the last `days` days up to now
    LastDays {
        /// Window length in calendar days
        days: u32,
    },
    /// Explicit interval, used verbatim
    Custom {
        /// Inclusive start
        start: DateTime<Utc>,
        /// Exclusive end
        end: DateTime<Utc>,
    },
}

impl TimeRange {
    /// Sliding window of `days` days ending now
    #[must_use]
    pub const fn last_days(days: u32) -> Self {
        Self::LastDays { days }
    }

    /// Explicit interval
    ///
    /// No validation or reordering is performed; an inverted interval simply
    /// matches nothing in the store.
    #[must_use]
    pub const fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::Custom { start, end }
    }

    /// Resolve against `now` using `calendar` for day boundaries
    #[must_use]
    pub fn resolve_in(&self, now: DateTime<Utc>, calendar: Calendar) -> DateInterval {
        calendar.resolve(self, now)
    }
}

/// Absolute half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// Exclusive end
    pub end: DateTime<Utc>,
}

impl DateInterval {
    /// Create an interval; bounds are kept as given
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside `[start, end)`
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether the interval covers no time (including inverted intervals)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the interval, negative when inverted
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Resolve `range` against a single sampled `now` in its own time zone
#[must_use]
pub fn resolve<Tz: TimeZone>(range: &TimeRange, now: &DateTime<Tz>) -> DateInterval {
    let end = now.with_timezone(&Utc);
    match *range {
        TimeRange::Today => DateInterval::new(start_of_day(now.date_naive(), &now.timezone()), end),
        TimeRange::Yesterday => {
            let today = now.date_naive();
            let today_start = start_of_day(today, &now.timezone());
            let yesterday_start = today
                .pred_opt()
                .map_or(today_start, |day| start_of_day(day, &now.timezone()));
            DateInterval::new(yesterday_start, today_start)
        }
        TimeRange::LastDays { days } => {
            let start = now
                .naive_local()
                .checked_sub_days(Days::new(u64::from(days)))
                .map_or(DateTime::<Utc>::MIN_UTC, |local| {
                    earliest_instant(local, &now.timezone())
                });
            DateInterval::new(start, end)
        }
        TimeRange::Custom { start, end } => DateInterval::new(start, end),
    }
}

/// First instant of `date` in `tz`
fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    earliest_instant(date.and_time(NaiveTime::MIN), tz)
}

/// Earliest instant matching the wall-clock time `local` in `tz`
///
/// Ambiguous times (DST fall-back) take the earlier offset. Times inside a
/// DST gap move forward to the first valid quarter hour after the gap.
fn earliest_instant<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(instant) = tz.from_local_datetime(&local).earliest() {
        return instant.with_timezone(&Utc);
    }

    (1..=24)
        .find_map(|quarter| {
            let shifted = local + Duration::minutes(quarter * 15);
            tz.from_local_datetime(&shifted).earliest()
        })
        .map_or_else(
            || Utc.from_utc_datetime(&local),
            |instant| instant.with_timezone(&Utc),
        )
}

/// Time zone used to place day boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Calendar {
    /// The host's local zone, including its DST rules
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset east of UTC
    Fixed {
        /// Offset in seconds east of UTC
        offset_seconds: i32,
    },
}

impl Calendar {
    /// Fixed-offset calendar, `None` when the offset is out of range
    #[must_use]
    pub fn fixed(offset_seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(offset_seconds).map(|_| Self::Fixed { offset_seconds })
    }

    /// Resolve `range` against `now` in this calendar's zone
    #[must_use]
    pub fn resolve(self, range: &TimeRange, now: DateTime<Utc>) -> DateInterval {
        match self {
            Self::Local => resolve(range, &now.with_timezone(&Local)),
            Self::Utc => resolve(range, &now),
            Self::Fixed { offset_seconds } => FixedOffset::east_opt(offset_seconds).map_or_else(
                || resolve(range, &now),
                |offset| resolve(range, &now.with_timezone(&offset)),
            ),
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed { offset_seconds } => {
                let sign = if *offset_seconds < 0 { '-' } else { '+' };
                let magnitude = offset_seconds.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", magnitude / 3600, (magnitude % 3600) / 60)
            }
        }
    }
}

impl FromStr for Calendar {
    type Err = ParseError;

    /// Accepts `local`, `utc`, `z`, or an offset such as `+05:30` / `-0800`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .and_then(Self::fixed)
            .ok_or_else(|| ParseError::new("calendar", s))
    }
}

fn parse_offset(raw: &str) -> Option<i32> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}
