//! Conversion between wall-clock readings in a named zone and absolute instants.
//!
//! Everything downstream of this module compares [`Instant`]s only. The zone an
//! event was authored in is kept as a display label and never takes part in
//! ordering or change detection.

use {
    super::error::CalendarError,
    chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc},
    chrono_tz::Tz,
    serde::{Deserialize, Serialize},
    std::{cmp::Ordering, fmt, str::FromStr},
};

/// An absolute point in time.
pub type Instant = DateTime<Utc>;

/// Subsecond digits kept by storage (`TIMESTAMPTZ` holds microseconds).
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Drops precision storage cannot keep, so a value reads back exactly as written.
pub fn at_storage_precision(instant: Instant) -> Instant {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Current instant at storage precision.
pub fn now() -> Instant {
    at_storage_precision(Utc::now())
}

/// A validated IANA zone name, e.g. `America/New_York`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Zone(Tz);

impl Zone {
    pub const UTC: Zone = Zone(Tz::UTC);

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Interpret `date` (`YYYY-MM-DD`) and `time` (`HH:MM` or `HH:MM:SS`) as a
    /// wall-clock reading in this zone.
    ///
    /// Readings skipped by a DST jump are rejected. Readings that occur twice
    /// (fall-back hour) resolve to the earlier instant.
    pub fn to_instant(&self, date: &str, time: &str) -> Result<Instant, CalendarError> {
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            CalendarError::InvalidDateTime(format!("date must be YYYY-MM-DD, got: {date}"))
        })?;
        let clock = parse_clock(time)?;

        match self.0.from_local_datetime(&day.and_time(clock)) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(CalendarError::InvalidDateTime(format!(
                "{date} {time} does not exist in {}",
                self.name()
            ))),
        }
    }

    pub fn format(&self, instant: &Instant) -> String {
        instant
            .with_timezone(&self.0)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string()
    }
}

fn parse_clock(time: &str) -> Result<NaiveTime, CalendarError> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| CalendarError::InvalidDateTime(format!("time must be HH:MM, got: {time}")))
}

impl Default for Zone {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| CalendarError::InvalidTimezone(s.to_string()))
    }
}

impl TryFrom<String> for Zone {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.name().to_string()
    }
}

/// `toInstant(date, time, timezone)`.
pub fn to_instant(date: &str, time: &str, timezone: &str) -> Result<Instant, CalendarError> {
    timezone.parse::<Zone>()?.to_instant(date, time)
}

/// Orders two instants regardless of the zones they were authored in.
pub fn compare_instants(a: &Instant, b: &Instant) -> Ordering {
    a.cmp(b)
}

/// Display-only projection of an instant into a zone.
pub fn format_for_zone(instant: &Instant, zone: &Zone) -> String {
    zone.format(instant)
}

/// A start or end time as submitted by a client: either an absolute RFC 3339
/// timestamp or a wall-clock reading in the request's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Local { date: String, time: String },
    Absolute(Instant),
}

impl TimeInput {
    pub fn resolve(&self, zone: &Zone) -> Result<Instant, CalendarError> {
        match self {
            Self::Local { date, time } => zone.to_instant(date, time),
            Self::Absolute(instant) => Ok(*instant),
        }
    }
}

impl From<Instant> for TimeInput {
    fn from(instant: Instant) -> Self {
        Self::Absolute(instant)
    }
}
