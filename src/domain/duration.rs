//! ISO 8601 time spans as the service writes them (`PT1H30M`, `P2DT3H`).
//!
//! Only day-and-smaller designators are supported; the service never emits
//! years or months because they have no fixed length. Fractions of a second
//! carry up to 100 ns precision on the wire.

use crate::utils::error::{BatchClientError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const NANOS_PER_TICK: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDuration(Duration);

impl IsoDuration {
    /// The largest span the service accepts; it means "no limit".
    pub const UNBOUNDED: IsoDuration = IsoDuration(Duration::new(922_337_203_685, 477_580_700));

    pub const ZERO: IsoDuration = IsoDuration(Duration::ZERO);

    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub const fn from_minutes(minutes: u64) -> Self {
        Self(Duration::from_secs(minutes * SECS_PER_MINUTE))
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(Duration::from_secs(hours * SECS_PER_HOUR))
    }

    pub const fn from_days(days: u64) -> Self {
        Self(Duration::from_secs(days * SECS_PER_DAY))
    }

    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    pub fn parse(value: &str) -> Result<Self> {
        let fail = |reason: &str| BatchClientError::DurationParseError {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let pattern = DURATION_REGEX
            .as_ref()
            .map_err(|e| fail(&e.to_string()))?;
        let caps = pattern
            .captures(value)
            .ok_or_else(|| fail("expected P[nW][nD][T[nH][nM][n[.f]S]]"))?;

        let component = |index: usize| -> Result<Option<u64>> {
            caps.get(index)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| fail("component out of range")))
                .transpose()
        };

        let weeks = component(1)?;
        let days = component(2)?;
        let has_time_designator = caps.get(3).is_some();
        let hours = component(4)?;
        let minutes = component(5)?;
        let seconds = component(6)?;
        let fraction = caps.get(7).map(|m| m.as_str());

        let time_parts_present = hours.is_some() || minutes.is_some() || seconds.is_some();
        if has_time_designator && !time_parts_present {
            return Err(fail("'T' must be followed by at least one time component"));
        }
        if weeks.is_none() && days.is_none() && !time_parts_present {
            return Err(fail("no components"));
        }

        let total_secs = [
            (weeks, 7 * SECS_PER_DAY),
            (days, SECS_PER_DAY),
            (hours, SECS_PER_HOUR),
            (minutes, SECS_PER_MINUTE),
            (seconds, 1),
        ]
        .iter()
        .try_fold(0u64, |acc, (amount, unit)| {
            amount
                .unwrap_or(0)
                .checked_mul(*unit)
                .and_then(|secs| acc.checked_add(secs))
        })
        .ok_or_else(|| fail("duration overflows"))?;

        let nanos = match fraction {
            Some(digits) => {
                let padded = format!("{:0<9}", digits);
                padded.parse::<u32>().map_err(|_| fail("invalid fraction"))?
            }
            None => 0,
        };

        Ok(Self(Duration::new(total_secs, nanos)))
    }
}

/// Fractions stop at seven digits, the 100 ns tick the service counts in.
const DURATION_PATTERN: &str =
    r"^P(?:(\d+)W)?(?:(\d+)D)?(T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,](\d{1,7}))?S)?)?$";

static DURATION_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DURATION_PATTERN));

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs();
        let ticks = self.0.subsec_nanos() / NANOS_PER_TICK;

        if total == 0 && ticks == 0 {
            return f.write_str("PT0S");
        }

        let days = total / SECS_PER_DAY;
        let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
        let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = total % SECS_PER_MINUTE;

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{}D", days)?;
        }
        if hours == 0 && minutes == 0 && seconds == 0 && ticks == 0 {
            return Ok(());
        }

        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}M", minutes)?;
        }
        if seconds > 0 || ticks > 0 {
            write!(f, "{}", seconds)?;
            if ticks > 0 {
                let fraction = format!("{:07}", ticks);
                write!(f, ".{}", fraction.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}

impl FromStr for IsoDuration {
    type Err = BatchClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Duration> for IsoDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<IsoDuration> for Duration {
    fn from(duration: IsoDuration) -> Self {
        duration.0
    }
}

impl Serialize for IsoDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IsoDuration::parse(&raw).map_err(serde::de::Error::custom)
    }
}
