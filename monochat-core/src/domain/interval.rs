//! Time interval with a truncation granularity

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

use super::result::{Error, Result};

/// Unit a timestamp is rounded down to before it is compared with an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    Day,
    Minute,
}

impl Truncation {
    pub fn duration(&self) -> Duration {
        match self {
            Truncation::Day => Duration::days(1),
            Truncation::Minute => Duration::minutes(1),
        }
    }

    /// Round `at` down to the start of its local day or minute
    pub fn apply(&self, at: DateTime<Tz>) -> DateTime<Tz> {
        match self {
            Truncation::Minute => at
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(at),
            Truncation::Day => {
                let midnight = at.date_naive().and_time(NaiveTime::MIN);
                at.timezone()
                    .from_local_datetime(&midnight)
                    .earliest()
                    .unwrap_or(at)
            }
        }
    }
}

/// A `[from, to]` range of local time plus the granularity used to test
/// membership. Truncation is applied to the tested timestamp only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    from: DateTime<Tz>,
    to: DateTime<Tz>,
    truncate: Truncation,
}

impl Interval {
    pub fn new(from: DateTime<Tz>, to: DateTime<Tz>, truncate: Truncation) -> Result<Self> {
        if from > to {
            return Err(Error::format(format!(
                "range start {} is after range end {}",
                from.format("%d.%m.%Y %H:%M"),
                to.format("%d.%m.%Y %H:%M")
            )));
        }

        Ok(Self { from, to, truncate })
    }

    pub fn from(&self) -> DateTime<Tz> {
        self.from
    }

    pub fn to(&self) -> DateTime<Tz> {
        self.to
    }

    pub fn truncate(&self) -> Truncation {
        self.truncate
    }

    /// Whether `at`, truncated to this interval's granularity, falls inside it.
    /// Both ends are inclusive.
    pub fn contains(&self, at: DateTime<Tz>) -> bool {
        let at = self.truncate.apply(at.with_timezone(&self.from.timezone()));

        if at == self.from || at == self.to {
            return true;
        }

        !(at < self.from || at > self.to)
    }
}
