//! Date range resolution
//!
//! Turns a period string (a chat argument or a report file name) into an
//! [`Interval`]. Three grammars are accepted, split on a single `-`:
//!
//! - `D-D` / `DD-DD`: days of the current month, whole days
//! - `DD.MM.YYYY-DD.MM.YYYY`: whole days
//! - `DD.MM.YYYYTHH.MM-DD.MM.YYYYTHH.MM`: exact minutes
//!
//! All parsing happens in the zone the resolver was built with.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::domain::result::{Error, Result};
use crate::domain::{Interval, Truncation};

/// Application time zone unless configured otherwise
pub const DEFAULT_TIMEZONE: &str = "Europe/Kiev";

/// Suffix stripped from file names before parsing
pub const CSV_SUFFIX: &str = ".csv";

const DATE_FORMAT: &str = "%d.%m.%Y";
const DATE_TIME_FORMAT: &str = "%d.%m.%YT%H.%M";

static SHORT_DAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap());
static DATE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}T\d{2}\.\d{2}$").unwrap());

/// Which grammar a period string matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFormat {
    /// `1-5`, days of the current month
    ShortDayRange,
    /// `01.03.2024-05.03.2024`
    DateRange,
    /// `01.03.2024T10.00-05.03.2024T18.30`
    DateTimeRange,
}

impl PeriodFormat {
    /// Classify a token pair; both tokens must match the same grammar
    pub fn classify(from: &str, to: &str) -> Option<Self> {
        let both = |re: &Regex| re.is_match(from) && re.is_match(to);

        if both(&SHORT_DAY_RE) {
            Some(PeriodFormat::ShortDayRange)
        } else if both(&DATE_RE) {
            Some(PeriodFormat::DateRange)
        } else if both(&DATE_TIME_RE) {
            Some(PeriodFormat::DateTimeRange)
        } else {
            None
        }
    }
}

/// Resolves period strings in a fixed time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeResolver {
    tz: Tz,
}

impl Default for DateRangeResolver {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Kiev)
    }
}

impl DateRangeResolver {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a resolver from an IANA zone name
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| Error::Config(format!("invalid timezone: {name}")))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Current time in the resolver's zone
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// Resolve a period string against the current time
    pub fn resolve(&self, period: &str) -> Result<Interval> {
        self.resolve_at(period, Utc::now())
    }

    /// Resolve a period string; `now` anchors the short day-range grammar
    pub fn resolve_at(&self, period: &str, now: DateTime<Utc>) -> Result<Interval> {
        let name = period.trim();
        let name = name.strip_suffix(CSV_SUFFIX).unwrap_or(name);

        let tokens: Vec<&str> = name.split('-').collect();
        let [from, to] = tokens.as_slice() else {
            return Err(Error::format(format!("can't split dates by '-': {period}")));
        };

        match PeriodFormat::classify(from, to) {
            Some(PeriodFormat::ShortDayRange) => {
                // Always the current month, even when the caller meant another one
                let today = now.with_timezone(&self.tz).date_naive();
                let from = day_of_month(from, today)?;
                let to = day_of_month(to, today)?;
                self.whole_days(from, to)
            }
            Some(PeriodFormat::DateRange) => {
                let from = parse_date(from)?;
                let to = parse_date(to)?;
                self.whole_days(from, to)
            }
            Some(PeriodFormat::DateTimeRange) => {
                let from = self.localize(parse_date_time(from)?)?;
                let to = self.localize(parse_date_time(to)?)?;
                Interval::new(from, to, Truncation::Minute)
            }
            None => Err(Error::format(format!("can't find date pattern: {period}"))),
        }
    }

    /// Beginning to end of the day containing `now`
    pub fn today_at(&self, now: DateTime<Utc>) -> Result<Interval> {
        let today = now.with_timezone(&self.tz).date_naive();
        self.whole_days(today, today)
    }

    /// Beginning to end of the month containing `now`
    pub fn month_at(&self, now: DateTime<Utc>) -> Result<Interval> {
        let today = now.with_timezone(&self.tz).date_naive();
        let first = today.with_day(1).unwrap_or(today);
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .map(|next| next - Duration::days(1))
            .unwrap_or(today);
        self.whole_days(first, last)
    }

    /// Beginning of `from` to end of `to`, day granularity
    fn whole_days(&self, from: NaiveDate, to: NaiveDate) -> Result<Interval> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let from = self.localize(from.and_time(NaiveTime::MIN))?;
        let to = self.localize(to.and_time(end_of_day))?;
        Interval::new(from, to, Truncation::Day)
    }

    /// Attach the zone; ambiguous times take the earlier instant
    pub fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Tz>> {
        self.tz.from_local_datetime(&local).earliest().ok_or_else(|| {
            Error::parse(
                local.format("%d.%m.%Y %H:%M:%S").to_string(),
                format!("local time does not exist in {}", self.tz),
            )
        })
    }
}

/// Format an interval bound the way the date-time grammar reads it back
pub fn format_bound(at: &DateTime<Tz>) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

fn day_of_month(token: &str, today: NaiveDate) -> Result<NaiveDate> {
    let value = format!("{:0>2}.{:02}.{}", token, today.month(), today.year());
    parse_date(&value)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| Error::parse(value, e))
}

fn parse_date_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map_err(|e| Error::parse(value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Kiev;

    fn kiev(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Tz> {
        Kiev.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    /// 2024-03-10 12:00 Kyiv time
    fn march_10() -> DateTime<Utc> {
        kiev(2024, 3, 10, 12, 0, 0).with_timezone(&Utc)
    }

    #[test]
    fn test_short_day_range() {
        let resolver = DateRangeResolver::default();
        let interval = resolver.resolve_at("01-05", march_10()).unwrap();

        assert_eq!(interval.from(), kiev(2024, 3, 1, 0, 0, 0));
        assert_eq!(interval.to(), kiev(2024, 3, 5, 23, 59, 59));
        assert_eq!(interval.truncate(), Truncation::Day);
    }

    #[test]
    fn test_short_day_range_pads_single_digits() {
        let resolver = DateRangeResolver::default();
        let padded = resolver.resolve_at("01-05", march_10()).unwrap();
        let short = resolver.resolve_at("1-5", march_10()).unwrap();
        assert_eq!(padded, short);
    }

    #[test]
    fn test_short_day_range_every_day_pair() {
        let resolver = DateRangeResolver::default();
        for d1 in 1..=31u32 {
            for d2 in d1..=31u32 {
                let period = format!("{d1:02}-{d2:02}");
                let interval = resolver.resolve_at(&period, march_10()).unwrap();
                assert_eq!(interval.from(), kiev(2024, 3, d1, 0, 0, 0), "{period}");
                assert_eq!(interval.to(), kiev(2024, 3, d2, 23, 59, 59), "{period}");
            }
        }
    }

    #[test]
    fn test_short_day_range_uses_zone_month() {
        // 22:30 UTC on March 31 is already April 1 in Kyiv
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 22, 30, 0).unwrap();
        let interval = DateRangeResolver::default().resolve_at("1-2", now).unwrap();
        assert_eq!(interval.from(), kiev(2024, 4, 1, 0, 0, 0));
    }

    #[test]
    fn test_short_day_range_invalid_day() {
        let now = kiev(2024, 2, 10, 12, 0, 0).with_timezone(&Utc);
        let err = DateRangeResolver::default().resolve_at("30-31", now).unwrap_err();
        match err {
            Error::Parse { value, .. } => assert_eq!(value, "30.02.2024"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_full_date_range() {
        let interval = DateRangeResolver::default()
            .resolve_at("01.08.2019-05.08.2019", march_10())
            .unwrap();

        assert_eq!(interval.from(), kiev(2019, 8, 1, 0, 0, 0));
        assert_eq!(interval.to(), kiev(2019, 8, 5, 23, 59, 59));
        assert_eq!(interval.truncate(), Truncation::Day);
    }

    #[test]
    fn test_date_time_range_is_exact() {
        let interval = DateRangeResolver::default()
            .resolve_at("01.08.2019T15.00-05.08.2019T21.00", march_10())
            .unwrap();

        assert_eq!(interval.from(), kiev(2019, 8, 1, 15, 0, 0));
        assert_eq!(interval.to(), kiev(2019, 8, 5, 21, 0, 0));
        assert_eq!(interval.truncate(), Truncation::Minute);
    }

    #[test]
    fn test_strips_csv_suffix() {
        let interval = DateRangeResolver::default()
            .resolve_at("01.08.2019-05.08.2019.csv", march_10())
            .unwrap();
        assert_eq!(interval.from(), kiev(2019, 8, 1, 0, 0, 0));
    }

    #[test]
    fn test_cannot_split() {
        let resolver = DateRangeResolver::default();
        for period in ["not valid", "01-02-03", "", "statement.csv"] {
            let err = resolver.resolve_at(period, march_10()).unwrap_err();
            assert!(matches!(err, Error::Format(ref m) if m.contains("split")), "{period}: {err}");
        }
    }

    #[test]
    fn test_no_matching_pattern() {
        let resolver = DateRangeResolver::default();
        for period in [
            "01.08.2019T15:00-05.08.2019T21:00",
            "01-05.08.2019",
            "123-5",
            "1.8.2019-5.8.2019",
        ] {
            let err = resolver.resolve_at(period, march_10()).unwrap_err();
            assert!(matches!(err, Error::Format(ref m) if m.contains("pattern")), "{period}: {err}");
        }
    }

    #[test]
    fn test_invalid_calendar_date() {
        let err = DateRangeResolver::default()
            .resolve_at("31.02.2024-01.03.2024", march_10())
            .unwrap_err();
        assert!(matches!(err, Error::Parse { ref value, .. } if value == "31.02.2024"));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DateRangeResolver::default()
            .resolve_at("05-01", march_10())
            .unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_invalid_timezone() {
        let err = DateRangeResolver::from_name("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_other_timezone() {
        let resolver = DateRangeResolver::from_name("UTC").unwrap();
        let interval = resolver.resolve_at("01.08.2019-01.08.2019", march_10()).unwrap();
        assert_eq!(
            interval.from().with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 8, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_today_and_month() {
        let resolver = DateRangeResolver::default();

        let today = resolver.today_at(march_10()).unwrap();
        assert_eq!(today.from(), kiev(2024, 3, 10, 0, 0, 0));
        assert_eq!(today.to(), kiev(2024, 3, 10, 23, 59, 59));

        let month = resolver.month_at(march_10()).unwrap();
        assert_eq!(month.from(), kiev(2024, 3, 1, 0, 0, 0));
        assert_eq!(month.to(), kiev(2024, 3, 31, 23, 59, 59));

        let feb = resolver.month_at(kiev(2024, 2, 10, 0, 0, 0).with_timezone(&Utc)).unwrap();
        assert_eq!(feb.to(), kiev(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_format_bound_round_trips_through_grammar() {
        let resolver = DateRangeResolver::default();
        let month = resolver.month_at(march_10()).unwrap();
        let name = format!("{}-{}.csv", format_bound(&month.from()), format_bound(&month.to()));
        assert_eq!(name, "01.03.2024T00.00-31.03.2024T23.59.csv");

        let back = resolver.resolve_at(&name, march_10()).unwrap();
        assert_eq!(back.truncate(), Truncation::Minute);
        assert_eq!(back.from(), month.from());
    }
}
