use chrono::{DateTime, Months, NaiveDate, TimeDelta, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::{ParseError, Result};

lazy_static! {
    static ref REGEX_SPLIT_DATE: Regex = Regex::new(r"[-/.]\s?").unwrap();
    static ref REGEX_SPLIT_TIME: Regex = Regex::new(r"[:.]+").unwrap();
}

/// The three components of a date token, with the year moved last.
///
/// Components are still the raw digits from the export, whether `first` is
/// the day or the month is decided later for the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedDate<'a> {
    pub first: &'a str,
    pub second: &'a str,
    pub year: &'a str,
}

impl OrderedDate<'_> {
    /// Numeric view used by the day/month disambiguation.
    pub fn to_token(&self) -> DateToken {
        DateToken {
            first: parse_component(self.first),
            second: parse_component(self.second),
            year: parse_component(self.year),
        }
    }

    /// Splits into `(day, month, year)` according to the resolved order.
    pub fn day_month_year(&self, days_first: bool) -> (&str, &str, &str) {
        if days_first {
            (self.first, self.second, self.year)
        } else {
            (self.second, self.first, self.year)
        }
    }
}

/// A numeric `(first, second, year)` triple collected from one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateToken {
    pub first: u32,
    pub second: u32,
    pub year: u32,
}

impl DateToken {
    pub const fn new(first: u32, second: u32, year: u32) -> Self {
        Self {
            first,
            second,
            year,
        }
    }
}

impl From<[u32; 3]> for DateToken {
    fn from([first, second, year]: [u32; 3]) -> Self {
        Self::new(first, second, year)
    }
}

fn parse_component(component: &str) -> u32 {
    component.trim().parse().unwrap_or(0)
}

/// Pushes the longest number in a date to the end, if there is one. Necessary
/// to ensure the year is the last number.
///
/// On a tie the last position wins, then the middle one.
pub fn order_date_components(date: &str) -> Result<OrderedDate<'_>> {
    let parts: Vec<&str> = REGEX_SPLIT_DATE.split(date).map(str::trim).collect();
    let [a, b, c] = parts[..] else {
        return Err(ParseError::MalformedDate {
            input: date.to_string(),
            found: parts.len(),
        });
    };

    let width = |s: &str| s.chars().count();
    let max_len = width(a).max(width(b)).max(width(c));

    let (first, second, year) = if width(c) == max_len {
        (a, b, c)
    } else if width(b) == max_len {
        (a, c, b)
    } else {
        (b, c, a)
    };

    Ok(OrderedDate {
        first,
        second,
        year,
    })
}

/// Takes `year`, `month` and `day` as strings and pads them to `4`, `2`, `2`
/// digits respectively.
pub fn normalize_date(year: &str, month: &str, day: &str) -> (String, String, String) {
    // 2 digit years are assumed to be in the 2000-2099 range
    let normalized_year = if year.len() <= 2 {
        format!("20{year:0>2}")
    } else {
        year.to_string()
    };

    (normalized_year, format!("{month:0>2}"), format!("{day:0>2}"))
}

/// Converts time from 12 hour format to 24 hour format.
///
/// `ampm` is expected to be normalized already (see [`normalize_ampm`]).
pub fn convert_time_12_to_24(time: &str, ampm: &str) -> String {
    let mut parts = REGEX_SPLIT_TIME.split(time);
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().unwrap_or_default();
    let seconds = parts.next();

    let mut hours = coerce(hours, "hour");
    if hours == 12 {
        hours = 0;
    }
    if ampm == "PM" {
        hours += 12;
    }

    match seconds {
        Some(seconds) => format!("{hours:02}:{minutes}:{seconds}"),
        None => format!("{hours:02}:{minutes}"),
    }
}

/// Normalizes a time string to have the following format: `hh:mm:ss`.
pub fn normalize_time(time: &str) -> String {
    let mut parts = REGEX_SPLIT_TIME.split(time);
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().unwrap_or_default();
    let seconds = parts.next().unwrap_or("00");

    format!("{hours:0>2}:{minutes}:{seconds}")
}

/// Normalizes `am` / `a.m.` / `p. m.` etc. to `AM` / `PM`.
pub fn normalize_ampm(ampm: &str) -> String {
    ampm.replace(|c: char| !c.is_alphabetic(), "").to_uppercase()
}

/// Builds the final timestamp from a normalized date and an `hh:mm:ss` time.
///
/// Fields that are not numbers count as zero. Values outside their range
/// roll over into the next unit, so month `13` is January of the next year
/// and day `0` is the last day of the previous month.
pub fn assemble_timestamp(year: &str, month: &str, day: &str, time: &str) -> DateTime<Utc> {
    let mut time_parts = time.split(':');
    let mut next_time_field = |field| coerce(time_parts.next().unwrap_or("0"), field);
    let (hour, minute, second) = (
        next_time_field("hour"),
        next_time_field("minute"),
        next_time_field("second"),
    );
    let (year, month, day) = (coerce(year, "year"), coerce(month, "month"), coerce(day, "day"));

    rolled_over(year, month, day, hour, minute, second).unwrap_or_else(|| {
        warn!(year, month, day, hour, minute, second, "timestamp out of range, using epoch");
        DateTime::<Utc>::default()
    })
}

fn coerce(value: &str, field: &'static str) -> i64 {
    value.trim().parse().unwrap_or_else(|_| {
        warn!(field, value, "unparseable numeric field, coercing to zero");
        0
    })
}

fn rolled_over(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Option<DateTime<Utc>> {
    let january = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    let month_offset = month - 1;
    let first_of_month = if month_offset >= 0 {
        january.checked_add_months(Months::new(u32::try_from(month_offset).ok()?))?
    } else {
        january.checked_sub_months(Months::new(u32::try_from(-month_offset).ok()?))?
    };
    let date = first_of_month.checked_add_signed(TimeDelta::try_days(day - 1)?)?;

    let time_of_day = TimeDelta::try_hours(hour)?
        .checked_add(&TimeDelta::try_minutes(minute)?)?
        .checked_add(&TimeDelta::try_seconds(second)?)?;

    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(time_of_day)
        .map(|naive| naive.and_utc())
}
