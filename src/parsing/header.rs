//! Header line matching.
//!
//! A header line opens a new message and has the shape
//!
//! ```text
//! <date>, <time>[ <meridian>] - <remainder>
//! ```
//!
//! where `<date>` is `D/M/Y` with one or two digits for day and month and
//! two or four digits for the year, `<time>` is `H:MM` and `<meridian>` is
//! an optional, case-insensitive `am`/`pm`.

use std::sync::LazyLock;

use chrono::{Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// `D/M/Y, H:MM [am|pm] - rest`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4}),\s*(\d{1,2}):(\d{2})(?:\s*(?i:(am|pm)))?\s*-\s*(.*)$",
    )
    .unwrap()
});

/// 12-hour clock marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridian {
    Am,
    Pm,
}

impl Meridian {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("am") {
            Some(Meridian::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Some(Meridian::Pm)
        } else {
            None
        }
    }
}

/// Converts an hour to the 24-hour clock.
///
/// `pm` adds 12 unless the hour is 12; `12 am` becomes 0. Without a
/// meridian the hour passes through unchanged, so an unmarked 12-hour
/// export is read as if it were 24-hour.
pub fn normalize_hour(hour: u32, meridian: Option<Meridian>) -> u32 {
    match meridian {
        Some(Meridian::Pm) if hour != 12 => hour + 12,
        Some(Meridian::Am) if hour == 12 => 0,
        _ => hour,
    }
}

/// Resolves a two-digit year to the 2000s.
pub fn normalize_year(year: i32) -> i32 {
    if year < 100 { 2000 + year } else { year }
}

/// Builds a timestamp from raw header fields, rolling over out-of-range
/// values instead of rejecting them.
///
/// Counting starts at 1 January of `year`: `month - 1` months, then
/// `day - 1` days, then the hours and minutes are added. `31/2` lands on
/// 2 or 3 March, month or day 0 steps back one unit, and hour 25 is 01:00
/// the next day. Returns `None` only if the result leaves chrono's range.
pub fn rollover_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let date = match month {
        0 => start.checked_sub_months(Months::new(1))?,
        m => start.checked_add_months(Months::new(m - 1))?,
    };
    let offset = Duration::days(i64::from(day) - 1)
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute));

    date.and_time(NaiveTime::MIN).checked_add_signed(offset)
}

/// Fields extracted from a header line.
///
/// `year` and `hour` are already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
    pub meridian: Option<Meridian>,
    /// Everything after the ` - ` separator.
    pub remainder: &'a str,
    pub timestamp: NaiveDateTime,
}

/// Matches `line` against the header pattern.
///
/// Returns `None` when the line does not have the header shape or a
/// numeric field does not parse. The caller then treats the line as a
/// continuation or orphan. Fields outside the calendar still match; see
/// [`rollover_timestamp`].
///
/// # Example
///
/// ```rust
/// use chatarchive::parsing::header::match_header;
///
/// let header = match_header("1/2/24, 5:00 pm - Alice: hi").unwrap();
/// assert_eq!((header.day, header.month, header.year), (1, 2, 2024));
/// assert_eq!(header.hour, 17);
/// assert_eq!(header.remainder, "Alice: hi");
///
/// assert!(match_header("just some text").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderFields<'_>> {
    let caps = HEADER_RE.captures(line)?;

    // `\d` is Unicode-aware; non-ASCII digits fail here and the line is
    // not a header.
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    let raw_hour: u32 = caps.get(4)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(5)?.as_str().parse().ok()?;
    let meridian = caps.get(6).and_then(|m| Meridian::parse(m.as_str()));
    let remainder = caps.get(7).map_or("", |m| m.as_str());

    let year = normalize_year(year);
    let hour = normalize_hour(raw_hour, meridian);

    let timestamp = rollover_timestamp(year, month, day, hour, minute)?;

    Some(HeaderFields {
        day,
        month,
        year,
        hour,
        minute,
        meridian,
        remainder,
        timestamp,
    })
}

/// Returns `true` if `line` opens a new message.
pub fn is_header(line: &str) -> bool {
    match_header(line).is_some()
}
