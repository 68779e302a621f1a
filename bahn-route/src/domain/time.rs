//! Timetable time handling.
//!
//! The timetable service gives scheduled times as compact `YYMMDDHHmm`
//! strings in local time, and serves one hour of timetable per request.
//! This module parses those strings and models the hour-granular request
//! window.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

/// Format of scheduled times in timetable responses.
const SCHEDULED_FORMAT: &str = "%y%m%d%H%M";

const NO_LOCAL_TIME: &str = "does not exist in the local timezone";

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse a scheduled time in compact `YYMMDDHHmm` form as local time.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::parse_scheduled;
/// use chrono::{Datelike, Timelike};
///
/// let t = parse_scheduled("2403151405").unwrap();
/// assert_eq!((t.year(), t.month(), t.day()), (2024, 3, 15));
/// assert_eq!((t.hour(), t.minute()), (14, 5));
///
/// assert!(parse_scheduled("").is_err());
/// assert!(parse_scheduled("24031514").is_err());
/// ```
pub fn parse_scheduled(s: &str) -> Result<DateTime<Local>, TimeError> {
    if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new(s, "expected 10 digits YYMMDDHHmm"));
    }

    let naive = NaiveDateTime::parse_from_str(s, SCHEDULED_FORMAT)
        .map_err(|_| TimeError::new(s, "not a valid date and time"))?;

    to_local(naive).ok_or_else(|| TimeError::new(s, NO_LOCAL_TIME))
}

/// Parse a clock time in `HHMM` form on the given local date.
///
/// Used for the optional start time on the command line.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::parse_clock;
/// use chrono::{NaiveDate, Timelike};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let t = parse_clock("0730", date).unwrap();
/// assert_eq!((t.hour(), t.minute()), (7, 30));
///
/// assert!(parse_clock("7:30", date).is_err());
/// assert!(parse_clock("2460", date).is_err());
/// ```
pub fn parse_clock(s: &str, date: NaiveDate) -> Result<DateTime<Local>, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(TimeError::new(s, "expected HHMM format"));
    }

    let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minute = u32::from(bytes[2] - b'0') * 10 + u32::from(bytes[3] - b'0');

    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeError::new(s, "hour must be 0-23 and minute 0-59"))?;

    to_local(date.and_time(time)).ok_or_else(|| TimeError::new(s, NO_LOCAL_TIME))
}

/// Format a time as `HH:MM` for display.
pub fn format_clock(t: &DateTime<Local>) -> String {
    t.format("%H:%M").to_string()
}

/// Resolve a wall-clock time in the local timezone.
///
/// Ambiguous times (when clocks go back) resolve to the earlier instant;
/// times skipped when clocks go forward do not exist.
fn to_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// One hour of timetable, the unit the timetable service answers with.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::{HourSlice, parse_scheduled};
///
/// let t = parse_scheduled("2403150905").unwrap();
/// let slice = HourSlice::containing(&t);
/// assert_eq!(slice.date_segment(), "240315");
/// assert_eq!(slice.hour_segment(), "09");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourSlice {
    date: NaiveDate,
    hour: u32,
}

impl HourSlice {
    /// The slice containing the given local time.
    pub fn containing(t: &DateTime<Local>) -> Self {
        Self {
            date: t.date_naive(),
            hour: t.hour(),
        }
    }

    /// Date as the `YYMMDD` request path segment.
    pub fn date_segment(&self) -> String {
        self.date.format("%y%m%d").to_string()
    }

    /// Hour as the two-digit `HH` request path segment.
    pub fn hour_segment(&self) -> String {
        format!("{:02}", self.hour)
    }
}

impl fmt::Debug for HourSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HourSlice({} {:02}h)", self.date, self.hour)
    }
}

impl fmt::Display for HourSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.date, self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_scheduled_valid() {
        let t = parse_scheduled("2403152359").unwrap();
        assert_eq!(t.date_naive(), date(2024, 3, 15));
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = parse_scheduled("2401010000").unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.hour(), 0);
    }

    #[test]
    fn parse_scheduled_invalid() {
        // Wrong length
        assert!(parse_scheduled("").is_err());
        assert!(parse_scheduled("240315140").is_err());
        assert!(parse_scheduled("24031514055").is_err());

        // Non-digits
        assert!(parse_scheduled("24-3151405").is_err());
        assert!(parse_scheduled("24031514:5").is_err());

        // Out of range components
        assert!(parse_scheduled("2413151405").is_err());
        assert!(parse_scheduled("2403321405").is_err());
        assert!(parse_scheduled("2403152405").is_err());
        assert!(parse_scheduled("2403151460").is_err());
    }

    #[test]
    fn parse_scheduled_error_names_input() {
        let err = parse_scheduled("nonsense").unwrap_err();
        assert!(err.to_string().contains("\"nonsense\""));
    }

    #[test]
    fn scheduled_strings_order_like_times() {
        let a = parse_scheduled("2403150959").unwrap();
        let b = parse_scheduled("2403151000").unwrap();
        assert!(a < b);
        assert!("2403150959" < "2403151000");
    }

    #[test]
    fn parse_clock_valid() {
        let d = date(2024, 3, 15);
        let t = parse_clock("0000", d).unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 0));
        assert_eq!(t.date_naive(), d);

        let t = parse_clock("2359", d).unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
    }

    #[test]
    fn parse_clock_invalid() {
        let d = date(2024, 3, 15);
        assert!(parse_clock("", d).is_err());
        assert!(parse_clock("730", d).is_err());
        assert!(parse_clock("07:30", d).is_err());
        assert!(parse_clock("2400", d).is_err());
        assert!(parse_clock("1260", d).is_err());
        assert!(parse_clock("ab12", d).is_err());
    }

    #[test]
    fn format_clock_pads() {
        let t = parse_scheduled("2403150705").unwrap();
        assert_eq!(format_clock(&t), "07:05");
    }

    #[test]
    fn slice_segments() {
        let t = parse_scheduled("2403150059").unwrap();
        let slice = HourSlice::containing(&t);
        assert_eq!(slice.date_segment(), "240315");
        assert_eq!(slice.hour_segment(), "00");
    }

    #[test]
    fn slice_advances_across_midnight() {
        let t = parse_scheduled("2403152330").unwrap();
        let next = HourSlice::containing(&(t + Duration::hours(1)));
        assert_eq!(next.date_segment(), "240316");
        assert_eq!(next.hour_segment(), "00");
    }

    #[test]
    fn slice_debug_and_display() {
        let t = parse_scheduled("2403150905").unwrap();
        let slice = HourSlice::containing(&t);
        assert_eq!(format!("{slice:?}"), "HourSlice(2024-03-15 09h)");
        assert_eq!(slice.to_string(), "2024-03-15 09:00");
    }
}
