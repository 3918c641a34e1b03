//! UTC timestamps and the run identifiers derived from them.
//!
//! Formatting uses Howard Hinnant's civil-date algorithms over the Unix
//! epoch rather than a calendar crate. Only the single shape the evidence
//! record uses, `YYYY-MM-DDThh:mm:ss.mmmZ`, is produced and accepted.

use crate::error::{GuardError, Result};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const MILLIS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_DAY: u64 = 86_400;
const ISO_LEN: usize = 24;

/// A UTC instant with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    epoch_millis: u64,
}

impl Timestamp {
    /// Reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Clock`] if the clock is before the Unix epoch.
    pub fn now() -> Result<Self> {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
        let epoch_millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Ok(Self { epoch_millis })
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_epoch_millis(epoch_millis: u64) -> Self {
        Self { epoch_millis }
    }

    /// Returns milliseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_millis(self) -> u64 {
        self.epoch_millis
    }

    /// Formats the instant as `YYYY-MM-DDThh:mm:ss.mmmZ`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_epoch_millis(1_700_000_000_123);
    /// assert_eq!(ts.to_iso8601(), "2023-11-14T22:13:20.123Z");
    /// ```
    #[must_use]
    pub fn to_iso8601(self) -> String {
        let secs = self.epoch_millis / MILLIS_PER_SECOND;
        let millis = self.epoch_millis % MILLIS_PER_SECOND;
        let days = i64::try_from(secs / SECONDS_PER_DAY).unwrap_or(i64::MAX);
        let (year, month, day) = civil_from_days(days);
        let day_secs = secs % SECONDS_PER_DAY;
        let hour = day_secs / 3_600;
        let minute = (day_secs % 3_600) / 60;
        let second = day_secs % 60;
        format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}Z")
    }

    /// Returns a directory-name-safe identifier for this instant.
    ///
    /// Colons and the fractional-second dot become dashes. Two runs within
    /// the same millisecond share an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use wfsl_repo_guard::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_epoch_millis(1_700_000_000_123);
    /// assert_eq!(ts.run_id(), "2023-11-14T22-13-20-123Z");
    /// ```
    #[must_use]
    pub fn run_id(self) -> String {
        self.to_iso8601().replace([':', '.'], "-")
    }

    /// Parses a timestamp in the shape produced by [`Self::to_iso8601`].
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidTimestamp`] if the string has another
    /// shape, names an impossible date or time, or precedes the epoch.
    pub fn parse_iso8601(value: &str) -> Result<Self> {
        let invalid = || GuardError::InvalidTimestamp {
            value: value.to_owned(),
        };

        let bytes = value.as_bytes();
        let separators = [
            (4, b'-'),
            (7, b'-'),
            (10, b'T'),
            (13, b':'),
            (16, b':'),
            (19, b'.'),
            (23, b'Z'),
        ];
        if bytes.len() != ISO_LEN
            || separators
                .iter()
                .any(|(index, expected)| bytes.get(*index) != Some(expected))
        {
            return Err(invalid());
        }

        let year = digits(value, 0, 4).ok_or_else(invalid)?;
        let month = digits(value, 5, 7).ok_or_else(invalid)?;
        let day = digits(value, 8, 10).ok_or_else(invalid)?;
        let hour = digits(value, 11, 13).ok_or_else(invalid)?;
        let minute = digits(value, 14, 16).ok_or_else(invalid)?;
        let second = digits(value, 17, 19).ok_or_else(invalid)?;
        let millis = digits(value, 20, 23).ok_or_else(invalid)?;

        if year < 1970
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(invalid());
        }

        let days = u64::try_from(days_from_civil(i64::from(year), month, day))
            .map_err(|_| invalid())?;
        let secs = days * SECONDS_PER_DAY
            + u64::from(hour) * 3_600
            + u64::from(minute) * 60
            + u64::from(second);
        Ok(Self::from_epoch_millis(
            secs * MILLIS_PER_SECOND + u64::from(millis),
        ))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Parses the ASCII digits in `value[start..end]`.
fn digits(value: &str, start: usize, end: usize) -> Option<u32> {
    let field = value.get(start..end)?;
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Converts days since the epoch to a `(year, month, day)` triple.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097); // day of era [0, 146_096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// Converts a `(year, month, day)` triple to days since the epoch.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400; // year of era [0, 399]
    let mp = (i64::from(month) + 9) % 12; // March is 0
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::epoch(0, "1970-01-01T00:00:00.000Z")]
    #[case::with_millis(1_700_000_000_123, "2023-11-14T22:13:20.123Z")]
    #[case::leap_day(951_782_400_000, "2000-02-29T00:00:00.000Z")]
    #[case::recent(1_792_300_502_041, "2026-10-18T05:15:02.041Z")]
    fn formats_known_instants(#[case] millis: u64, #[case] expected: &str) {
        assert_eq!(Timestamp::from_epoch_millis(millis).to_iso8601(), expected);
    }

    #[rstest]
    #[case::epoch(0)]
    #[case::leap_day(951_782_400_000)]
    #[case::recent(1_792_300_502_041)]
    fn parse_reads_back_formatted_output(#[case] millis: u64) {
        let ts = Timestamp::from_epoch_millis(millis);
        let parsed = Timestamp::parse_iso8601(&ts.to_iso8601()).expect("parse formatted");
        assert_eq!(parsed, ts);
    }

    #[test]
    fn run_id_has_no_path_unsafe_characters() {
        let id = Timestamp::from_epoch_millis(1_792_300_502_041).run_id();
        assert_eq!(id, "2026-10-18T05-15-02-041Z");
        assert!(!id.contains(':'));
        assert!(!id.contains('.'));
    }

    #[rstest]
    #[case::no_millis("2026-10-18T05:15:02Z")]
    #[case::offset("2026-10-18T05:15:02.041+01:00")]
    #[case::bad_month("2026-13-18T05:15:02.041Z")]
    #[case::feb_30("2024-02-30T05:15:02.041Z")]
    #[case::not_leap("2023-02-29T00:00:00.000Z")]
    #[case::bad_hour("2026-10-18T24:00:00.000Z")]
    #[case::signed_field("+026-10-18T05:15:02.041Z")]
    #[case::pre_epoch("1969-12-31T23:59:59.999Z")]
    #[case::empty("")]
    fn parse_rejects_malformed_input(#[case] value: &str) {
        let err = Timestamp::parse_iso8601(value).expect_err("should be rejected");
        assert!(matches!(err, GuardError::InvalidTimestamp { .. }));
    }

    #[test]
    fn now_is_after_this_code_was_written() {
        let now = Timestamp::now().expect("clock after epoch");
        assert!(now.epoch_millis() > 1_700_000_000_000);
    }
}
