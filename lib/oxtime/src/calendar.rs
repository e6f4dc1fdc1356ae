//! Calendar arithmetic shared by the literal parser and the canonical serialization.
//!
//! Everything here is constant-time and loop-free. None of it is reachable from the
//! [`DateTime`] and [`Duration`](crate::Duration) arithmetic: the engine only maps civil fields
//! to the timeline (and back) and helps callers precompute calendar parts as context data.

use crate::DateTime;
use crate::validate::{InvalidFieldError, validate_fields};
use std::fmt;

pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Number of days between 1970-01-01 and the weekday anchor 1900-01-01 (a Monday).
const ANCHOR_EPOCH_DAY: i64 = -25_567;

/// Returns `true` if February of `year` has 29 days.
///
/// Literal years are bounded to 1900-2100, so the plain divisibility-by-4 rule is used
/// without the century exception.
///
/// ```
/// use oxtime::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1999));
/// ```
#[inline]
#[must_use]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0
}

/// Number of days of `month` in `year`.
///
/// Returns 0 for a month outside of `1..=12` so that any day is rejected for it.
#[inline]
#[must_use]
pub const fn days_in_month(month: u8, year: i64) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days since 1970-01-01 of a civil date, counted on the proleptic Gregorian timeline.
///
/// The day is not checked against the length of the month: a fictitious `1900-02-29` lands on
/// `1900-03-01`.
#[must_use]
pub(crate) fn epoch_day(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = i64::from(month);
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
        + i64::from(day)
        - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [`epoch_day`].
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn civil_from_epoch_day(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u8;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    } as u8;
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// A day of the week.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO 8601 day number, from 1 (Monday) to 7 (Sunday).
    #[inline]
    #[must_use]
    pub const fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }

    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_days_since_anchor(days: i64) -> Self {
        // In [0, 7)
        Self::ALL[days.rem_euclid(7) as usize]
    }
}

impl fmt::Display for Weekday {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week of the UTC day containing `date_time`, counted from the 1900-01-01 Monday
/// anchor.
///
/// This is a caller-side helper: calendar parts are not part of [`DateTime`] arithmetic.
///
/// ```
/// use oxtime::{Weekday, day_of_week};
///
/// assert_eq!(day_of_week("1900-01-01T00:00:00Z".parse()?), Weekday::Monday);
/// assert_eq!(day_of_week("1970-01-01T23:59:59Z".parse()?), Weekday::Thursday);
/// # Ok::<_, oxtime::ParseDateTimeError>(())
/// ```
#[inline]
#[must_use]
pub fn day_of_week(date_time: DateTime) -> Weekday {
    // |days| < 2^38, far from overflowing
    Weekday::from_days_since_anchor(
        date_time.to_millis().div_euclid(MILLIS_PER_DAY) - ANCHOR_EPOCH_DAY,
    )
}

/// The civil (wall clock) fields of a UTC instant.
///
/// Used by hosts that need calendar parts as precomputed context values.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct CivilFields {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl CivilFields {
    /// Decomposes a UTC instant.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_date_time(date_time: DateTime) -> Self {
        let millis = date_time.to_millis();
        let (year, month, day) = civil_from_epoch_day(millis.div_euclid(MILLIS_PER_DAY));
        // In [0, MILLIS_PER_DAY)
        let time = millis.rem_euclid(MILLIS_PER_DAY);
        Self {
            year,
            month,
            day,
            hour: (time / MILLIS_PER_HOUR) as u8,
            minute: (time % MILLIS_PER_HOUR / MILLIS_PER_MINUTE) as u8,
            second: (time % MILLIS_PER_MINUTE / MILLIS_PER_SECOND) as u8,
            millisecond: (time % MILLIS_PER_SECOND) as u16,
        }
    }

    /// Validates the fields and builds the matching UTC instant.
    pub fn to_date_time(&self) -> Result<DateTime, InvalidFieldError> {
        validate_fields(self)?;
        Ok(DateTime::from_millis(self.naive_millis()))
    }

    /// Validates the fields and returns the day of the week of their date.
    #[inline]
    pub fn day_of_week(&self) -> Result<Weekday, InvalidFieldError> {
        Ok(day_of_week(self.to_date_time()?))
    }

    /// Milliseconds since the epoch of these fields read as UTC, without validation.
    pub(crate) fn naive_millis(&self) -> i64 {
        epoch_day(self.year, self.month, self.day) * MILLIS_PER_DAY
            + i64::from(self.hour) * MILLIS_PER_HOUR
            + i64::from(self.minute) * MILLIS_PER_MINUTE
            + i64::from(self.second) * MILLIS_PER_SECOND
            + i64::from(self.millisecond)
    }
}
