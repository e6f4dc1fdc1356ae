//! Range checks for the fields of a date-time literal.

use crate::calendar::{CivilFields, days_in_month};
use std::fmt;

/// Smallest year accepted in a literal.
pub const MIN_YEAR: i64 = 1900;
/// Largest year accepted in a literal.
pub const MAX_YEAR: i64 = 2100;

#[inline]
#[must_use]
pub const fn is_valid_year(year: i64) -> bool {
    MIN_YEAR <= year && year <= MAX_YEAR
}

#[inline]
#[must_use]
pub const fn is_valid_month(month: u8) -> bool {
    1 <= month && month <= 12
}

/// `day` must exist in the given month, with February 29th only in years divisible by 4.
#[inline]
#[must_use]
pub const fn is_valid_day(day: u8, month: u8, year: i64) -> bool {
    1 <= day && day <= days_in_month(month, year)
}

#[inline]
#[must_use]
pub const fn is_valid_hour(hour: u8) -> bool {
    hour <= 23
}

/// There are no leap minutes: the upper bound is 59.
#[inline]
#[must_use]
pub const fn is_valid_minute(minute: u8) -> bool {
    minute <= 59
}

/// There are no leap seconds: the upper bound is 59.
#[inline]
#[must_use]
pub const fn is_valid_second(second: u8) -> bool {
    second <= 59
}

#[inline]
#[must_use]
pub const fn is_valid_millisecond(millisecond: u16) -> bool {
    millisecond <= 999
}

/// Checks all the fields, in year to millisecond order, and reports the first invalid one.
pub fn validate_fields(fields: &CivilFields) -> Result<(), InvalidFieldError> {
    check(is_valid_year(fields.year), Field::Year, fields.year)?;
    check(
        is_valid_month(fields.month),
        Field::Month,
        fields.month.into(),
    )?;
    check(
        is_valid_day(fields.day, fields.month, fields.year),
        Field::Day,
        fields.day.into(),
    )?;
    check(is_valid_hour(fields.hour), Field::Hour, fields.hour.into())?;
    check(
        is_valid_minute(fields.minute),
        Field::Minute,
        fields.minute.into(),
    )?;
    check(
        is_valid_second(fields.second),
        Field::Second,
        fields.second.into(),
    )?;
    check(
        is_valid_millisecond(fields.millisecond),
        Field::Millisecond,
        fields.millisecond.into(),
    )
}

/// Checks the hours and minutes of a `(+|-)hhmm` timezone offset.
pub(crate) fn validate_offset(hours: u8, minutes: u8) -> Result<(), InvalidFieldError> {
    check(is_valid_hour(hours), Field::OffsetHour, hours.into())?;
    check(is_valid_minute(minutes), Field::OffsetMinute, minutes.into())
}

#[inline]
fn check(is_valid: bool, field: Field, value: i64) -> Result<(), InvalidFieldError> {
    if is_valid {
        Ok(())
    } else {
        Err(InvalidFieldError::new(field, value))
    }
}

/// A field of a date-time literal.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    OffsetHour,
    OffsetMinute,
}

impl fmt::Display for Field {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::OffsetHour => "timezone offset hour",
            Self::OffsetMinute => "timezone offset minute",
        })
    }
}

/// A well-formed literal field is out of its legal range.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, thiserror::Error)]
#[error("{value} is not a valid {field}")]
pub struct InvalidFieldError {
    field: Field,
    value: i64,
}

impl InvalidFieldError {
    #[inline]
    pub(crate) const fn new(field: Field, value: i64) -> Self {
        Self { field, value }
    }

    #[inline]
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(year: i64, month: u8, day: u8) -> CivilFields {
        CivilFields {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    #[test]
    fn ranges() {
        assert!(is_valid_year(1900));
        assert!(is_valid_year(2100));
        assert!(!is_valid_year(1899));
        assert!(!is_valid_year(2101));
        assert!(!is_valid_month(0));
        assert!(!is_valid_month(13));
        assert!(is_valid_hour(23));
        assert!(!is_valid_hour(24));
        assert!(is_valid_minute(59));
        assert!(!is_valid_minute(60));
        assert!(is_valid_second(59));
        assert!(!is_valid_second(60));
        assert!(is_valid_millisecond(999));
        assert!(!is_valid_millisecond(1000));
    }

    #[test]
    fn days() {
        assert!(is_valid_day(29, 2, 2000));
        assert!(!is_valid_day(29, 2, 1999));
        assert!(is_valid_day(29, 2, 1900));
        assert!(!is_valid_day(30, 2, 2000));
        assert!(is_valid_day(30, 4, 2021));
        assert!(!is_valid_day(31, 4, 2021));
        assert!(!is_valid_day(0, 1, 2021));
        assert!(!is_valid_day(1, 13, 2021));
    }

    #[test]
    fn first_failing_field_is_reported() {
        assert_eq!(validate_fields(&fields(2020, 2, 29)), Ok(()));
        let error = validate_fields(&fields(1899, 13, 32)).unwrap_err();
        assert_eq!(error.field(), Field::Year);
        assert_eq!(error.value(), 1899);
        let error = validate_fields(&fields(2021, 13, 32)).unwrap_err();
        assert_eq!(error.field(), Field::Month);
        let error = validate_fields(&fields(2021, 2, 29)).unwrap_err();
        assert_eq!(error.field(), Field::Day);
        assert_eq!(error.to_string(), "29 is not a valid day");
        let mut late = fields(2021, 1, 1);
        late.minute = 60;
        late.second = 60;
        assert_eq!(validate_fields(&late).unwrap_err().field(), Field::Minute);
    }

    #[test]
    fn offsets() {
        assert_eq!(validate_offset(23, 59), Ok(()));
        assert_eq!(
            validate_offset(24, 0).unwrap_err().field(),
            Field::OffsetHour
        );
        assert_eq!(
            validate_offset(1, 60).unwrap_err().field(),
            Field::OffsetMinute
        );
    }
}
