use crate::Duration;
use crate::calendar::{CivilFields, MILLIS_PER_DAY};
use crate::parser::{ParseDateTimeError, parse_date_time};
use std::fmt;
use std::str::FromStr;

/// An instant on the UTC timeline with a millisecond resolution.
///
/// It is encoded as a signed number of milliseconds since `1970-01-01T00:00:00Z`.
/// Values are only built by parsing a literal or by arithmetic on other values:
/// there is no way to read the current time.
///
/// ```
/// use oxtime::{DateTime, Duration, TimeUnit};
///
/// let start = "2021-06-15T22:30:00-0230".parse::<DateTime>()?;
/// assert_eq!(start.to_string(), "2021-06-16T01:00:00Z");
/// let end = start
///     .checked_add(Duration::new(90, TimeUnit::Minutes).unwrap())
///     .unwrap();
/// assert_eq!(end.checked_sub(start), Duration::new(5_400, TimeUnit::Seconds));
/// # Ok::<_, oxtime::ParseDateTimeError>(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
#[repr(transparent)]
pub struct DateTime {
    millis: i64,
}

impl DateTime {
    #[inline]
    pub(crate) const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Milliseconds since `1970-01-01T00:00:00Z`.
    #[inline]
    #[must_use]
    pub const fn to_millis(self) -> i64 {
        self.millis
    }

    /// Shifts the instant by `duration`.
    ///
    /// The result is not checked against the literal year range.
    /// Returns `None` in case of overflow.
    #[inline]
    #[must_use]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        Some(Self {
            millis: self.millis.checked_add(duration.to_millis())?,
        })
    }

    /// The signed duration from `rhs` to `self`.
    ///
    /// Returns `None` in case of overflow.
    #[inline]
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Duration> {
        Some(Duration::from_millis(self.millis.checked_sub(rhs.millis)?))
    }

    /// The UTC midnight starting the day of this instant.
    ///
    /// Instants before the epoch go back to the previous midnight, not toward the epoch.
    ///
    /// Returns `None` in case of overflow, i.e. for the instants of the first, partial,
    /// representable day.
    ///
    /// ```
    /// use oxtime::DateTime;
    ///
    /// assert_eq!(
    ///     "1969-12-31T18:00:00Z"
    ///         .parse::<DateTime>()?
    ///         .to_date()
    ///         .map(|d| d.to_string()),
    ///     Some("1969-12-31T00:00:00Z".to_owned())
    /// );
    /// # Ok::<_, oxtime::ParseDateTimeError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn to_date(self) -> Option<Self> {
        Some(Self {
            millis: self
                .millis
                .checked_sub(self.millis.rem_euclid(MILLIS_PER_DAY))?,
        })
    }

    /// The time elapsed since [`to_date`](Self::to_date), always in `[0, 1 day)`.
    #[inline]
    #[must_use]
    pub const fn to_time(self) -> Duration {
        Duration::from_millis(self.millis.rem_euclid(MILLIS_PER_DAY))
    }
}

impl FromStr for DateTime {
    type Err = ParseDateTimeError;

    /// Parses one of `YYYY-MM-DDThh:mm:ssZ`, `YYYY-MM-DDThh:mm:ss.SSSZ`,
    /// `YYYY-MM-DDThh:mm:ss(+|-)hhmm` and `YYYY-MM-DDThh:mm:ss.SSS(+|-)hhmm`.
    ///
    /// February 29th is accepted in every year divisible by 4, but instants are placed on the
    /// Gregorian timeline: `1900-02-29` and `2100-02-29` denote the same instant as the following
    /// March 1st and are printed as such.
    ///
    /// ```
    /// use oxtime::DateTime;
    ///
    /// assert_eq!(
    ///     "2100-02-29T12:00:00Z".parse::<DateTime>()?.to_string(),
    ///     "2100-03-01T12:00:00Z"
    /// );
    /// # Ok::<_, oxtime::ParseDateTimeError>(())
    /// ```
    #[inline]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_date_time(input)
    }
}

/// Canonical UTC literal, with milliseconds only when they are not zero.
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = CivilFields::from_date_time(*self);
        if fields.year < 0 {
            f.write_str("-")?;
        }
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            fields.year.unsigned_abs(),
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second
        )?;
        if fields.millisecond != 0 {
            write!(f, ".{:03}", fields.millisecond)?;
        }
        f.write_str("Z")
    }
}

/// An operation went out of the representable range of milliseconds.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, thiserror::Error)]
#[error("overflow during date-time or duration computation")]
pub struct ArithmeticOverflowError;
