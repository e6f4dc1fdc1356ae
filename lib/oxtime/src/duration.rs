use crate::calendar::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use std::fmt;
use std::str::FromStr;

/// A signed span of time with a millisecond resolution.
///
/// It is not anchored on the timeline: two [`DateTime`](crate::DateTime) are needed for that.
/// The order is the order of the signed number of milliseconds.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash, Default)]
#[repr(transparent)]
pub struct Duration {
    millis: i64,
}

impl Duration {
    pub const MAX: Self = Self { millis: i64::MAX };
    pub const MIN: Self = Self { millis: i64::MIN };
    pub const ZERO: Self = Self { millis: 0 };

    /// Builds `amount` times `unit`.
    ///
    /// Returns `None` in case of overflow.
    ///
    /// ```
    /// use oxtime::{Duration, TimeUnit};
    ///
    /// assert_eq!(
    ///     Duration::new(2, TimeUnit::Minutes),
    ///     Some(Duration::from_millis(120_000))
    /// );
    /// assert_eq!(Duration::new(i64::MAX, TimeUnit::Seconds), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn new(amount: i64, unit: TimeUnit) -> Option<Self> {
        Some(Self {
            millis: amount.checked_mul(unit.millis())?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    #[inline]
    #[must_use]
    pub const fn to_millis(self) -> i64 {
        self.millis
    }

    /// The number of whole seconds, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_seconds(self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// The number of whole minutes, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_minutes(self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    /// The number of whole hours, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_hours(self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// The number of whole days, truncated toward zero.
    ///
    /// ```
    /// use oxtime::Duration;
    ///
    /// assert_eq!(Duration::from_millis(-129_600_000).to_days(), -1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn to_days(self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    /// The number of whole `unit`, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn to_unit(self, unit: TimeUnit) -> i64 {
        self.millis / unit.millis()
    }

    /// Returns `None` in case of overflow.
    #[inline]
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            millis: self.millis.checked_add(rhs.millis)?,
        })
    }

    /// Returns `None` in case of overflow.
    #[inline]
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Some(Self {
            millis: self.millis.checked_sub(rhs.millis)?,
        })
    }

    /// Returns `None` for [`Duration::MIN`].
    #[inline]
    #[must_use]
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            millis: self.millis.checked_neg()?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.millis < 0
    }
}

/// Compact serialization like `1d2h3m4s5ms`, zero components are omitted.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis == 0 {
            return f.write_str("0ms");
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        let mut rest = self.millis.unsigned_abs();
        for unit in TimeUnit::ALL {
            let size = unit.millis().unsigned_abs();
            let amount = rest / size;
            if amount > 0 {
                write!(f, "{amount}{}", unit.suffix())?;
            }
            rest %= size;
        }
        Ok(())
    }
}

/// A unit accepted by the `duration(amount, unit)` constructor.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimeUnit {
    /// From the largest to the smallest.
    pub const ALL: [Self; 5] = [
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// The number of milliseconds in one unit.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::Days => MILLIS_PER_DAY,
            Self::Hours => MILLIS_PER_HOUR,
            Self::Minutes => MILLIS_PER_MINUTE,
            Self::Seconds => MILLIS_PER_SECOND,
            Self::Milliseconds => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::Days => "d",
            Self::Hours => "h",
            Self::Minutes => "m",
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = InvalidUnitError;

    /// Exact and case-sensitive match of the unit name.
    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        Ok(match unit {
            "days" => Self::Days,
            "hours" => Self::Hours,
            "minutes" => Self::Minutes,
            "seconds" => Self::Seconds,
            "milliseconds" => Self::Milliseconds,
            _ => {
                return Err(InvalidUnitError {
                    unit: unit.to_owned(),
                });
            }
        })
    }
}

impl fmt::Display for TimeUnit {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit given to the duration constructor is not one of
/// `days`, `hours`, `minutes`, `seconds` or `milliseconds`.
#[derive(Eq, PartialEq, Debug, Clone, Hash, thiserror::Error)]
#[error("{unit:?} is not a valid duration unit, expected one of \"days\", \"hours\", \"minutes\", \"seconds\" or \"milliseconds\"")]
pub struct InvalidUnitError {
    unit: String,
}

impl InvalidUnitError {
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }
}
