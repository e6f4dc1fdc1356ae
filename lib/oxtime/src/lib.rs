#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod calendar;
mod date_time;
mod duration;
pub mod extension;
mod parser;
mod validate;

pub use self::calendar::{CivilFields, Weekday, day_of_week, days_in_month, is_leap_year};
pub use self::date_time::{ArithmeticOverflowError, DateTime};
pub use self::duration::{Duration, InvalidUnitError, TimeUnit};
pub use self::parser::ParseDateTimeError;
pub use self::validate::{
    Field, InvalidFieldError, MAX_YEAR, MIN_YEAR, is_valid_day, is_valid_hour,
    is_valid_millisecond, is_valid_minute, is_valid_month, is_valid_second, is_valid_year,
    validate_fields,
};
