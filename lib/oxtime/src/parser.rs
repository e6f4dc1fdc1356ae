use crate::DateTime;
use crate::calendar::{CivilFields, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use crate::validate::{InvalidFieldError, validate_fields, validate_offset};

/// An error raised while parsing a date-time literal.
///
/// It is either a syntax error (the text does not have one of the accepted shapes) or a
/// validation error (a field is out of its range, see [`invalid_field`](Self::invalid_field)).
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct ParseDateTimeError(#[from] ParseDateTimeErrorKind);

#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
enum ParseDateTimeErrorKind {
    #[error("{message} at position {position}")]
    Syntax {
        message: &'static str,
        position: usize,
    },
    #[error(transparent)]
    InvalidField(#[from] InvalidFieldError),
}

impl ParseDateTimeError {
    #[inline]
    #[must_use]
    pub fn is_syntax_error(&self) -> bool {
        matches!(self.0, ParseDateTimeErrorKind::Syntax { .. })
    }

    /// The offending field if the literal is well-formed but out of range.
    #[inline]
    #[must_use]
    pub fn invalid_field(&self) -> Option<&InvalidFieldError> {
        match &self.0 {
            ParseDateTimeErrorKind::InvalidField(error) => Some(error),
            ParseDateTimeErrorKind::Syntax { .. } => None,
        }
    }

    /// The byte offset of the first unexpected character for syntax errors.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.0 {
            ParseDateTimeErrorKind::Syntax { position, .. } => Some(position),
            ParseDateTimeErrorKind::InvalidField(_) => None,
        }
    }
}

impl From<InvalidFieldError> for ParseDateTimeError {
    #[inline]
    fn from(error: InvalidFieldError) -> Self {
        Self(error.into())
    }
}

// literal ::= date 'T' time millis? timezone
// date ::= digit{4} '-' digit{2} '-' digit{2}
// time ::= digit{2} ':' digit{2} ':' digit{2}
// millis ::= '.' digit{3}
// timezone ::= 'Z' | ('+' | '-') digit{4}
pub(crate) fn parse_date_time(input: &str) -> Result<DateTime, ParseDateTimeError> {
    let mut reader = LiteralReader::new(input);
    let year = reader.digits(4, "The year must be encoded with four digits")?;
    reader.expect(b'-', "The year and month must be separated by '-'")?;
    let month = reader.two_digits("The month must be encoded with two digits")?;
    reader.expect(b'-', "The month and day must be separated by '-'")?;
    let day = reader.two_digits("The day must be encoded with two digits")?;
    reader.expect(b'T', "The date and time must be separated by 'T'")?;
    let hour = reader.two_digits("The hours must be encoded with two digits")?;
    reader.expect(b':', "The hours and minutes must be separated by ':'")?;
    let minute = reader.two_digits("The minutes must be encoded with two digits")?;
    reader.expect(b':', "The minutes and seconds must be separated by ':'")?;
    let second = reader.two_digits("The seconds must be encoded with two digits")?;
    let millisecond = if reader.skip(b'.') {
        reader.digits(3, "The milliseconds must be encoded with three digits")?
    } else {
        0
    };
    let offset = timezone_frag(&mut reader)?;
    reader.expect_end("Unexpected characters after the timezone")?;

    let fields = CivilFields {
        year: year.into(),
        month,
        day,
        hour,
        minute,
        second,
        millisecond,
    };
    validate_fields(&fields)?;
    let offset_millis = if let Some((sign, hours, minutes)) = offset {
        validate_offset(hours, minutes)?;
        sign * (i64::from(hours) * MILLIS_PER_HOUR + i64::from(minutes) * MILLIS_PER_MINUTE)
    } else {
        0
    };
    Ok(DateTime::from_millis(fields.naive_millis() - offset_millis))
}

// timezone ::= 'Z' | ('+' | '-') digit{4}
fn timezone_frag(
    reader: &mut LiteralReader<'_>,
) -> Result<Option<(i64, u8, u8)>, ParseDateTimeError> {
    let sign = if reader.skip(b'Z') {
        return Ok(None);
    } else if reader.skip(b'+') {
        1
    } else if reader.skip(b'-') {
        -1
    } else {
        return Err(reader.error(
            "The timezone must be 'Z' or a '+hhmm' or '-hhmm' offset",
        ));
    };
    let hours = reader.two_digits("The timezone offset hours must be encoded with two digits")?;
    let minutes =
        reader.two_digits("The timezone offset minutes must be encoded with two digits")?;
    Ok(Some((sign, hours, minutes)))
}

/// Single pass, no backtracking, cursor over the literal bytes.
struct LiteralReader<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> LiteralReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            position: 0,
        }
    }

    /// Consumes `c` if it is the next byte.
    fn skip(&mut self, c: u8) -> bool {
        if self.input.get(self.position) == Some(&c) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: u8, message: &'static str) -> Result<(), ParseDateTimeError> {
        if self.skip(c) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn expect_end(&self, message: &'static str) -> Result<(), ParseDateTimeError> {
        if self.position == self.input.len() {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Reads exactly `width` ASCII digits, `width` being at most 4.
    fn digits(&mut self, width: usize, message: &'static str) -> Result<u16, ParseDateTimeError> {
        let mut value = 0;
        for _ in 0..width {
            value = value * 10 + u16::from(self.digit(message)?);
        }
        Ok(value)
    }

    /// Reads exactly two ASCII digits, at most 99.
    fn two_digits(&mut self, message: &'static str) -> Result<u8, ParseDateTimeError> {
        Ok(self.digit(message)? * 10 + self.digit(message)?)
    }

    fn digit(&mut self, message: &'static str) -> Result<u8, ParseDateTimeError> {
        match self.input.get(self.position) {
            Some(c) if c.is_ascii_digit() => {
                self.position += 1;
                Ok(c - b'0')
            }
            _ => Err(self.error(message)),
        }
    }

    fn error(&self, message: &'static str) -> ParseDateTimeError {
        ParseDateTimeErrorKind::Syntax {
            message,
            position: self.position,
        }
        .into()
    }
}
