//! Binding of the date-time and duration operations for a host expression evaluator.
//!
//! The host looks functions up by name (and by the type of their first operand for methods and
//! operators) in the static [`FUNCTIONS`] table and calls them on dynamically typed [`Value`]s.
//! Enabling or disabling the extension is up to the host: the table never changes.
//!
//! ```
//! use oxtime::extension::{Value, call};
//!
//! let start = call("datetime", &["2021-06-15T08:00:00+0200".into()])?;
//! let delay = call("duration", &[Value::Long(90), "minutes".into()])?;
//! let end = call("add", &[start.clone(), delay])?;
//! assert_eq!(end.to_string(), "2021-06-15T07:30:00Z");
//! assert_eq!(call("<", &[start, end])?, Value::Boolean(true));
//! # Ok::<_, oxtime::extension::ExtensionError>(())
//! ```

use crate::{
    ArithmeticOverflowError, DateTime, Duration, InvalidUnitError, ParseDateTimeError, TimeUnit,
};
use std::cmp::Ordering;
use std::fmt;

/// A value handed over by the host evaluator.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Value {
    Boolean(bool),
    Long(i64),
    String(String),
    DateTime(DateTime),
    Duration(Duration),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Long(_) => ValueType::Long,
            Self::String(_) => ValueType::String,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Duration(_) => ValueType::Duration,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        if let Self::Boolean(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        if let Self::Long(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_date_time(&self) -> Option<DateTime> {
        if let Self::DateTime(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_duration(&self) -> Option<Duration> {
        if let Self::Duration(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<DateTime> for Value {
    #[inline]
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Duration> for Value {
    #[inline]
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => value.fmt(f),
            Self::Long(value) => value.fmt(f),
            Self::String(value) => write!(f, "{value:?}"),
            Self::DateTime(value) => value.fmt(f),
            Self::Duration(value) => value.fmt(f),
        }
    }
}

/// The type of a [`Value`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ValueType {
    Boolean,
    Long,
    String,
    DateTime,
    Duration,
}

impl fmt::Display for ValueType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Long => "long",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
        })
    }
}

/// A binary operator overloaded for date-times and durations.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Operator {
    Subtract,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
}

impl Operator {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subtract => "-",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
        }
    }
}

impl fmt::Display for Operator {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an [`ExtensionFunction`] is written at the call site.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum FunctionKind {
    /// `datetime("...")`
    Constructor,
    /// `receiver.name(...)`
    Method,
    /// `left op right`
    Operator(Operator),
}

type Implementation = fn(&ExtensionFunction, &[Value]) -> Result<Value, ExtensionError>;

/// A function of the extension, with its signature.
pub struct ExtensionFunction {
    name: &'static str,
    kind: FunctionKind,
    parameters: &'static [ValueType],
    return_type: ValueType,
    implementation: Implementation,
}

impl ExtensionFunction {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The parameter types, the receiver first for methods and operators.
    #[inline]
    #[must_use]
    pub const fn parameters(&self) -> &'static [ValueType] {
        self.parameters
    }

    #[inline]
    #[must_use]
    pub const fn return_type(&self) -> ValueType {
        self.return_type
    }

    /// Checks the arguments against the signature and evaluates the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, ExtensionError> {
        if args.len() != self.parameters.len() {
            return Err(ExtensionError::Arity {
                name: self.name,
                expected: self.parameters.len(),
                actual: args.len(),
            });
        }
        for (index, (arg, expected)) in args.iter().zip(self.parameters).enumerate() {
            if arg.value_type() != *expected {
                return Err(self.type_error(index, arg));
            }
        }
        (self.implementation)(self, args)
    }

    fn argument<T>(
        &self,
        args: &[Value],
        index: usize,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, ExtensionError> {
        let arg = args.get(index).ok_or(ExtensionError::Arity {
            name: self.name,
            expected: self.parameters.len(),
            actual: args.len(),
        })?;
        extract(arg).ok_or_else(|| self.type_error(index, arg))
    }

    fn type_error(&self, index: usize, arg: &Value) -> ExtensionError {
        ExtensionError::ArgumentType {
            name: self.name,
            index,
            expected: self
                .parameters
                .get(index)
                .copied()
                .unwrap_or(arg.value_type()),
            actual: arg.value_type(),
        }
    }
}

impl fmt::Debug for ExtensionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionFunction")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ExtensionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parameters = self.parameters.iter();
        match self.kind {
            FunctionKind::Constructor => {
                write!(f, "{}(", self.name)?;
                for (i, parameter) in parameters.enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                f.write_str(")")?;
            }
            FunctionKind::Method => {
                if let Some(receiver) = parameters.next() {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{}(", self.name)?;
                for (i, parameter) in parameters.enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                f.write_str(")")?;
            }
            FunctionKind::Operator(operator) => {
                let left = parameters.next().copied().unwrap_or(self.return_type);
                let right = parameters.next().copied().unwrap_or(left);
                write!(f, "{left} {operator} {right}")?;
            }
        }
        write!(f, " -> {}", self.return_type)
    }
}

macro_rules! comparison {
    ($operator:ident, $operand:ident, $test:expr) => {
        ExtensionFunction {
            name: Operator::$operator.as_str(),
            kind: FunctionKind::Operator(Operator::$operator),
            parameters: &[ValueType::$operand, ValueType::$operand],
            return_type: ValueType::Boolean,
            implementation: |function, args| {
                let test: fn(Ordering) -> bool = $test;
                Ok(test(compare(function, args)?).into())
            },
        }
    };
}

macro_rules! duration_extraction {
    ($name:literal, $unit:ident) => {
        ExtensionFunction {
            name: $name,
            kind: FunctionKind::Method,
            parameters: &[ValueType::Duration],
            return_type: ValueType::Long,
            implementation: |function, args| {
                Ok(function
                    .argument(args, 0, Value::as_duration)?
                    .to_unit(TimeUnit::$unit)
                    .into())
            },
        }
    };
}

/// All the functions of the extension.
pub static FUNCTIONS: &[ExtensionFunction] = &[
    ExtensionFunction {
        name: "datetime",
        kind: FunctionKind::Constructor,
        parameters: &[ValueType::String],
        return_type: ValueType::DateTime,
        implementation: |function, args| {
            let literal = function.argument(args, 0, |v| v.as_str().map(str::to_owned))?;
            Ok(literal.parse::<DateTime>()?.into())
        },
    },
    ExtensionFunction {
        name: "duration",
        kind: FunctionKind::Constructor,
        parameters: &[ValueType::Long, ValueType::String],
        return_type: ValueType::Duration,
        implementation: |function, args| {
            let amount = function.argument(args, 0, Value::as_long)?;
            let unit = function
                .argument(args, 1, |v| v.as_str().map(str::to_owned))?
                .parse::<TimeUnit>()?;
            Ok(Duration::new(amount, unit)
                .ok_or(ArithmeticOverflowError)?
                .into())
        },
    },
    ExtensionFunction {
        name: "add",
        kind: FunctionKind::Method,
        parameters: &[ValueType::DateTime, ValueType::Duration],
        return_type: ValueType::DateTime,
        implementation: |function, args| {
            let date_time = function.argument(args, 0, Value::as_date_time)?;
            let duration = function.argument(args, 1, Value::as_duration)?;
            Ok(date_time
                .checked_add(duration)
                .ok_or(ArithmeticOverflowError)?
                .into())
        },
    },
    ExtensionFunction {
        name: "toDate",
        kind: FunctionKind::Method,
        parameters: &[ValueType::DateTime],
        return_type: ValueType::DateTime,
        implementation: |function, args| {
            Ok(function
                .argument(args, 0, Value::as_date_time)?
                .to_date()
                .ok_or(ArithmeticOverflowError)?
                .into())
        },
    },
    ExtensionFunction {
        name: "toTime",
        kind: FunctionKind::Method,
        parameters: &[ValueType::DateTime],
        return_type: ValueType::Duration,
        implementation: |function, args| {
            Ok(function
                .argument(args, 0, Value::as_date_time)?
                .to_time()
                .into())
        },
    },
    duration_extraction!("toMillis", Milliseconds),
    duration_extraction!("toSeconds", Seconds),
    duration_extraction!("toMinutes", Minutes),
    duration_extraction!("toHours", Hours),
    duration_extraction!("toDays", Days),
    ExtensionFunction {
        name: "-",
        kind: FunctionKind::Operator(Operator::Subtract),
        parameters: &[ValueType::DateTime, ValueType::DateTime],
        return_type: ValueType::Duration,
        implementation: |function, args| {
            let left = function.argument(args, 0, Value::as_date_time)?;
            let right = function.argument(args, 1, Value::as_date_time)?;
            Ok(left
                .checked_sub(right)
                .ok_or(ArithmeticOverflowError)?
                .into())
        },
    },
    comparison!(Less, DateTime, Ordering::is_lt),
    comparison!(LessOrEqual, DateTime, Ordering::is_le),
    comparison!(Greater, DateTime, Ordering::is_gt),
    comparison!(GreaterOrEqual, DateTime, Ordering::is_ge),
    comparison!(Equal, DateTime, Ordering::is_eq),
    comparison!(Less, Duration, Ordering::is_lt),
    comparison!(LessOrEqual, Duration, Ordering::is_le),
    comparison!(Greater, Duration, Ordering::is_gt),
    comparison!(GreaterOrEqual, Duration, Ordering::is_ge),
    comparison!(Equal, Duration, Ordering::is_eq),
];

fn compare(function: &ExtensionFunction, args: &[Value]) -> Result<Ordering, ExtensionError> {
    match function.parameters.first() {
        Some(ValueType::Duration) => Ok(function
            .argument(args, 0, Value::as_duration)?
            .cmp(&function.argument(args, 1, Value::as_duration)?)),
        _ => Ok(function
            .argument(args, 0, Value::as_date_time)?
            .cmp(&function.argument(args, 1, Value::as_date_time)?)),
    }
}

/// Finds the method or operator `name` whose first operand has the type `receiver_type`.
#[must_use]
pub fn lookup(name: &str, receiver_type: ValueType) -> Option<&'static ExtensionFunction> {
    FUNCTIONS.iter().find(|function| {
        function.kind != FunctionKind::Constructor
            && function.name == name
            && function.parameters.first() == Some(&receiver_type)
    })
}

/// Finds the constructor `name`.
#[must_use]
pub fn lookup_constructor(name: &str) -> Option<&'static ExtensionFunction> {
    FUNCTIONS
        .iter()
        .find(|function| function.kind == FunctionKind::Constructor && function.name == name)
}

/// Resolves `name` against the type of the first argument and evaluates it.
pub fn call(name: &str, args: &[Value]) -> Result<Value, ExtensionError> {
    if let Some(function) = lookup_constructor(name) {
        return function.call(args);
    }
    if let Some(first) = args.first() {
        if let Some(function) = lookup(name, first.value_type()) {
            return function.call(args);
        }
        // Known name but not for this receiver
        if let Some(function) = FUNCTIONS.iter().find(|function| function.name == name) {
            return Err(function.type_error(0, first));
        }
    } else if let Some(function) = FUNCTIONS.iter().find(|function| function.name == name) {
        return Err(ExtensionError::Arity {
            name: function.name,
            expected: function.parameters.len(),
            actual: 0,
        });
    }
    Err(ExtensionError::UnknownFunction(name.to_owned()))
}

/// Whether constructor arguments must be written as literals at the call site.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum LiteralPolicy {
    /// Constructor arguments must be literals so they can be checked before evaluation.
    #[default]
    Strict,
    /// Any expression is accepted.
    Permissive,
}

impl LiteralPolicy {
    /// Checks a call site of `function`, `argument_is_literal` having one entry per argument.
    ///
    /// Methods and operators are always accepted. A call site whose argument count does not
    /// match the signature is rejected under any policy.
    pub fn check(
        self,
        function: &ExtensionFunction,
        argument_is_literal: &[bool],
    ) -> Result<(), ExtensionError> {
        if argument_is_literal.len() != function.parameters.len() {
            return Err(ExtensionError::Arity {
                name: function.name,
                expected: function.parameters.len(),
                actual: argument_is_literal.len(),
            });
        }
        if self == Self::Permissive || function.kind != FunctionKind::Constructor {
            return Ok(());
        }
        if let Some(index) = argument_is_literal.iter().position(|is_literal| !is_literal) {
            return Err(ExtensionError::NonLiteralArgument {
                name: function.name,
                index,
            });
        }
        Ok(())
    }
}

/// An error raised while resolving or evaluating an extension function.
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ExtensionError {
    /// No function has this name
    #[error("The extension function {0} is not supported")]
    UnknownFunction(String),
    /// Wrong number of arguments
    #[error("The extension function {name} requires {expected} arguments, but {actual} were given")]
    Arity {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An argument does not have the expected type
    #[error("The argument {index} of {name} must be a {expected}, not a {actual}")]
    ArgumentType {
        name: &'static str,
        index: usize,
        expected: ValueType,
        actual: ValueType,
    },
    /// The literal policy is strict and a constructor argument is not a literal
    #[error("The argument {index} of {name} must be a literal")]
    NonLiteralArgument { name: &'static str, index: usize },
    #[error(transparent)]
    Parse(#[from] ParseDateTimeError),
    #[error(transparent)]
    InvalidUnit(#[from] InvalidUnitError),
    #[error(transparent)]
    Overflow(#[from] ArithmeticOverflowError),
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    fn datetime(literal: &str) -> Result<Value, ExtensionError> {
        call("datetime", &[literal.into()])
    }

    fn duration(amount: i64, unit: &str) -> Result<Value, ExtensionError> {
        call("duration", &[amount.into(), unit.into()])
    }

    #[test]
    fn table() {
        for name in ["datetime", "duration"] {
            assert!(lookup_constructor(name).is_some());
        }
        for name in ["add", "toDate", "toTime", "-", "<", "<=", ">", ">=", "=="] {
            assert!(lookup(name, ValueType::DateTime).is_some(), "{name}");
        }
        for name in [
            "toMillis",
            "toSeconds",
            "toMinutes",
            "toHours",
            "toDays",
            "<",
            "<=",
            ">",
            ">=",
            "==",
        ] {
            assert!(lookup(name, ValueType::Duration).is_some(), "{name}");
        }
        assert!(lookup("add", ValueType::Duration).is_none());
        assert!(lookup("-", ValueType::Duration).is_none());
        assert!(lookup("datetime", ValueType::String).is_none());
        assert!(lookup("year", ValueType::DateTime).is_none());
        assert!(lookup("dayOfWeek", ValueType::DateTime).is_none());
        assert_eq!(FUNCTIONS.len(), 21);
        for function in FUNCTIONS {
            match function.kind() {
                FunctionKind::Constructor => (),
                FunctionKind::Method => assert!(!function.parameters().is_empty()),
                FunctionKind::Operator(_) => assert_eq!(function.parameters().len(), 2),
            }
        }
    }

    #[test]
    fn signatures() {
        let names = FUNCTIONS.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert!(names.contains(&"datetime(string) -> datetime".to_owned()));
        assert!(names.contains(&"duration(long, string) -> duration".to_owned()));
        assert!(names.contains(&"datetime.add(duration) -> datetime".to_owned()));
        assert!(names.contains(&"duration.toDays() -> long".to_owned()));
        assert!(names.contains(&"datetime - datetime -> duration".to_owned()));
        assert!(names.contains(&"duration <= duration -> boolean".to_owned()));
    }

    #[test]
    fn constructors() -> Result<(), ExtensionError> {
        assert_eq!(
            datetime("1970-01-01T00:00:00Z")?,
            Value::DateTime("1970-01-01T00:00:00Z".parse()?)
        );
        assert_eq!(
            duration(2, "hours")?,
            Value::Duration(Duration::from_millis(7_200_000))
        );
        assert!(matches!(
            datetime("1999-02-29T00:00:00Z"),
            Err(ExtensionError::Parse(_))
        ));
        assert!(matches!(
            datetime("2021-01-01T00:00"),
            Err(ExtensionError::Parse(e)) if e.is_syntax_error()
        ));
        assert!(matches!(
            duration(1, "weeks"),
            Err(ExtensionError::InvalidUnit(e)) if e.unit() == "weeks"
        ));
        assert_eq!(
            duration(i64::MAX, "days"),
            Err(ExtensionError::Overflow(ArithmeticOverflowError))
        );
        Ok(())
    }

    #[test]
    fn methods() -> Result<(), ExtensionError> {
        let instant = datetime("2021-06-15T13:45:30.250Z")?;
        assert_eq!(
            call("toDate", &[instant.clone()])?,
            datetime("2021-06-15T00:00:00Z")?
        );
        assert_eq!(
            call("toTime", &[instant.clone()])?,
            Value::Duration(Duration::from_millis(49_530_250))
        );
        assert_eq!(
            call("add", &[instant, duration(-1, "days")?])?,
            datetime("2021-06-14T13:45:30.250Z")?
        );

        let span = duration(-119, "seconds")?;
        assert_eq!(call("toMillis", &[span.clone()])?, Value::Long(-119_000));
        assert_eq!(call("toSeconds", &[span.clone()])?, Value::Long(-119));
        assert_eq!(call("toMinutes", &[span.clone()])?, Value::Long(-1));
        assert_eq!(call("toHours", &[span.clone()])?, Value::Long(0));
        assert_eq!(call("toDays", &[span])?, Value::Long(0));
        Ok(())
    }

    #[test]
    fn operators() -> Result<(), ExtensionError> {
        let early = datetime("2020-01-31T23:00:00Z")?;
        let late = datetime("2020-02-01T01:00:00+0100")?;
        assert_eq!(
            call("-", &[late.clone(), early.clone()])?,
            Value::Duration(Duration::from_millis(3_600_000))
        );
        assert_eq!(call("<", &[early.clone(), late.clone()])?, true.into());
        assert_eq!(call("<=", &[early.clone(), early.clone()])?, true.into());
        assert_eq!(call(">", &[early.clone(), late.clone()])?, false.into());
        assert_eq!(call(">=", &[late.clone(), early.clone()])?, true.into());
        assert_eq!(call("==", &[early.clone(), late])?, false.into());
        assert_eq!(
            call("==", &[early, datetime("2020-02-01T00:00:00+0100")?])?,
            true.into()
        );

        let short = duration(10, "minutes")?;
        let long = duration(1, "hours")?;
        assert_eq!(call("<", &[short.clone(), long.clone()])?, true.into());
        assert_eq!(call(">=", &[short.clone(), long.clone()])?, false.into());
        assert_eq!(call("==", &[long, duration(60, "minutes")?])?, true.into());
        assert_eq!(call("<=", &[short.clone(), short])?, true.into());
        Ok(())
    }

    #[test]
    fn overflow() -> Result<(), ExtensionError> {
        let far = duration(i64::MAX, "milliseconds")?;
        assert_eq!(
            call("add", &[datetime("2100-01-01T00:00:00Z")?, far]),
            Err(ExtensionError::Overflow(ArithmeticOverflowError))
        );
        let min = Value::DateTime(DateTime::from_millis(i64::MIN));
        assert_eq!(
            call("toDate", &[min.clone()]),
            Err(ExtensionError::Overflow(ArithmeticOverflowError))
        );
        assert_eq!(
            call("-", &[datetime("2000-01-01T00:00:00Z")?, min]),
            Err(ExtensionError::Overflow(ArithmeticOverflowError))
        );
        Ok(())
    }

    #[test]
    fn resolution_errors() -> Result<(), ExtensionError> {
        assert_eq!(
            call("now", &[]),
            Err(ExtensionError::UnknownFunction("now".to_owned()))
        );
        assert_eq!(
            call("year", &[datetime("2000-01-01T00:00:00Z")?]),
            Err(ExtensionError::UnknownFunction("year".to_owned()))
        );
        assert_eq!(
            call("datetime", &[]),
            Err(ExtensionError::Arity {
                name: "datetime",
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            call("toDays", &[]),
            Err(ExtensionError::Arity {
                name: "toDays",
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            call("datetime", &[Value::Long(0)]),
            Err(ExtensionError::ArgumentType {
                name: "datetime",
                index: 0,
                expected: ValueType::String,
                actual: ValueType::Long
            })
        );
        assert_eq!(
            call("toDays", &[datetime("2000-01-01T00:00:00Z")?]),
            Err(ExtensionError::ArgumentType {
                name: "toDays",
                index: 0,
                expected: ValueType::Duration,
                actual: ValueType::DateTime
            })
        );
        assert_eq!(
            call("<", &[datetime("2000-01-01T00:00:00Z")?, duration(1, "days")?]),
            Err(ExtensionError::ArgumentType {
                name: "<",
                index: 1,
                expected: ValueType::DateTime,
                actual: ValueType::Duration
            })
        );
        assert_eq!(
            call("toDate", &[datetime("2000-01-01T00:00:00Z")?, Value::Boolean(true)]),
            Err(ExtensionError::Arity {
                name: "toDate",
                expected: 1,
                actual: 2
            })
        );
        Ok(())
    }

    #[test]
    fn literal_policy() -> Result<(), ExtensionError> {
        let datetime = lookup_constructor("datetime").unwrap();
        let add = lookup("add", ValueType::DateTime).unwrap();
        assert_eq!(LiteralPolicy::default(), LiteralPolicy::Strict);
        LiteralPolicy::Strict.check(datetime, &[true])?;
        assert_eq!(
            LiteralPolicy::Strict.check(datetime, &[false]),
            Err(ExtensionError::NonLiteralArgument {
                name: "datetime",
                index: 0
            })
        );
        assert_eq!(
            LiteralPolicy::Strict.check(lookup_constructor("duration").unwrap(), &[true, false]),
            Err(ExtensionError::NonLiteralArgument {
                name: "duration",
                index: 1
            })
        );
        LiteralPolicy::Permissive.check(datetime, &[false])?;
        LiteralPolicy::Strict.check(add, &[false, false])?;
        Ok(())
    }

    #[test]
    fn literal_policy_needs_one_flag_per_argument() {
        let duration = lookup_constructor("duration").unwrap();
        for policy in [LiteralPolicy::Strict, LiteralPolicy::Permissive] {
            for flags in [&[][..], &[true][..], &[true, true, true][..]] {
                assert_eq!(
                    policy.check(duration, flags),
                    Err(ExtensionError::Arity {
                        name: "duration",
                        expected: 2,
                        actual: flags.len()
                    })
                );
            }
        }
        assert_eq!(
            LiteralPolicy::Strict.check(lookup("toDays", ValueType::Duration).unwrap(), &[]),
            Err(ExtensionError::Arity {
                name: "toDays",
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn values() {
        assert_eq!(Value::from(true).value_type(), ValueType::Boolean);
        assert_eq!(Value::from(1).value_type(), ValueType::Long);
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(1).as_str(), None);
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(
            Value::from(Duration::from_millis(61_000)).to_string(),
            "1m1s"
        );
        assert_eq!(Value::Boolean(false).as_boolean(), Some(false));
        assert_eq!(Value::Long(3).as_long(), Some(3));
    }
}
