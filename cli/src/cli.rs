use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxtime")]
/// Clock-free date-time and duration toolkit
pub struct Args {
    /// Format of the diagnostics written to stderr
    ///
    /// The verbosity is set with the RUST_LOG environment variable, "warn" by default.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse date-time literals and print their canonical UTC form and epoch milliseconds
    ///
    /// The accepted shapes are YYYY-MM-DDThh:mm:ssZ, YYYY-MM-DDThh:mm:ss.SSSZ,
    /// YYYY-MM-DDThh:mm:ss(+|-)hhmm and YYYY-MM-DDThh:mm:ss.SSS(+|-)hhmm with a year between 1900 and 2100.
    Parse {
        /// Literal(s) to parse
        #[arg(required = true)]
        literal: Vec<String>,
    },
    /// Build a duration and print it in each unit
    Duration {
        /// Signed number of units
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// One of days, hours, minutes, seconds or milliseconds
        unit: String,
    },
    /// Shift a date-time by a duration
    Add {
        /// Date-time literal to shift
        literal: String,
        /// Signed number of units
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// One of days, hours, minutes, seconds or milliseconds
        unit: String,
    },
    /// Print the duration between two date-times (left - right)
    Diff {
        /// Date-time literal to subtract from
        left: String,
        /// Date-time literal to subtract
        right: String,
    },
    /// Split a date-time into its UTC midnight and the time elapsed since it
    Truncate {
        /// Date-time literal to split
        literal: String,
    },
    /// Print the calendar parts of a date-time as a JSON record
    ///
    /// The record is meant to be handed to a policy evaluator as precomputed context data.
    Context {
        /// Date-time literal to decompose
        literal: String,
    },
    /// Validate newline-separated date-time literals
    ///
    /// Each invalid line is reported with its line number.
    /// The command fails if at least one line is invalid.
    Check {
        /// File(s) to validate
        ///
        /// If no file is given, stdin is used.
        #[arg(short, long, num_args = 0.., value_hint = ValueHint::FilePath)]
        file: Vec<PathBuf>,
        /// Literal policy applied to the constructor calls
        ///
        /// Every line is a literal, so both policies accept the same input here.
        #[arg(long, value_enum, default_value_t = PolicyArg::Strict)]
        policy: PolicyArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Constructor arguments must be literals
    Strict,
    /// Constructor arguments may be any expression
    Permissive,
}
