use crate::cli::{Args, Command, LogFormat, PolicyArg};
use anyhow::{Context, bail};
use clap::Parser;
use oxtime::extension::{LiteralPolicy, Value, call, lookup_constructor};
use oxtime::{CivilFields, DateTime, Duration, TimeUnit, day_of_week};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write, stdin, stdout};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);
    let mut out = stdout().lock();
    match args.command {
        Command::Parse { literal } => {
            for literal in literal {
                let value = date_time(&literal)?;
                debug!(%literal, millis = value.to_millis(), "parsed");
                writeln!(out, "{value}\t{}", value.to_millis())?;
            }
            Ok(())
        }
        Command::Duration { amount, unit } => {
            let duration = duration(amount, &unit)?;
            writeln!(out, "duration\t{duration}")?;
            for method in ["toMillis", "toSeconds", "toMinutes", "toHours", "toDays"] {
                writeln!(out, "{method}\t{}", call(method, &[duration.into()])?)?;
            }
            Ok(())
        }
        Command::Add {
            literal,
            amount,
            unit,
        } => {
            let start = date_time(&literal)?;
            let duration = duration(amount, &unit)?;
            let end = call("add", &[start.into(), duration.into()])
                .with_context(|| format!("Not able to add {duration} to {start}"))?;
            writeln!(out, "{end}")?;
            Ok(())
        }
        Command::Diff { left, right } => {
            let left = date_time(&left)?;
            let right = date_time(&right)?;
            let difference = call("-", &[left.into(), right.into()])
                .with_context(|| format!("Not able to subtract {right} from {left}"))?;
            let millis = call("toMillis", &[difference.clone()])?;
            writeln!(out, "{difference}\t{millis}")?;
            Ok(())
        }
        Command::Truncate { literal } => {
            let value = Value::from(date_time(&literal)?);
            writeln!(out, "toDate\t{}", call("toDate", &[value.clone()])?)?;
            writeln!(out, "toTime\t{}", call("toTime", &[value])?)?;
            Ok(())
        }
        Command::Context { literal } => {
            let context = CalendarContext::new(date_time(&literal)?);
            serde_json::to_writer(&mut out, &context)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Check { file, policy } => {
            let policy = match policy {
                PolicyArg::Strict => LiteralPolicy::Strict,
                PolicyArg::Permissive => LiteralPolicy::Permissive,
            };
            info!(?policy, "checking literals");
            let mut invalid = 0;
            if file.is_empty() {
                invalid += check(stdin().lock(), "<stdin>", policy, &mut out)?;
            } else {
                for file in file {
                    let reader = BufReader::new(
                        File::open(&file)
                            .with_context(|| format!("Error while opening file {}", file.display()))?,
                    );
                    invalid += check(reader, &file.display().to_string(), policy, &mut out)
                        .with_context(|| format!("Error while reading file {}", file.display()))?;
                }
            }
            if invalid > 0 {
                bail!("{invalid} invalid date-time literal(s)");
            }
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

fn date_time(literal: &str) -> anyhow::Result<DateTime> {
    literal
        .parse()
        .with_context(|| format!("Invalid date-time literal {literal:?}"))
}

fn duration(amount: i64, unit: &str) -> anyhow::Result<Duration> {
    let unit = unit.parse::<TimeUnit>()?;
    Duration::new(amount, unit).with_context(|| format!("{amount} {unit} does not fit in a duration"))
}

/// Validates each line of `reader` as a `datetime(...)` constructor argument.
///
/// Returns the number of invalid lines.
fn check(
    reader: impl BufRead,
    source: &str,
    policy: LiteralPolicy,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let constructor =
        lookup_constructor("datetime").context("The datetime constructor is not registered")?;
    let mut invalid = 0;
    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        let result = match std::str::from_utf8(line) {
            // Lines are literals by construction
            Ok(literal) => policy
                .check(constructor, &[true])
                .and_then(|()| constructor.call(&[literal.into()]))
                .map_err(anyhow::Error::from),
            Err(error) => Err(anyhow::Error::from(error).context("The line is not valid UTF-8")),
        };
        if let Err(error) = result {
            let error = format!("{error:#}");
            warn!(source, line = number + 1, %error, "invalid literal");
            writeln!(out, "{source}:{}: {error}", number + 1)?;
            invalid += 1;
        }
    }
    debug!(source, invalid, "checked");
    Ok(invalid)
}

/// Calendar parts of an instant, precomputed for hosts that need them as context data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarContext {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    day_of_week: &'static str,
    epoch_millis: i64,
}

impl CalendarContext {
    fn new(date_time: DateTime) -> Self {
        let fields = CivilFields::from_date_time(date_time);
        Self {
            year: fields.year,
            month: fields.month,
            day: fields.day,
            hour: fields.hour,
            minute: fields.minute,
            second: fields.second,
            millisecond: fields.millisecond,
            day_of_week: day_of_week(date_time).as_str(),
            epoch_millis: date_time.to_millis(),
        }
    }
}
