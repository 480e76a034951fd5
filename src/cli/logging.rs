//! Module implementing logging for the application.
//!
//! This includes setting up log filtering given a verbosity value,
//! as well as defining how the logs are being formatted to stderr.

use std::borrow::Cow;
use std::env;
use std::io::{self, Write};
use std::sync::Mutex;

use ansi_term::{Colour, Style};
use isatty;
use log::SetLoggerError;
use slog::{self, Drain, FilterLevel, Level, OwnedKVList, Record};
use slog_envlogger::LogBuilder;
use slog_scope::{self, GlobalLoggerGuard};
use slog_stdlog;
use time;


// Default logging level, i.e. the one used when -v/-q flags are absent.
const DEFAULT_FILTER_LEVEL: FilterLevel = FilterLevel::Warning;

// Arrays of log levels, indexed by verbosity in both directions.
const POSITIVE_VERBOSITY_LEVELS: &'static [FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Info,
    FilterLevel::Debug,
    FilterLevel::Trace,
];
const NEGATIVE_VERBOSITY_LEVELS: &'static [FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Error,
    FilterLevel::Critical,
    FilterLevel::Off,
];

/// Environment variable with additional filtering directives (like `RUST_LOG`).
const FILTER_ENV_VAR: &'static str = "MEMEMESH_LOG";

const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";


/// Initialize logging with given verbosity.
/// The verbosity value has the same meaning as in args::Options::verbosity.
///
/// Returned guard has to be kept alive for as long as the logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let istty = isatty::stderr_isatty();
    let stderr = Stderr{colored: istty};

    let level = filter_level(verbosity);
    let mut builder = LogBuilder::new(stderr).filter(None, level);
    if let Ok(directives) = env::var(FILTER_ENV_VAR) {
        builder = builder.parse(&directives);
    }
    let drain = Mutex::new(builder.build().ignore_res()).fuse();

    let logger = slog::Logger::root(drain, o!());
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init()?;

    if verbosity > 0 {
        info!("Logging at {:?} level (colors: {})", level, istty);
    }
    Ok(guard)
}

/// Map the verbosity value onto a log level filter.
fn filter_level(verbosity: isize) -> FilterLevel {
    let levels = if verbosity >= 0 { POSITIVE_VERBOSITY_LEVELS } else { NEGATIVE_VERBOSITY_LEVELS };
    let index = verbosity.abs() as usize;
    levels.get(index).or_else(|| levels.last()).cloned().unwrap_or(DEFAULT_FILTER_LEVEL)
}


/// Drain writing formatted log records to standard error.
struct Stderr {
    colored: bool,
}

impl Drain for Stderr {
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record, _: &OwnedKVList) -> io::Result<()> {
        let timestamp = time::strftime(TIMESTAMP_FORMAT, &time::now())
            .unwrap_or_else(|_| String::new());

        let level: Cow<str> = if self.colored {
            let style = level_style(record.level());
            style.paint(record.level().as_short_str()).to_string().into()
        } else {
            record.level().as_short_str().into()
        };
        let location = if self.colored {
            Colour::Fixed(242).paint(record.module()).to_string()
        } else {
            record.module().to_owned()
        };

        let stderr = io::stderr();
        let mut stderr = stderr.lock();
        writeln!(stderr, "{} {} {}: {}", timestamp, level, location, record.msg())
    }
}

/// Style for the level label of a log record.
fn level_style(level: Level) -> Style {
    match level {
        Level::Critical => Colour::Purple.bold(),
        Level::Error => Colour::Red.normal(),
        Level::Warning => Colour::Yellow.normal(),
        Level::Info => Colour::Green.normal(),
        Level::Debug => Colour::Blue.normal(),
        Level::Trace => Colour::Cyan.dimmed(),
    }
}
