//! Logger set-up for the spiral design binaries.

use std::time::Instant;
use log::Level;
use thiserror::Error;

pub use log::LevelFilter;

/// Returned when the logger can't be installed.
#[derive(Debug, Error)]
#[error("an error occurred while setting up the logger: {0}")]
pub struct LoggerInitError(#[from] log::SetLoggerError);

fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    }
}

/// Map a count of `-v` flags onto a level filter, starting from `Warn`.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a logger writing to stderr at `min_level` and above.
///
/// Each line carries the seconds elapsed since this call. Debug and trace
/// lines also carry their target.
///
/// Must only be called once per process.
pub fn init(min_level: LevelFilter) -> Result<(), LoggerInitError> {
    let start = Instant::now();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let elapsed = start.elapsed().as_secs_f64();
            if record.level() > Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    elapsed,
                    level_to_str(record.level()),
                    record.target(),
                    message,
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    elapsed,
                    level_to_str(record.level()),
                    message,
                ))
            }
        })
        .level(min_level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
