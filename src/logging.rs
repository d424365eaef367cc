// Conditional logging macros - only active in debug builds

use chrono::Local;
use log::LevelFilter;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Level for a `-v` count: warnings by default, then info, debug, trace.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Where a TUI session writes its log, so output does not land on the screen.
pub fn log_file_path() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join(env!("CARGO_PKG_NAME"));
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    Some(dir.join(format!("{}-{stamp}.log", env!("CARGO_PKG_NAME"))))
}

/// Install the global logger. `RUST_LOG` overrides the verbosity level.
///
/// With `log_file` set, records go to that file instead of stderr.
pub fn init_logging(verbose: u8, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
    Ok(())
}
