//! # synclog
//! Thread-safe leveled logger. One [`Logger`] is shared by any number of
//! threads; every message is written to its sink as a single, flushed line
//! that never interleaves with another thread's output.
//!
//! Lines look like `[INFO](2024-05-01 12:00:00) -- message`, with the tag
//! colored when writing to a terminal. Fatal, error and warn messages go to
//! the error sink (standard error by default), everything else to the normal
//! sink (standard output by default).
//!
//! ## Usage
//! ```rust
//! use synclog::{Severity, logger_config};
//!
//! let logger = logger_config().with_level(Severity::Debug).build();
//! synclog::info!(logger, "Hello, {}!\n", "world");
//! logger.debug("debug line\n");
//! logger.verbose("suppressed\n");
//! logger.close().unwrap();
//! ```
//!
//! ## Multi-threaded logging
//! ```rust
//! use std::sync::Arc;
//! use synclog::{Logger, Severity};
//!
//! let logger = Arc::new(Logger::new(Severity::Info));
//! let handles: Vec<_> = (0..5).map(|i| {
//!     let logger = Arc::clone(&logger);
//!     std::thread::spawn(move || {
//!         synclog::warn!(logger, "Hello from thread {i}!\n");
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! // every borrower has joined, so the logger can be shut down
//! Arc::try_unwrap(logger).unwrap().close().unwrap();
//! ```
//!
//! ## Logging to files
//! Either stream can be redirected to a file, which is created if missing and appended to.
//!
//! ```rust
//! use synclog::{Severity, logger_config};
//!
//! let path = std::env::temp_dir().join(format!("synclog_doc_app_{}.log", std::process::id()));
//! std::fs::remove_file(&path).ok();
//! let logger = logger_config()
//!     .with_level(Severity::Info)
//!     .with_normal_file(&path)
//!     .expect("Unable to create log file")
//!     .build();
//! logger.info("Hello, world!\n");
//! logger.close().unwrap();
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with(" -- Hello, world!\n"));
//! ```
//!
//! ## Environment
//! `SYNCLOG_LEVEL` (default `info`) and `SYNCLOG_COLOR` (`auto`, `always` or
//! `never`) set the defaults used by [`logger_config`].

mod config;
mod error;
mod level;
mod log_writer;
mod logger;
mod utils;

pub use config::{SYNCLOG_CONFIG, SyncLogConfig};
pub use error::{Error, Result};
pub use level::{ColorMode, Destination, Severity};
pub use log_writer::{SharedBuffer, Sink};
pub use logger::{ConfigBuilder, Logger, LoggerGuard};
pub use utils::TIMESTAMP_LEN;

/// Returns a default ConfigBuilder for configuring a logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Logs a fatal message: `synclog::fatal!(logger, "format {}\n", args)`.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $logger.verbose(::std::format_args!($($arg)+))
    };
}
