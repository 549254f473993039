use std::{
    fmt,
    io::{self, Write},
    ops::Deref,
    path::Path,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
};

use log::{LevelFilter, Log};

use crate::{
    config::SYNCLOG_CONFIG,
    error::Result,
    level::{ColorMode, Destination, Severity},
    log_writer::Sink,
    utils::{format_line, timestamp},
};

/// Writes to the process's standard error directly, bypassing every logger.
pub(crate) fn diagnostic(args: fmt::Arguments) {
    let _ = writeln!(io::stderr().lock(), "synclog: {args}");
}

struct Sinks {
    normal: Sink,
    error: Sink,
}

impl Sinks {
    fn get_mut(&mut self, destination: Destination) -> &mut Sink {
        match destination {
            Destination::Normal => &mut self.normal,
            Destination::Error => &mut self.error,
        }
    }
}

/// A leveled logger safe to share between threads.
///
/// Every call either writes one whole line to its sink and flushes it, or
/// writes nothing. Lines from concurrent callers never interleave.
///
/// ```rust
/// use synclog::{Logger, Severity, Sink, SharedBuffer};
///
/// let out = SharedBuffer::new();
/// let logger = Logger::with_sinks(Severity::Info, Sink::writer(out.clone()), Sink::Stderr);
/// synclog::info!(logger, "Test number: {}, string: {}\n", 42, "hello");
/// logger.debug("suppressed\n");
/// assert!(out.to_string_lossy().ends_with(" -- Test number: 42, string: hello\n"));
/// ```
pub struct Logger {
    threshold: AtomicU8,
    sinks: Mutex<Sinks>,
    normal_colored: bool,
    error_colored: bool,
    failures: AtomicU64,
}

fn use_color(mode: ColorMode, sink: &Sink) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            sink.is_terminal() && colored::control::SHOULD_COLORIZE.should_colorize()
        }
    }
}

impl Logger {
    /// Creates a logger writing to standard output and standard error.
    pub fn new(threshold: Severity) -> Self {
        Self::with_sinks(threshold, Sink::Stdout, Sink::Stderr)
    }

    pub fn with_sinks(threshold: Severity, normal: Sink, error: Sink) -> Self {
        Self::assemble(threshold, ColorMode::Auto, normal, error)
    }

    fn assemble(threshold: Severity, color: ColorMode, normal: Sink, error: Sink) -> Self {
        Self {
            threshold: AtomicU8::new(threshold.rank()),
            normal_colored: use_color(color, &normal),
            error_colored: use_color(color, &error),
            sinks: Mutex::new(Sinks { normal, error }),
            failures: AtomicU64::new(0),
        }
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_rank(self.threshold.load(Ordering::Relaxed)).unwrap_or(Severity::Verbose)
    }

    /// Changes the threshold. Calls racing with this may see either value.
    pub fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold.rank(), Ordering::Relaxed);
    }

    /// Whether a message of this severity would be written.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.rank() <= self.threshold.load(Ordering::Relaxed)
    }

    /// Number of log calls abandoned because of a poisoned lock or a failing sink.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message)
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message)
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message)
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message)
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Severity::Trace, message)
    }

    pub fn verbose(&self, message: impl fmt::Display) {
        self.log(Severity::Verbose, message)
    }

    /// Writes `message` at `severity`. The text is written as is: no newline is
    /// appended and nothing in it is interpreted.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        if !self.enabled(severity) {
            return;
        }
        // Render before locking so caller Display impls never run under the lock.
        let message = message.to_string();
        self.write_line(severity, &message);
    }

    fn write_line(&self, severity: Severity, message: &str) {
        let Some(mut sinks) = self.lock() else {
            return;
        };
        let destination = severity.destination();
        let colored = match destination {
            Destination::Normal => self.normal_colored,
            Destination::Error => self.error_colored,
        };
        let line = format_line(severity, colored, &timestamp(), message);
        let sink = sinks.get_mut(destination);
        if let Err(err) = sink.write_all(&line).and_then(|()| sink.flush()) {
            self.fail(format_args!("unable to write {severity} message: {err}"));
        }
    }

    /// Flushes both sinks.
    pub fn flush(&self) {
        let Some(mut sinks) = self.lock() else {
            return;
        };
        if let Err(err) = sinks.normal.flush().and_then(|()| sinks.error.flush()) {
            self.fail(format_args!("unable to flush sinks: {err}"));
        }
    }

    /// Shuts the logger down, flushing both sinks.
    ///
    /// Taking `self` by value means no other thread can still be logging
    /// through it. For a shared logger, join the other threads and recover it
    /// with [`Arc::try_unwrap`] first.
    pub fn close(self) -> Result<()> {
        let mut sinks = self.sinks.into_inner().unwrap_or_else(PoisonError::into_inner);
        sinks.normal.flush()?;
        sinks.error.flush()?;
        Ok(())
    }

    fn lock(&self) -> Option<MutexGuard<'_, Sinks>> {
        match self.sinks.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                // A writer panicked mid-line. Drop this call and let the next one through.
                self.sinks.clear_poison();
                self.fail(format_args!("logger lock poisoned, message dropped"));
                None
            }
        }
    }

    fn fail(&self, args: fmt::Arguments) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        diagnostic(args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("normal_colored", &self.normal_colored)
            .field("error_colored", &self.error_colored)
            .field("failures", &self.failures())
            .finish_non_exhaustive()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        // `log` records never carry their own line ending.
        Logger::log(self, record.level().into(), format_args!("{}\n", record.args()));
    }

    fn flush(&self) {
        Logger::flush(self)
    }
}

struct GlobalLogger(Arc<Logger>);

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Log::enabled(&*self.0, metadata)
    }

    fn log(&self, record: &log::Record) {
        Log::log(&*self.0, record)
    }

    fn flush(&self) {
        self.0.flush()
    }
}

/// Guard returned by [`ConfigBuilder::init_global`]. Flushes the logger when dropped.
pub struct LoggerGuard {
    logger: Arc<Logger>,
}

impl LoggerGuard {
    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }
}

impl Deref for LoggerGuard {
    type Target = Logger;
    fn deref(&self) -> &Self::Target {
        &self.logger
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        self.logger.flush();
    }
}

/// Builder for configuring a [`Logger`].
pub struct ConfigBuilder {
    level: Severity,
    color: ColorMode,
    normal: Sink,
    error: Sink,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            level: SYNCLOG_CONFIG.LEVEL,
            color: SYNCLOG_CONFIG.COLOR,
            normal: Sink::Stdout,
            error: Sink::Stderr,
        }
    }
}

impl ConfigBuilder {
    /// Sets the threshold.
    pub fn with_level(self, level: Severity) -> Self {
        Self { level, ..self }
    }
    /// Maybe sets the threshold.
    pub fn maybe_with_level(self, level: Option<Severity>) -> Self {
        match level {
            Some(level) => self.with_level(level),
            None => self,
        }
    }
    pub fn with_color(self, color: ColorMode) -> Self {
        Self { color, ..self }
    }
    /// Sets the sink for info, debug, trace and verbose messages.
    pub fn with_normal_sink<W: Write + Send + 'static>(self, writer: W) -> Self {
        Self {
            normal: Sink::writer(writer),
            ..self
        }
    }
    /// Sets the sink for fatal, error and warn messages.
    pub fn with_error_sink<W: Write + Send + 'static>(self, writer: W) -> Self {
        Self {
            error: Sink::writer(writer),
            ..self
        }
    }
    /// Appends normal messages to a file instead of standard output.
    pub fn with_normal_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(Self {
            normal: Sink::file(path)?,
            ..self
        })
    }
    /// Appends error messages to a file instead of standard error.
    pub fn with_error_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(Self {
            error: Sink::file(path)?,
            ..self
        })
    }

    pub fn build(self) -> Logger {
        let Self {
            level,
            color,
            normal,
            error,
        } = self;
        Logger::assemble(level, color, normal, error)
    }

    pub fn build_shared(self) -> Arc<Logger> {
        Arc::new(self.build())
    }

    /// Installs the logger as the `log` crate backend for the whole process.
    ///
    /// `log` has no fatal or verbose level: its five levels map onto the
    /// matching severities, and the logger's own threshold does the filtering.
    #[must_use = "LoggerGuard flushes the logger when dropped. Do \"let _guard = logger_config().init_global()?;\""]
    pub fn init_global(self) -> Result<LoggerGuard> {
        let logger = self.build_shared();
        log::set_boxed_logger(Box::new(GlobalLogger(Arc::clone(&logger))))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(LoggerGuard { logger })
    }
}
