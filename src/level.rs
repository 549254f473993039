use std::{fmt, str::FromStr};

use colored::Color;

use crate::error::Error;

/// Severity of a log message, from most severe to least severe.
///
/// The discriminant is the rank used for threshold comparison: a message is
/// emitted iff its rank is lower than or equal to the logger's threshold rank.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
    Verbose = 6,
}

/// Which of the two logger sinks a message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Normal,
    Error,
}

impl Severity {
    /// Every severity, in rank order.
    pub const ALL: [Severity; 7] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
        Severity::Verbose,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
            Severity::Verbose => "VERBOSE",
        }
    }

    /// The bracketed tag written at the start of every line.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Fatal => "[FATAL]",
            Severity::Error => "[ERROR]",
            Severity::Warn => "[WARN]",
            Severity::Info => "[INFO]",
            Severity::Debug => "[DEBUG]",
            Severity::Trace => "[TRACE]",
            Severity::Verbose => "[VERBOSE]",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Severity::Fatal => Color::Red,
            Severity::Error => Color::BrightRed,
            Severity::Warn => Color::BrightYellow,
            Severity::Info => Color::BrightGreen,
            Severity::Debug => Color::BrightBlue,
            Severity::Trace => Color::BrightCyan,
            Severity::Verbose => Color::BrightWhite,
        }
    }

    /// Fatal, error and warn go to the error sink, everything else to the normal sink.
    pub fn destination(self) -> Destination {
        match self {
            Severity::Fatal | Severity::Error | Severity::Warn => Destination::Error,
            Severity::Info | Severity::Debug | Severity::Trace | Severity::Verbose => {
                Destination::Normal
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| Error::InvalidSeverity(s.into()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            "verbose" => Ok(Severity::Verbose),
            _ => Err(Error::InvalidSeverity(s.into())),
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// When to wrap level tags in ANSI color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only the process's own standard streams, and only on a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(Error::InvalidColorMode(s.into())),
        }
    }
}
