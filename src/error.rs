/// Errors returned while setting a logger up.
///
/// Logging calls themselves never return errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to open log sink: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid severity: {0:?}")]
    InvalidSeverity(String),

    #[error("invalid color mode: {0:?} (expected auto, always or never)")]
    InvalidColorMode(String),

    #[error("a global logger is already installed")]
    SetLogger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
