use std::{str::FromStr, sync::LazyLock};

use derive_from_env::FromEnv;

use crate::{
    error::Error,
    level::{ColorMode, Severity},
    logger::diagnostic,
};

/// Defaults read from `SYNCLOG_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "SYNCLOG")]
#[allow(non_snake_case)]
pub struct SyncLogConfig {
    #[from_env(default = "info")]
    pub LEVEL: Severity,
    #[from_env(default = "auto")]
    pub COLOR: ColorMode,
}

impl Default for SyncLogConfig {
    fn default() -> Self {
        Self {
            LEVEL: Severity::Info,
            COLOR: ColorMode::Auto,
        }
    }
}

impl SyncLogConfig {
    /// Resolves each variable on its own, so one bad value does not discard the other.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            LEVEL: parse_or("SYNCLOG_LEVEL", &lookup, defaults.LEVEL),
            COLOR: parse_or("SYNCLOG_COLOR", &lookup, defaults.COLOR),
        }
    }
}

fn parse_or<T: FromStr<Err = Error>>(
    name: &str,
    lookup: impl Fn(&str) -> Option<String>,
    default: T,
) -> T {
    let Some(value) = lookup(name) else {
        return default;
    };
    value.parse().unwrap_or_else(|err| {
        diagnostic(format_args!("{name}: {err}, using the default"));
        default
    })
}

pub static SYNCLOG_CONFIG: LazyLock<SyncLogConfig> = LazyLock::new(|| {
    SyncLogConfig::from_env()
        .unwrap_or_else(|_| SyncLogConfig::from_lookup(|name| std::env::var(name).ok()))
});
