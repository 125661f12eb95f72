//! Logging configuration read from the environment.

use core::str::FromStr;

use thiserror::Error;

const FILTER_VAR: &str = "RUST_LOG";
const FORMAT_VAR: &str = "LOG_FORMAT";

/// Output format of log lines.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format: {0} (expected `json` or `pretty`)")]
pub struct ParseLogFormatError(String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ParseLogFormatError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `info,stockledger_inventory=debug`.
    pub filter: String,
    pub format: LogFormat,
    /// Problems found while reading the config, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
            warnings: Vec::new(),
        }
    }
}

impl TracingConfig {
    /// Read `RUST_LOG` and `LOG_FORMAT`; unset variables keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TracingConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }

        if let Some(raw) = lookup(FORMAT_VAR) {
            match raw.parse::<LogFormat>() {
                Ok(format) => config.format = format,
                Err(e) => config
                    .warnings
                    .push(format!("{e}; falling back to json")),
            }
        }

        config
    }
}
