//! Tracing subscriber setup.

#![warn(missing_docs, clippy::pedantic)]

use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line output.
    #[default]
    Compact,
    /// Multi-line, human-oriented output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(anyhow!("unknown log format `{other}`")),
        }
    }
}

/// Builds the filter: `RUST_LOG` when set, otherwise `directive`.
///
/// # Errors
///
/// Returns an error when the chosen directive does not parse.
pub fn env_filter(directive: &str) -> anyhow::Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => EnvFilter::try_new(&from_env)
            .with_context(|| format!("invalid RUST_LOG directive `{from_env}`")),
        _ => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`")),
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error when the filter is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(directive: &str, format: LogFormat) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive)?)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .map_err(|err| anyhow!(err))
    .context("failed to install tracing subscriber")
}
