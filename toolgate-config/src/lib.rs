//! Gateway configuration.
//!
//! [`GatewayConfig`] is read from a TOML document or from `TOOLGATE_*`
//! environment variables and turned into the raw toolset request handed to
//! the resolver.

#![warn(missing_docs, clippy::pedantic)]

use std::ffi::OsString;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the comma-separated toolset request.
pub const ENV_TOOLSETS: &str = "TOOLGATE_TOOLSETS";
/// Environment variable switching dynamic toolset discovery on.
pub const ENV_DYNAMIC_TOOLSETS: &str = "TOOLGATE_DYNAMIC_TOOLSETS";
/// Environment variable switching read-only mode on.
pub const ENV_READ_ONLY: &str = "TOOLGATE_READ_ONLY";
/// Environment variable holding the log filter directive.
pub const ENV_LOG: &str = "TOOLGATE_LOG";

const ENV_NAMES: [&str; 4] = [ENV_TOOLSETS, ENV_DYNAMIC_TOOLSETS, ENV_READ_ONLY, ENV_LOG];

const DEFAULT_LOG_FILTER: &str = "info";

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid configuration file: {source}")]
    Toml {
        /// Parser error.
        #[from]
        source: toml::de::Error,
    },

    /// A boolean variable held something other than a recognised flag.
    #[error("environment variable {name} must be a boolean, got `{value}`")]
    InvalidBool {
        /// Variable name.
        name: String,
        /// Offending value.
        value: String,
    },

    /// A gateway variable held bytes that are not valid UTF-8.
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode {
        /// Variable name.
        name: String,
    },
}

/// Startup configuration of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Requested toolset ids and keywords, as typed by the operator.
    pub toolsets: Vec<String>,
    /// Start with only the discovery tools and enable toolsets on request.
    pub dynamic_toolsets: bool,
    /// Refuse every tool that modifies remote state.
    pub read_only: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            toolsets: Vec::new(),
            dynamic_toolsets: false,
            read_only: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl GatewayConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown keys.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] when a flag variable is not a
    /// boolean and [`ConfigError::NotUnicode`] when a gateway variable is
    /// not UTF-8.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Like [`GatewayConfig::from_vars`] for raw OS pairs.
    ///
    /// Non-UTF-8 variables that the gateway does not read are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotUnicode`] when one of the `TOOLGATE_*`
    /// variables is not UTF-8, otherwise as [`GatewayConfig::from_vars`].
    pub fn from_os_vars<I>(vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut pairs = Vec::new();
        for (name, value) in vars {
            let Ok(name) = name.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => pairs.push((name, value)),
                Err(_) if ENV_NAMES.contains(&name.as_str()) => {
                    return Err(ConfigError::NotUnicode { name });
                }
                Err(_) => debug!(%name, "skipping non-unicode environment variable"),
            }
        }
        Self::from_vars(pairs)
    }

    /// Reads configuration from `(name, value)` pairs; unset variables keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] when a flag variable is not a
    /// boolean.
    pub fn from_vars<I>(vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        for (name, value) in vars {
            match name.as_str() {
                ENV_TOOLSETS => config.toolsets = parse_toolset_list(&value),
                ENV_DYNAMIC_TOOLSETS => config.dynamic_toolsets = parse_bool(&name, &value)?,
                ENV_READ_ONLY => config.read_only = parse_bool(&name, &value)?,
                ENV_LOG => config.log_filter = value,
                _ => {}
            }
        }
        debug!(?config, "configuration read from environment");
        Ok(config)
    }

    /// Raw toolset request for the resolver.
    ///
    /// An empty or blank request means `default`; dynamic discovery appends
    /// the `dynamic` toolset.
    #[must_use]
    pub fn toolset_request(&self) -> Vec<String> {
        let mut request = if self.toolsets.iter().all(|id| id.trim().is_empty()) {
            vec!["default".to_owned()]
        } else {
            self.toolsets.clone()
        };
        if self.dynamic_toolsets {
            request.push("dynamic".to_owned());
        }
        request
    }
}

/// Splits a comma-separated toolset list.
///
/// Entries are not trimmed; the resolver cleans them.
#[must_use]
pub fn parse_toolset_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_owned).collect()
}

fn parse_bool(name: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_owned(),
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_request_the_default_keyword() {
        let config = GatewayConfig::default();
        assert_eq!(config.toolset_request(), ["default"]);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn toml_document() {
        let config = GatewayConfig::from_toml_str(
            r#"
            toolsets = ["repos", "actions"]
            read_only = true
            "#,
        )
        .unwrap();

        assert_eq!(config.toolsets, ["repos", "actions"]);
        assert!(config.read_only);
        assert!(!config.dynamic_toolsets);
        assert_eq!(config.toolset_request(), ["repos", "actions"]);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = GatewayConfig::from_toml_str("toolset = []").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn environment_overrides() {
        let config = GatewayConfig::from_vars(vars(&[
            ("TOOLGATE_TOOLSETS", "default, gists"),
            ("TOOLGATE_DYNAMIC_TOOLSETS", "yes"),
            ("TOOLGATE_READ_ONLY", "0"),
            ("TOOLGATE_LOG", "toolgate=debug"),
            ("HOME", "/root"),
        ]))
        .unwrap();

        assert_eq!(config.toolsets, ["default", " gists"]);
        assert!(config.dynamic_toolsets);
        assert!(!config.read_only);
        assert_eq!(config.log_filter, "toolgate=debug");
        assert_eq!(config.toolset_request(), ["default", " gists", "dynamic"]);
    }

    #[test]
    fn invalid_boolean_is_reported() {
        let err = GatewayConfig::from_vars(vars(&[("TOOLGATE_READ_ONLY", "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "environment variable TOOLGATE_READ_ONLY must be a boolean, got `maybe`"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_environment() {
        use std::os::unix::ffi::OsStringExt;

        let latin1 = || OsString::from_vec(b"/opt/caf\xe9".to_vec());
        let config = GatewayConfig::from_os_vars([
            (OsString::from("LEGACY_PATH"), latin1()),
            (OsString::from_vec(b"caf\xe9".to_vec()), OsString::from("x")),
            (OsString::from(ENV_READ_ONLY), OsString::from("true")),
        ])
        .unwrap();
        assert!(config.read_only);

        let err = GatewayConfig::from_os_vars([(OsString::from(ENV_TOOLSETS), latin1())])
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotUnicode { ref name } if name == ENV_TOOLSETS));
    }

    #[test]
    fn blank_toolsets_mean_default() {
        let config = GatewayConfig::from_vars(vars(&[("TOOLGATE_TOOLSETS", " , ")])).unwrap();
        assert_eq!(config.toolset_request(), ["default"]);
        assert!(parse_toolset_list("").is_empty());
    }
}
