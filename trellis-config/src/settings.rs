//! Typed engine settings.
//!
//! Settings come from a JSON or TOML file with `[logging]` and
//! `[connector]` tables, from a `.env` file, or from `TRELLIS_*`
//! environment variables. Missing fields take their defaults.

use crate::{ConfigError, ConfigLoader, EnvLoader, FileFormat, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use trellis_core::call::CallOptions;
use trellis_log::{Format, Level};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
    pub debug: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            debug: false,
        }
    }
}

impl LoggingSettings {
    pub fn level(&self) -> Result<Level> {
        Level::parse(&self.level).ok_or_else(|| ConfigError::invalid("logging.level", &self.level))
    }

    pub fn format(&self) -> Result<Format> {
        Format::parse(&self.format).ok_or_else(|| ConfigError::invalid("logging.format", &self.format))
    }
}

/// How connector requests become calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorSettings {
    pub extract_security: bool,
    pub default_scheme: String,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        let options = CallOptions::default();
        Self {
            extract_security: options.extract_security,
            default_scheme: options.default_scheme,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub logging: LoggingSettings,
    pub connector: ConnectorSettings,
}

impl EngineSettings {
    /// Load settings from a file, detecting its format from the name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let value = loader.load_file(path)?;
        debug!(path = %path.display(), format = ?loader.format(), "Loaded engine settings");

        match loader.format() {
            FileFormat::Env => {
                let vars = match value {
                    Value::Object(map) => map
                        .into_iter()
                        .filter_map(|(key, value)| value.as_str().map(|v| (key, v.to_string())))
                        .collect::<Vec<_>>(),
                    _ => Vec::new(),
                };
                Self::from_vars(&EnvLoader::trellis().filter(vars))
            }
            FileFormat::Json | FileFormat::Toml => Self::from_value(value),
        }
    }

    /// Settings from an already parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let settings: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `TRELLIS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&EnvLoader::trellis().load())
    }

    /// Settings from prefix-stripped, lowercased variables: `log_level`,
    /// `log_format`, `debug`, `extract_security`, `default_scheme`.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(level) = vars.get("log_level") {
            settings.logging.level = level.clone();
        }
        if let Some(format) = vars.get("log_format") {
            settings.logging.format = format.clone();
        }
        if let Some(debug) = vars.get("debug") {
            settings.logging.debug = parse_flag("debug", debug)?;
        }
        if let Some(extract) = vars.get("extract_security") {
            settings.connector.extract_security = parse_flag("extract_security", extract)?;
        }
        if let Some(scheme) = vars.get("default_scheme") {
            settings.connector.default_scheme = scheme.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.logging.level()?;
        self.logging.format()?;

        let scheme = &self.connector.default_scheme;
        let valid_scheme = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid_scheme {
            return Err(ConfigError::invalid("connector.default_scheme", scheme));
        }

        Ok(())
    }

    /// Push the level, format and debug flag into the global logger.
    pub fn apply_logging(&self) -> Result<()> {
        let level = self.logging.level()?;
        let format = self.logging.format()?;
        trellis_log::set_level(level);
        trellis_log::set_format(format);
        trellis_log::set_debug(self.logging.debug);
        Ok(())
    }

    pub fn call_options(&self) -> CallOptions {
        CallOptions::new()
            .extract_security(self.connector.extract_security)
            .default_scheme(self.connector.default_scheme.clone())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value)),
    }
}
