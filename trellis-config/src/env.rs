// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Prefix of every variable Trellis reads.
pub const DEFAULT_PREFIX: &str = "TRELLIS";

/// Environment variable loader
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Loader for `TRELLIS_*` variables.
    pub fn trellis() -> Self {
        Self::new(Some(DEFAULT_PREFIX.to_string()))
    }

    /// Variables matching the prefix, keyed by the lowercased remainder.
    pub fn load(&self) -> HashMap<String, String> {
        self.filter(env::vars())
    }

    /// Apply the prefix filter to an arbitrary variable set.
    pub fn filter<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| match &self.prefix {
                Some(prefix) => key
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| (rest.to_lowercase(), value)),
                None => Some((key.to_lowercase(), value)),
            })
            .collect()
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Load a `.env` file into the process environment. Without a path the
    /// nearest `.env` is used if one exists.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::trellis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_filter_by_prefix() {
        let loader = EnvLoader::trellis();
        let loaded = loader.filter(vars(&[
            ("TRELLIS_LOG_LEVEL", "debug"),
            ("TRELLISX_OTHER", "ignored"),
            ("PATH", "/bin"),
        ]));

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["log_level"], "debug");
    }

    #[test]
    fn test_filter_without_prefix() {
        let loaded = EnvLoader::new(None).filter(vars(&[("HOME", "/root")]));
        assert_eq!(loaded["home"], "/root");
    }

    #[test]
    fn test_missing_var() {
        let loader = EnvLoader::new(Some("TRELLIS_TEST".to_string()));
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
        assert_eq!(loader.load_var_or("MISSING_VAR_67890", "fallback"), "fallback");
        assert_eq!(loader.full_key("log_level"), "TRELLIS_TEST_LOG_LEVEL");
    }

    #[test]
    fn test_missing_dotenv_file() {
        let loader = EnvLoader::trellis();
        assert!(loader.load_dotenv(Some(Path::new("/nonexistent/trellis.env"))).is_err());
    }
}
