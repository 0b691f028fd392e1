use std::{collections::HashMap, fmt::Debug};

use crate::error::{Result, WeatherError};

/// Credential for the OpenWeatherMap API.
pub const ENV_API_KEY: &str = "OWM_API_KEY";
/// Fallback unit code when a call does not name one.
pub const ENV_UNITS: &str = "OWM_UNITS";
/// Fallback language code when a call does not name one.
pub const ENV_LANG: &str = "OWM_LANG";

pub const DEFAULT_UNITS: &str = "c";
pub const DEFAULT_LANG: &str = "en";

/// Source of environment variables.
///
/// Production code reads the process environment; tests pass a `HashMap`.
pub trait Environment: Send + Sync + Debug {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Settings read from the environment at the start of every call.
///
/// Empty variables are treated the same as unset ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_units: Option<String>,
    pub default_lang: Option<String>,
}

impl Config {
    pub fn from_env(env: &dyn Environment) -> Self {
        Self {
            api_key: non_empty(env.var(ENV_API_KEY)),
            default_units: non_empty(env.var(ENV_UNITS)),
            default_lang: non_empty(env.var(ENV_LANG)),
        }
    }

    /// Returns the API key, or an error telling the operator how to set it.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)
    }

    /// Unit code used when the call leaves `units` out.
    pub fn units_or_default(&self) -> &str {
        self.default_units.as_deref().unwrap_or(DEFAULT_UNITS)
    }

    /// Language code used when the call leaves `lang` out.
    pub fn lang_or_default(&self) -> &str {
        self.default_lang.as_deref().unwrap_or(DEFAULT_LANG)
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) fn test_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
