use std::env;
use thiserror::Error;

pub const DEFAULT_API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_APP_NAME: &str = "MenuSuggest";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

const MODEL_VAR: &str = "MENU_SUGGEST_MODEL";
const TEMPERATURE_VAR: &str = "MENU_SUGGEST_TEMPERATURE";
const MAX_TOKENS_VAR: &str = "MENU_SUGGEST_MAX_TOKENS";
const STRICT_RESPONSE_VAR: &str = "MENU_SUGGEST_STRICT_RESPONSE";
const API_KEY_ENV_VAR_VAR: &str = "MENU_SUGGEST_API_KEY_ENV";
const SITE_URL_VAR: &str = "SITE_URL";
const APP_NAME_VAR: &str = "APP_NAME";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}

/// Settings for talking to the model. The API key itself is never stored
/// here, only the name of the environment variable holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestConfig {
    pub api_key_env_var: String,
    pub model: String,
    pub site_url: String,
    pub app_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub strict_response: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            api_key_env_var: DEFAULT_API_KEY_ENV_VAR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            strict_response: false,
        }
    }
}

impl SuggestConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SuggestConfig::default();

        if let Some(value) = lookup(API_KEY_ENV_VAR_VAR) {
            config.api_key_env_var = value;
        }
        if let Some(value) = lookup(MODEL_VAR) {
            config.model = value;
        }
        if let Some(value) = lookup(SITE_URL_VAR) {
            config.site_url = value;
        }
        if let Some(value) = lookup(APP_NAME_VAR) {
            config.app_name = value;
        }
        if let Some(value) = lookup(TEMPERATURE_VAR) {
            config.temperature = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: TEMPERATURE_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(MAX_TOKENS_VAR) {
            config.max_tokens = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: MAX_TOKENS_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(STRICT_RESPONSE_VAR) {
            config.strict_response = parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                key: STRICT_RESPONSE_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = SuggestConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SuggestConfig::default());
        assert_eq!(config.api_key_env_var, "OPENROUTER_API_KEY");
        assert_eq!(config.model, "qwen/qwen3-32b");
        assert!(!config.strict_response);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = SuggestConfig::from_lookup(lookup_from(&[
            ("MENU_SUGGEST_MODEL", "meta-llama/llama-3.3-70b-instruct"),
            ("MENU_SUGGEST_TEMPERATURE", "0.2"),
            ("MENU_SUGGEST_MAX_TOKENS", " 1024 "),
            ("MENU_SUGGEST_STRICT_RESPONSE", "yes"),
            ("MENU_SUGGEST_API_KEY_ENV", "MY_KEY"),
            ("APP_NAME", "Kitchen"),
        ]))
        .unwrap();
        assert_eq!(config.model, "meta-llama/llama-3.3-70b-instruct");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 1024);
        assert!(config.strict_response);
        assert_eq!(config.api_key_env_var, "MY_KEY");
        assert_eq!(config.app_name, "Kitchen");
        assert_eq!(config.site_url, "http://localhost:3000");
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        let err = SuggestConfig::from_lookup(lookup_from(&[("MENU_SUGGEST_MAX_TOKENS", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "MENU_SUGGEST_MAX_TOKENS",
                value: "lots".to_string()
            }
        );

        let err =
            SuggestConfig::from_lookup(lookup_from(&[("MENU_SUGGEST_STRICT_RESPONSE", "maybe")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { .. }));
    }
}
