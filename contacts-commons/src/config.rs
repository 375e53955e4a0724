use failure::Fail;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &'static str = "http://localhost:8000";
pub const DEFAULT_TOKEN_KEY: &'static str = "accessToken";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub token_key: String,
    pub contacts_container: String,
    pub birthdays_container: String,
    pub form_id: String,
    pub search_form_id: String,
    pub reset_form_on_create: bool,
    pub loglevel: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            contacts_container: "contacts".to_string(),
            birthdays_container: "next_birthdays".to_string(),
            form_id: "contactCreate".to_string(),
            search_form_id: "contactSearch".to_string(),
            reset_form_on_create: false,
            loglevel: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Maps the configured level onto a `log` filter, falling back to `Info`.
    pub fn log_level(&self) -> log::Level {
        self.loglevel.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Debug, Fail)]
pub enum ConfigurationError {
    #[fail(display = "Invalid format: {}", message)]
    FormatError {
        message: String,
        #[fail(cause)]
        cause: serde_json::Error,
    },
}

/// Parses a JSON configuration. Missing keys keep their defaults, an empty
/// document yields the default configuration.
pub fn load_config_from_json(serialised_config: &str) -> Result<ClientConfig, ConfigurationError> {
    if serialised_config.trim().is_empty() {
        return Ok(ClientConfig::default());
    }

    serde_json::from_str(serialised_config).map_err(|e| ConfigurationError::FormatError {
        message: "Configuration".to_string(),
        cause: e,
    })
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = load_config_from_json("  ").unwrap();
        assert_eq!(ClientConfig::default(), config);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config =
            load_config_from_json(r#"{"api_base": "https://contacts.example", "loglevel": "debug"}"#)
                .unwrap();

        assert_eq!("https://contacts.example", config.api_base);
        assert_eq!(log::Level::Debug, config.log_level());
        assert_eq!("accessToken", config.token_key);
        assert_eq!("contacts", config.contacts_container);
        assert_eq!("next_birthdays", config.birthdays_container);
        assert_eq!("contactCreate", config.form_id);
        assert!(!config.reset_form_on_create);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = load_config_from_json("{ api_base: ");
        assert!(matches!(result, Err(ConfigurationError::FormatError { .. })));
    }

    #[test]
    fn unknown_loglevel_falls_back_to_info() {
        let config = ClientConfig { loglevel: "chatty".to_string(), ..ClientConfig::default() };
        assert_eq!(log::Level::Info, config.log_level());
    }
}
