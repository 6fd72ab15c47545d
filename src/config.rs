use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub units_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub default_page_limit: i64,
    pub max_generated_questions: i64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "mcq-bank-local".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            units_collection: env::var("UNITS_COLLECTION").unwrap_or_else(|_| "units".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            default_page_limit: env::var("DEFAULT_PAGE_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(50),
            max_generated_questions: env::var("MAX_GENERATED_QUESTIONS")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(100),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.web_server_port == 0 {
            return Err(AppError::ValidationError(
                "WEB_SERVER_PORT cannot be 0".to_string(),
            ));
        }

        if self.default_page_limit < 1 {
            return Err(AppError::ValidationError(
                "DEFAULT_PAGE_LIMIT must be at least 1".to_string(),
            ));
        }

        if !(1..=100).contains(&self.max_generated_questions) {
            return Err(AppError::ValidationError(format!(
                "MAX_GENERATED_QUESTIONS must be between 1 and 100, got {}",
                self.max_generated_questions
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    /// Fixed local settings for test suites
    #[doc(hidden)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
            mongo_db_name: "mcq-bank-test".to_string(),
            questions_collection: "questions".to_string(),
            units_collection: "units".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3001,
            default_page_limit: 50,
            max_generated_questions: 100,
            cors_allowed_origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.expose_secret().is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.default_page_limit >= 1);
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "mcq-bank-test");
        assert_eq!(config.questions_collection, "questions");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_generation_cap_out_of_range() {
        let mut config = Config::test_config();
        config.max_generated_questions = 250;
        assert!(matches!(
            config.validate(),
            Err(AppError::ValidationError(_))
        ));

        config.max_generated_questions = 100;
        config.web_server_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_connection_string_is_redacted_in_debug_output() {
        let config = Config::test_config();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("mongodb://localhost:27017"));
    }
}
