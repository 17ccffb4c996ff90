//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.export.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "export.timeout_ms must be > 0".into(),
            ));
        }
        if self.export.retry_attempts > 10 {
            return Err(ConfigError::ValidationError(
                "export.retry_attempts must be <= 10".into(),
            ));
        }
        if self.thumbnail.size == 0 && self.thumbnail.enabled {
            return Err(ConfigError::ValidationError(
                "thumbnail.size must be > 0".into(),
            ));
        }
        if self.thumbnail.quality == 0 || self.thumbnail.quality > 100 {
            return Err(ConfigError::ValidationError(
                "thumbnail.quality must be between 1 and 100".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.export.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_excessive_retries() {
        let mut config = Config::default();
        config.export.retry_attempts = 50;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry_attempts"));
    }

    #[test]
    fn test_validate_rejects_invalid_quality() {
        let mut config = Config::default();
        config.thumbnail.quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));

        config.thumbnail.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_zero_size_when_disabled() {
        let mut config = Config::default();
        config.thumbnail.size = 0;
        assert!(config.validate().is_err());

        config.thumbnail.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
