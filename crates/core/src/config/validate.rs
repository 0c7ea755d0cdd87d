use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Transcoder path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.transcoder.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcoder.path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
