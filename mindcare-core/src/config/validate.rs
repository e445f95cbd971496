//! Configuration validation rules.

use super::schema::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.assistant.base_delay_ms > 30_000 {
        errors.push("assistant.base_delay_ms must be <= 30000".to_string());
    }
    if config.assistant.jitter_ms > 10_000 {
        errors.push("assistant.jitter_ms must be <= 10000".to_string());
    }
    if config.assistant.hotline.trim().is_empty() {
        errors.push("assistant.hotline must not be empty".to_string());
    }
    if let Some(welcome) = &config.assistant.welcome {
        if welcome.trim().is_empty() {
            errors.push("assistant.welcome must not be blank when set".to_string());
        }
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level must be one of {:?}, got '{}'",
            LOG_LEVELS, config.logging.level
        ));
    }
    if !LOG_FORMATS.contains(&config.logging.format.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.format must be one of {:?}, got '{}'",
            LOG_FORMATS, config.logging.format
        ));
    }
    if config.logging.dir.trim().is_empty() {
        errors.push("logging.dir must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
