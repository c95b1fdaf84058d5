//! Configuration validation utilities.

use std::collections::HashSet;

use castkit_framework::BuiltinType;

use super::error::{ConfigError, ConfigResult};
use super::schema::{CastkitConfig, LogLevel, LogOutput, LoggingConfig, ResolverConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &CastkitConfig) -> ConfigResult<()> {
    validate_resolver_config(&config.resolver)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_resolver_config(resolver: &ResolverConfig) -> ConfigResult<()> {
    if resolver.malformed_request_prefix.trim().is_empty() {
        return Err(ConfigError::validation(
            "malformed_request_prefix cannot be empty",
        ));
    }

    let mut seen = HashSet::new();
    for name in &resolver.disabled_types {
        if name.parse::<BuiltinType>().is_err() {
            return Err(ConfigError::UnknownDisabledType(name.clone()));
        }
        if !seen.insert(name) {
            return Err(ConfigError::validation(format!(
                "Type '{name}' is listed twice in disabled_types"
            )));
        }
    }

    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    for (target, level) in &logging.filters {
        if target.is_empty() {
            return Err(ConfigError::validation("Log filter target cannot be empty"));
        }
        if level.parse::<LogLevel>().is_err() {
            return Err(ConfigError::InvalidLogLevel {
                target: target.clone(),
                level: level.clone(),
            });
        }
    }

    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "File output requires logging.file_path",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&CastkitConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_invalid_filter_level() {
        let mut config = CastkitConfig::default();
        config
            .logging
            .filters
            .insert("castkit_framework".to_string(), "loud".to_string());

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLogLevel { ref level, .. }) if level == "loud"
        ));
    }

    #[test]
    fn test_validate_disabled_types() {
        let mut config = CastkitConfig::default();
        config.resolver.disabled_types = vec!["invite".to_string(), "guildMessage".to_string()];
        assert!(validate_config(&config).is_ok());

        config.resolver.disabled_types.push("textchannel".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::UnknownDisabledType(name)) if name == "textchannel"
        ));

        config.resolver.disabled_types = vec!["invite".to_string(), "invite".to_string()];
        assert!(matches!(validate_config(&config), Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_validate_empty_prefix() {
        let mut config = CastkitConfig::default();
        config.resolver.malformed_request_prefix = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = CastkitConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some(PathBuf::from("logs/castkit.log"));
        assert!(validate_config(&config).is_ok());
    }
}
