//! Configuration validation logic.

use std::collections::HashSet;

use crate::config::AppConfig;
use crate::loader::ConfigError;

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.sources.is_empty() {
        return Err(ConfigError::Validation("sources is empty".into()));
    }
    let mut names = HashSet::new();
    for (idx, source) in config.sources.iter().enumerate() {
        if source.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "sources[{idx}].url is empty"
            )));
        }
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "sources[{idx}].name is empty"
            )));
        }
        if !names.insert(source.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: {}",
                source.name
            )));
        }
    }
    if config.concurrency == 0 {
        return Err(ConfigError::Validation("concurrency must be > 0".into()));
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation("timeout_secs must be > 0".into()));
    }
    if config.output.as_os_str().is_empty() {
        return Err(ConfigError::Validation("output path is empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlist_rules::Source;

    fn valid() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&valid()).unwrap();
    }

    #[test]
    fn empty_sources_rejected() {
        let mut config = valid();
        config.sources.clear();
        validate_config(&config).unwrap_err();
    }

    #[test]
    fn duplicate_source_name_rejected() {
        let mut config = valid();
        config.sources = vec![
            Source {
                url: "https://example.com/a.list".into(),
                name: "same".into(),
            },
            Source {
                url: "https://example.com/b.list".into(),
                name: "same".into(),
            },
        ];
        validate_config(&config).unwrap_err();
    }

    #[test]
    fn zero_concurrency_rejected() {
        let mut config = valid();
        config.concurrency = 0;
        validate_config(&config).unwrap_err();
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = valid();
        config.timeout_secs = 0;
        validate_config(&config).unwrap_err();
    }
}
