//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::NavConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<NavConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<NavConfig, ConfigError> {
    let config: NavConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MatchMode;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [listener]
        bind_address = "127.0.0.1:18080"

        [[menus]]
        name = "user-dashboard"
        match_mode = "prefix"
        fallback = "dash"

        [[menus.routes]]
        id = "dash"
        path = "/dashboard"
        label = "Overview"

        [[menus.routes]]
        id = "profile"
        path = "/dashboard/profile/"
        parent = "dash"
    "#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:18080");
        assert_eq!(config.timeouts.request_secs, 10);
        assert_eq!(config.menus.len(), 1);

        let menu = &config.menus[0];
        assert_eq!(menu.match_mode, MatchMode::Prefix);
        assert_eq!(menu.fallback.as_deref(), Some("dash"));
        assert_eq!(menu.routes[1].parent.as_deref(), Some("dash"));
        assert_eq!(menu.routes[0].label.as_deref(), Some("Overview"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_config("[[menus]\nname = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_route_without_path_fails_validation() {
        let err = parse_config(
            r#"
            [[menus]]
            name = "navbar"
            [[menus.routes]]
            id = "ghost"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].to_string().contains("path is missing"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
