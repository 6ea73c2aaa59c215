//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::ValidationError;

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

/// Read and deserialize a TOML file without semantic checks.
///
/// Validation runs later, once command-line overrides are applied
/// (`lifecycle::startup::resolve_config`).
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("item_server_{}_{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_valid_file() {
        let path = write_temp(
            "valid",
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"
            max_connections = 4
            "#,
        );

        let config = read_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.max_connections, 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("item_server_does_not_exist.toml");
        assert!(matches!(read_config(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let path = write_temp("malformed", "[listener\nbind_address = ");
        assert!(matches!(read_config(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
