//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::MirrorConfig;
use std::path::Path;

/// Name of the configuration file within a project directory.
pub const CONFIG_FILE: &str = "fsmirror.toml";

/// Loads and validates an `fsmirror.toml` configuration from a directory.
///
/// Reads `<dir>/fsmirror.toml`, parses it, and validates required fields.
pub fn load_config(dir: &Path) -> Result<MirrorConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `fsmirror.toml` configuration from a string.
///
/// Relative or empty roots are rejected while parsing.
pub fn load_config_from_str(content: &str) -> Result<MirrorConfig, ConfigError> {
    let config: MirrorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that every declared store names at least one root.
fn validate_config(config: &MirrorConfig) -> Result<(), ConfigError> {
    for (name, store) in &config.stores {
        if store.roots.is_empty() {
            return Err(ConfigError::MissingField(format!("stores.{name}.roots")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert!(config.stores.is_empty());
    }

    #[test]
    fn parse_single_store() {
        let toml = r#"
[stores.jars]
roots = ["/home/.cache/jars"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.stores.len(), 1);
        assert_eq!(config.stores["jars"].roots[0].as_str(), "/home/.cache/jars");
    }

    #[test]
    fn parse_multiple_stores() {
        let toml = r#"
[stores.jars]
roots = ["/home/.cache/jars"]

[stores.transforms]
roots = ["/home/.cache/transforms-1", "/opt/cache/transforms"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.stores.len(), 2);
        assert_eq!(config.all_roots().len(), 3);
    }

    #[test]
    fn store_without_roots_is_rejected() {
        let toml = r#"
[stores.jars]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "stores.jars.roots"));
    }

    #[test]
    fn store_with_empty_root_list_is_rejected() {
        let toml = r#"
[stores.jars]
roots = []
"#;
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn relative_root_is_rejected() {
        let toml = r#"
[stores.jars]
roots = ["cache/jars"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("not absolute")));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = load_config_from_str("[stores.jars\nroots = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[stores.jars]\nroots = [\"/cache/jars\"]\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.all_roots().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
