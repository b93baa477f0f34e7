use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name searched for when locating a configuration.
pub const CONFIG_FILE_NAME: &str = "pylite.toml";

pub const DEFAULT_MAX_DEPTH: usize = 200;
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// The parsed `pylite.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub limits: Limits,
    /// File the configuration was read from; `None` for defaults or
    /// in-memory configurations.
    pub source: Option<PathBuf>,
}

/// Resource ceilings applied to a single analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    /// Maximum recursion depth of the parser and the semantic walk.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Largest source text the CLI accepts, in bytes.
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_max_source_bytes() -> usize {
    DEFAULT_MAX_SOURCE_BYTES
}

/// Raw TOML structure for deserialization.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    limits: Limits,
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no pylite.toml found (searched from {0})")]
    NotFound(String),
    #[error("failed to read pylite.toml: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid pylite.toml: {0}")]
    ParseError(String),
    #[error("invalid pylite.toml: [limits] {0} must be at least 1")]
    ZeroLimit(&'static str),
}

/// Walk up from `start_dir` looking for `pylite.toml`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load and validate a configuration from a file path.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Parse and validate a configuration from a string.
pub fn parse_config(content: &str) -> Result<AnalyzerConfig, ConfigError> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_limits(&raw.limits)?;

    Ok(AnalyzerConfig {
        limits: raw.limits,
        source: None,
    })
}

/// Find and load the configuration starting from a source file's directory.
pub fn find_and_load_config(source_file: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let start_dir = source_file.parent().unwrap_or_else(|| Path::new("."));
    let config_path = find_config(start_dir)
        .ok_or_else(|| ConfigError::NotFound(start_dir.display().to_string()))?;
    load_config(&config_path)
}

fn validate_limits(limits: &Limits) -> Result<(), ConfigError> {
    if limits.max_depth == 0 {
        return Err(ConfigError::ZeroLimit("max_depth"));
    }
    if limits.max_source_bytes == 0 {
        return Err(ConfigError::ZeroLimit("max_source_bytes"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.source, None);
    }

    #[test]
    fn parse_limits() {
        let toml = r#"
[limits]
max_depth = 64
max_source_bytes = 4096
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.limits.max_depth, 64);
        assert_eq!(config.limits.max_source_bytes, 4096);
    }

    #[test]
    fn partial_limits_fill_defaults() {
        let config = parse_config("[limits]\nmax_depth = 10\n").unwrap();
        assert_eq!(config.limits.max_depth, 10);
        assert_eq!(config.limits.max_source_bytes, DEFAULT_MAX_SOURCE_BYTES);
    }

    #[test]
    fn zero_depth_rejected() {
        let err = parse_config("[limits]\nmax_depth = 0\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("max_depth"), "got: {}", err);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = parse_config("[limits]\nmax_width = 3\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid pylite.toml"), "got: {}", err);
    }

    #[test]
    fn malformed_toml_rejected() {
        let result = parse_config("[limits\nmax_depth = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn find_config_walks_up() {
        let tmp = std::env::temp_dir().join(format!("pylite_test_config_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(tmp.join("src/nested")).unwrap();
        std::fs::write(tmp.join(CONFIG_FILE_NAME), "[limits]\nmax_depth = 12\n").unwrap();

        let found = find_config(&tmp.join("src/nested"));
        assert_eq!(found, Some(tmp.join(CONFIG_FILE_NAME)));

        let config = find_and_load_config(&tmp.join("src/nested/main.py")).unwrap();
        assert_eq!(config.limits.max_depth, 12);
        assert_eq!(config.source, Some(tmp.join(CONFIG_FILE_NAME)));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
