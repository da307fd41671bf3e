//! Configuration management for the Chonker CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (`.chonker.yaml` or the path in `CHONKER_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Chunking settings read here are only defaults; the splitting crate
//! validates the final values before any text is processed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".chonker.yaml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Chunking defaults from the config file
    pub chunking: ChunkingDefaults,
}

/// Chunking defaults from config.yaml.
///
/// Every field is optional; a CLI flag always takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingDefaults {
    /// Output format name ("jsonl" or "alpaca")
    pub format: Option<String>,

    /// Minimum chunk size in characters (chars mode)
    pub min_size: Option<i64>,

    /// Minimum chunk size in estimated tokens (tokens mode)
    pub min_tokens: Option<i64>,

    /// Maximum estimated tokens of a removable leading title
    pub remove_title: Option<i64>,

    /// Lines starting with this literal are removed from chunks
    pub remove_line_prefix: Option<String>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    logging: Option<LoggingConfig>,
    chunking: Option<ChunkingDefaults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `CHONKER_CONFIG`: Path to config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// An explicitly named config file must exist; the implicit
    /// `.chonker.yaml` is only read when present.
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let explicit =
            config_file.or_else(|| std::env::var("CHONKER_CONFIG").ok().map(PathBuf::from));

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
                config.config_file = Some(path);
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config = config.merge_yaml(&path)?;
                    config.config_file = Some(path);
                }
            }
        }

        // Environment variables override YAML config
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merging config file {:?}", path);
        self.merge_yaml_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(chunking) = config_file.chunking {
            result.chunking = chunking;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the
    /// config file.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.log_level.is_none());
        assert!(!config.verbose);
        assert!(!config.no_color);
        assert_eq!(config.chunking, ChunkingDefaults::default());
    }

    #[test]
    fn test_with_overrides_verbose() {
        let config = AppConfig::default().with_overrides(None, true, false);
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_with_overrides_explicit_level_wins() {
        let config = AppConfig::default().with_overrides(Some("trace".to_string()), true, true);
        assert_eq!(config.log_level, Some("trace".to_string()));
        assert!(config.no_color);
    }

    #[test]
    fn test_merge_yaml_chunking() {
        let yaml = r#"
logging:
  level: warn
  color: false
chunking:
  format: alpaca
  minSize: 50
  removeTitle: 8
  removeLinePrefix: "["
"#;
        let config = AppConfig::default().merge_yaml_str(yaml).unwrap();
        assert_eq!(config.log_level, Some("warn".to_string()));
        assert!(config.no_color);
        assert_eq!(config.chunking.format.as_deref(), Some("alpaca"));
        assert_eq!(config.chunking.min_size, Some(50));
        assert_eq!(config.chunking.min_tokens, None);
        assert_eq!(config.chunking.remove_title, Some(8));
        assert_eq!(config.chunking.remove_line_prefix.as_deref(), Some("["));
    }

    #[test]
    fn test_merge_yaml_empty_file() {
        let config = AppConfig::default().merge_yaml_str("").unwrap();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let result = AppConfig::default().merge_yaml_str("chunking: [1, 2");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chunking:\n  minTokens: 12").unwrap();

        let config = AppConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.chunking.min_tokens, Some(12));
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = AppConfig::load(Some(PathBuf::from("/nonexistent/chonker.yaml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
