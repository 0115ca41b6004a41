//! Configuration loading

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::model::EaseConfig;
use crate::error::{EaseError, EaseResult};

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ease.toml";

const ENV_KEYS: [&str; 9] = [
    "EASE_BASE_SCORE",
    "EASE_FREE_STEPS",
    "EASE_STEP_PENALTY",
    "EASE_MAX_COUNT_PENALTY",
    "EASE_OTHER_PENALTY",
    "EASE_AMBIGUOUS_PENALTY",
    "EASE_LOG_LEVEL",
    "EASE_LOG_FORMAT",
    "EASE_REPORT_FORMAT",
];

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Built-in defaults; resets everything loaded so far
    Default,
    /// A configuration file; replaces everything loaded so far, missing
    /// sections fall back to defaults. A missing file is skipped.
    File(PathBuf),
    /// `EASE_*` environment variables, applied as overrides
    Environment,
    /// Explicit overrides keyed like the environment variables
    Overrides(HashMap<String, String>),
}

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add explicit overrides
    pub fn with_overrides(self, overrides: HashMap<String, String>) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Load configuration from all sources, in order
    pub fn load(self) -> EaseResult<EaseConfig> {
        let mut config = EaseConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config = EaseConfig::default();
                }
                ConfigSource::File(path) => {
                    if let Some(file_config) = load_from_file(path)? {
                        tracing::debug!("Loaded config from file: {}", path.display());
                        config = file_config;
                    }
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config overrides from environment");
                    let vars: HashMap<String, String> = ENV_KEYS
                        .iter()
                        .filter_map(|key| env::var(key).ok().map(|v| (key.to_string(), v)))
                        .collect();
                    apply_overrides(&mut config, &vars)?;
                }
                ConfigSource::Overrides(vars) => {
                    tracing::debug!("Applying {} explicit config overrides", vars.len());
                    apply_overrides(&mut config, vars)?;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from a file, `None` if the file does not exist
fn load_from_file(path: &Path) -> EaseResult<Option<EaseConfig>> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, skipping", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        EaseError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let parsed = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map(Some).map_err(|e| {
        EaseError::config_with_context(
            format!("Failed to parse config file: {}", e),
            format!("Deserializing configuration from '{}'", path.display()),
        )
    })
}

fn apply_overrides(config: &mut EaseConfig, vars: &HashMap<String, String>) -> EaseResult<()> {
    for (key, value) in vars {
        match key.as_str() {
            "EASE_BASE_SCORE" => config.scoring.base_score = parse_value(key, value)?,
            "EASE_FREE_STEPS" => config.scoring.free_steps = parse_value(key, value)?,
            "EASE_STEP_PENALTY" => config.scoring.step_penalty = parse_value(key, value)?,
            "EASE_MAX_COUNT_PENALTY" => config.scoring.max_count_penalty = parse_value(key, value)?,
            "EASE_OTHER_PENALTY" => config.scoring.other_pattern_penalty = parse_value(key, value)?,
            "EASE_AMBIGUOUS_PENALTY" => config.scoring.ambiguous_penalty = parse_value(key, value)?,
            "EASE_LOG_LEVEL" => config.logging.level = value.clone(),
            "EASE_LOG_FORMAT" => config.logging.format = value.clone(),
            "EASE_REPORT_FORMAT" => config.report.format = value.clone(),
            other => {
                return Err(EaseError::config(format!("Unknown config override '{}'", other)));
            }
        }
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> EaseResult<T> {
    value.trim().parse().map_err(|_| {
        EaseError::config_with_context(
            format!("Invalid {} value", key),
            format!("Parsing '{}' for {}", value, key),
        )
    })
}

/// Load configuration from defaults, `ease.toml` if present, and the environment
pub fn load_config() -> EaseResult<EaseConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(DEFAULT_CONFIG_FILE)
        .with_env()
        .load()
}

/// Load configuration with a custom file path
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> EaseResult<EaseConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(path)
        .with_env()
        .load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ConfigLoader::new()
            .with_defaults()
            .with_file("/definitely/not/here/ease.toml")
            .load()
            .unwrap();
        assert_eq!(config, EaseConfig::default());
    }

    #[test]
    fn test_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ease.toml");
        fs::write(
            &path,
            "[scoring]\nambiguous_penalty = 2.0\n\n[report]\nformat = \"markdown\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new().with_defaults().with_file(&path).load().unwrap();
        assert_eq!(config.scoring.ambiguous_penalty, 2.0);
        assert_eq!(config.scoring.step_penalty, 1.0);
        assert_eq!(config.report.format, "markdown");
    }

    #[test]
    fn test_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("ease.yaml");
        fs::write(&yaml, "scoring:\n  free_steps: 4\n").unwrap();
        let json = dir.path().join("ease.json");
        fs::write(&json, r#"{"logging": {"level": "debug"}}"#).unwrap();

        let config = ConfigLoader::new().with_file(&yaml).load().unwrap();
        assert_eq!(config.scoring.free_steps, 4);

        let config = ConfigLoader::new().with_file(&json).load().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.scoring.free_steps, 3);
    }

    #[test]
    fn test_overrides_apply_after_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ease.toml");
        fs::write(&path, "[scoring]\nother_pattern_penalty = 1.0\n").unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(overrides(&[
                ("EASE_OTHER_PENALTY", "0.75"),
                ("EASE_LOG_LEVEL", "info"),
            ]))
            .load()
            .unwrap();
        assert_eq!(config.scoring.other_pattern_penalty, 0.75);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_override_value() {
        let err = ConfigLoader::new()
            .with_overrides(overrides(&[("EASE_FREE_STEPS", "three")]))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("EASE_FREE_STEPS"));
    }

    #[test]
    fn test_merged_config_is_validated() {
        let err = ConfigLoader::new()
            .with_overrides(overrides(&[("EASE_AMBIGUOUS_PENALTY", "-3")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, EaseError::Config { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ease.toml");
        fs::write(&path, "[scoring\n").unwrap();
        let err = ConfigLoader::new().with_file(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
