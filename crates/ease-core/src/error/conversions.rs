//! From trait implementations for EaseError conversions

use super::types::EaseError;

impl From<std::io::Error> for EaseError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for EaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(error.to_string(), "JSON")
    }
}

impl From<serde_yaml::Error> for EaseError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::parse(error.to_string(), "YAML")
    }
}

impl From<toml::de::Error> for EaseError {
    fn from(error: toml::de::Error) -> Self {
        Self::parse(error.to_string(), "TOML")
    }
}
