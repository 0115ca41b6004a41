//! Configuration management
//!
//! Settings are layered: built-in defaults, then a configuration file
//! (TOML, YAML or JSON), then `EASE_*` environment variables. The merged
//! result is validated before use.

mod loader;
mod model;

pub use loader::{ConfigLoader, ConfigSource, DEFAULT_CONFIG_FILE, load_config, load_config_from_file};
pub use model::{EaseConfig, LoggingConfig, ReportConfig};
