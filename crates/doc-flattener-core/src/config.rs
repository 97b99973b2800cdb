use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

use crate::{DEFAULT_MIN_FILE_SIZE, DEFAULT_OUTPUT_DIR};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_root_path")]
    pub root_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_min_file_size")]
    pub min_file_size: u64,
    /// Glob patterns; matching directories are neither scanned nor reported.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_root_path() -> String {
    ".".to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_min_file_size() -> u64 {
    DEFAULT_MIN_FILE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            output_dir: default_output_dir(),
            min_file_size: default_min_file_size(),
            ignore_patterns: Vec::new(),
        }
    }
}

/// Load `Config.*` from the working directory (optional), overlaid by
/// `DOC_FLATTENER_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(env_source())
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Load from an explicit file; the format is taken from its extension.
pub fn load_configuration_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::from(path).required(true))
        .add_source(env_source())
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

fn env_source() -> Environment {
    Environment::with_prefix("DOC_FLATTENER")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("ignore_patterns")
}
