use crate::core::{FifaStatError, Result};
use crate::core::db::DEFAULT_DATABASE_PATH;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File the driver looks for in the working directory
pub const CONFIG_FILE_NAME: &str = "fifastat.toml";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub preview: PreviewConfig,
}

/// Which database file to open.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

/// How the report previews data.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Rows shown per preview
    pub rows: usize,
    /// Table whose head is printed after the export
    pub table: String,
    /// "grid", or any `Frame::export` format
    pub format: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            rows: 10,
            table: "Match".to_string(),
            format: "grid".to_string(),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = fifastat::config::load_config("fifastat.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Loads `path` if it exists, defaults otherwise
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(content).map_err(|e| FifaStatError::Config(e.to_string()))?;
    let format = config.preview.format.to_lowercase();
    if !matches!(format.as_str(), "grid" | "csv" | "json" | "markdown") {
        return Err(FifaStatError::Config(format!(
            "Unknown preview format '{}'",
            config.preview.format
        )));
    }
    Ok(config)
}
