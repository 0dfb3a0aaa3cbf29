// src/config/mod.rs

//! Layered configuration for the admin client
//!
//! Layers are merged in the order they were added, later layers winning:
//! - configuration files (YAML, JSON, TOML)
//! - in-memory JSON values (tests, CLI flags)
//! - the API base URL environment override
//!
//! Objects are merged key by key; any other value replaces what was there.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};
use crate::logging::LogLevel;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PANEL_ADMIN_API_URL";

/// Base URL used when neither configuration nor environment provide one.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Value> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
            Self::Toml => toml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Memory { data: Value },
    /// Single environment variable mapped onto `api.base_url`
    ApiUrlEnv { variable: String },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Pretty,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLogConfig {
    pub path: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./logs/panel-admin.log"),
        }
    }
}

/// Client-side presentation knobs used by the controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Stock strictly below this is flagged low
    pub low_stock_threshold: u32,
    /// Stock strictly below this (and not low) is flagged medium
    pub medium_stock_threshold: u32,
    pub currency: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            medium_stock_threshold: 50,
            currency: "EUR".to_string(),
        }
    }
}

/// Default configuration file location, if one exists on disk.
pub fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("panel-admin").join("config.toml");
    path.exists().then_some(path)
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    layers: Vec<ConfigLayer>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Loader with the optional file layer and the standard env override.
    pub fn with_config_file<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        let mut loader = Self::new();
        if let Some(path) = config_path {
            loader.add_file_layer("file", path)?;
        } else if let Some(path) = default_config_path() {
            loader.add_file_layer("default", path)?;
        }
        loader.add_api_url_env_layer("env", API_URL_ENV);
        Ok(loader)
    }

    pub fn add_file_layer<P: AsRef<Path>>(&mut self, name: impl Into<String>, path: P) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path)
            .ok_or_else(|| Error::config(format!("Unsupported configuration file format: {}", path.display())))?;

        self.layers.push(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
        });
        Ok(())
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value) {
        self.layers.push(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
        });
    }

    pub fn add_api_url_env_layer(&mut self, name: impl Into<String>, variable: impl Into<String>) {
        self.layers.push(ConfigLayer {
            name: name.into(),
            source: ConfigSource::ApiUrlEnv {
                variable: variable.into(),
            },
        });
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// Merges every layer over the defaults and deserializes the result.
    pub fn load(&self) -> Result<AppConfig> {
        let mut merged = serde_json::to_value(AppConfig::default())?;

        for layer in &self.layers {
            let value = self.load_layer(layer)?;
            tracing::debug!(layer = %layer.name, "merging configuration layer");
            merge_values(&mut merged, value);
        }

        serde_json::from_value(merged).map_err(|e| {
            Error::new(
                ErrorKind::Configuration {
                    key: None,
                    validation_errors: vec![e.to_string()],
                },
                format!("Failed to deserialize configuration: {}", e),
            )
        })
    }

    fn load_layer(&self, layer: &ConfigLayer) -> Result<Value> {
        match &layer.source {
            ConfigSource::File { path, format } => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path.display(), e)))?;
                format.parse(&content)
            }
            ConfigSource::Memory { data } => Ok(data.clone()),
            ConfigSource::ApiUrlEnv { variable } => Ok(match std::env::var(variable) {
                Ok(url) if !url.trim().is_empty() => serde_json::json!({ "api": { "base_url": url } }),
                _ => Value::Object(Map::new()),
            }),
        }
    }
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let url = self.api.base_url.trim();
        if url.is_empty() {
            errors.push(ValidationError {
                key: "api.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ValidationError {
                key: "api.base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", url),
            });
        }

        if self.dashboard.medium_stock_threshold <= self.dashboard.low_stock_threshold {
            errors.push(ValidationError {
                key: "dashboard.medium_stock_threshold".to_string(),
                message: "must be greater than dashboard.low_stock_threshold".to_string(),
            });
        }

        errors
    }
}
