//! Server Configuration
//!
//! Layered settings: built-in defaults, then an optional config file, then
//! `PREDICTOR_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Config file looked up when `PREDICTOR_CONFIG` is not set (any supported extension)
pub const DEFAULT_CONFIG_FILE: &str = "prediction-server";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PREDICTOR";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// Task completion time artifact
    pub task_model_path: PathBuf,
    /// Speed artifact
    pub speed_model_path: PathBuf,
    pub log_format: LogFormat,
    /// Expose Prometheus metrics on `/metrics`
    pub metrics_enabled: bool,
    /// Attach a permissive CORS layer
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            task_model_path: PathBuf::from("Predict_Time.json"),
            speed_model_path: PathBuf::from("speed_predictor_model.json"),
            log_format: LogFormat::Text,
            metrics_enabled: true,
            cors_enabled: false,
        }
    }
}

impl ServerConfig {
    /// Load from the config file named by `PREDICTOR_CONFIG` (or the default
    /// file) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(format!("{}_CONFIG", ENV_PREFIX))
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(&file, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(file: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults_without_sources() {
        let config =
            ServerConfig::from_sources("no-such-prediction-server-config", env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.task_model_path, PathBuf::from("Predict_Time.json"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::from_sources(
            "no-such-prediction-server-config",
            env(&[
                ("PREDICTOR_BIND_ADDR", "127.0.0.1:9000"),
                ("PREDICTOR_LOG_FORMAT", "json"),
                ("PREDICTOR_METRICS_ENABLED", "false"),
            ]),
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.metrics_enabled);
        assert_eq!(config.speed_model_path, PathBuf::from("speed_predictor_model.json"));
    }

    #[test]
    fn test_file_then_environment() {
        let path = std::env::temp_dir().join(format!(
            "prediction-server-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "task_model_path = \"/models/task.json\"\ncors_enabled = true\nbind_addr = \"0.0.0.0:7000\"\n",
        )
        .unwrap();

        let config = ServerConfig::from_sources(
            path.to_str().unwrap(),
            env(&[("PREDICTOR_BIND_ADDR", "0.0.0.0:7100")]),
        )
        .unwrap();

        assert_eq!(config.task_model_path, PathBuf::from("/models/task.json"));
        assert!(config.cors_enabled);
        assert_eq!(config.bind_addr, "0.0.0.0:7100");
    }
}
