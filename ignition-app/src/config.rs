use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// A value was present but could not be used.
    Invalid { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Server configuration loaded from YAML files, `.env`, and environment
/// variables.
///
/// Resolution order (lowest to highest priority):
/// 1. Built-in defaults (`0.0.0.0:8080`)
/// 2. `application.yaml` (base)
/// 3. `application-{profile}.yaml` (profile override)
/// 4. Environment variables (`SERVER_HOST`, `SERVER_PORT`)
///
/// Profile comes from the `APP_PROFILE` env var, default `"dev"`. Missing
/// files are fine; a malformed file or unparsable env value is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

impl AppConfig {
    /// Load configuration from the current working directory.
    pub fn load() -> Result<Self, ConfigError> {
        // .env never overwrites already-set environment variables.
        let _ = dotenvy::dotenv();
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "dev".into());
        Self::load_from(Path::new("."), &profile)
    }

    /// Load configuration from an explicit directory and profile.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        apply_yaml_file(&dir.join("application.yaml"), &mut config)?;
        apply_yaml_file(&dir.join(format!("application-{profile}.yaml")), &mut config)?;

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "server.port".into(),
                message: format!("'{port}' is not a valid port number"),
            })?;
        }

        Ok(config)
    }

    /// The address the server binds, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn apply_yaml_file(path: &Path, config: &mut AppConfig) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
    let file: FileConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Load(e.to_string()))?;
    if let Some(host) = file.server.host {
        config.host = host;
    }
    if let Some(port) = file.server.port {
        config.port = port;
    }
    Ok(())
}
