use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Address to bind the listener to
    pub bind_address: String,
    /// Path to the SQLite database holding the meal collection
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            database_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("eating-routine")
                .join("eating-routine.db"),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Apply `EATING_ROUTINE_*` overrides looked up through `var`
    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("EATING_ROUTINE_PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EATING_ROUTINE_PORT", port))?;
        }
        if let Some(bind_address) = var("EATING_ROUTINE_BIND_ADDRESS") {
            self.bind_address = bind_address;
        }
        if let Some(db_path) = var("EATING_ROUTINE_DATABASE_PATH") {
            self.database_path = PathBuf::from(db_path);
        }
        Ok(())
    }

    /// Default config file path: <config_dir>/eating-routine/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eating-routine")
            .join("config.yaml")
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                )
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
