use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub alpaca: AlpacaConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    /// Trade against the paper endpoint instead of the live one
    pub paper: bool,
    /// Override the trading API base URL (takes precedence over `paper`)
    pub trading_base_url: Option<String>,
    /// Override the market data API base URL
    pub data_base_url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            paper: true,
            trading_base_url: None,
            data_base_url: None,
            timeout_ms: 30_000,
        }
    }
}

impl AlpacaConfig {
    /// Effective trading API base URL
    pub fn trading_url(&self) -> String {
        match &self.trading_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if self.paper => "https://paper-api.alpaca.markets".to_string(),
            None => "https://api.alpaca.markets".to_string(),
        }
    }

    /// Effective market data API base URL
    pub fn data_url(&self) -> String {
        match &self.data_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => "https://data.alpaca.markets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Maximum accepted request line length in bytes
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: 1_000_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            alpaca: AlpacaConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir
                .join(project_name)
                .join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!(
                            "Failed to load config from {}: {}",
                            primary_config.display(),
                            e
                        );
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {}: {}",
                        fallback_config.display(),
                        e
                    );
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// API credentials read from the environment once at startup
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Read ALPACA_API_KEY and ALPACA_SECRET_KEY from the environment
    pub fn from_env() -> crate::error::Result<Self> {
        let api_key = std::env::var("ALPACA_API_KEY")
            .map_err(|_| crate::error::BrokrError::MissingCredentials("ALPACA_API_KEY".into()))?;
        let secret_key = std::env::var("ALPACA_SECRET_KEY").map_err(|_| {
            crate::error::BrokrError::MissingCredentials("ALPACA_SECRET_KEY".into())
        })?;
        Ok(Self {
            api_key,
            secret_key,
        })
    }

    /// Build credentials from explicit values (used by tests)
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

// Keep the secret out of debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
