use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from the config file with env-var overrides applied by the
/// binary. Priority: CLI > Env > File > Defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults if
    /// no file exists yet.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents).map_err(|e| {
                crate::Error::ConfigError(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Config file path: XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("placescout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    pub yelp: YelpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YelpConfig {
    /// Yelp Fusion API key
    /// Get one at https://www.yelp.com/developers/v3/manage_app
    pub api_key: Option<String>,

    /// API URL (for proxies and tests)
    #[serde(default = "default_yelp_url")]
    pub api_url: String,
}

fn default_yelp_url() -> String {
    "https://api.yelp.com/v3".to_string()
}

impl Default for YelpConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_yelp_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search radius in meters (the provider caps this at 40000)
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,

    /// Max results per search
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_radius_m() -> u32 {
    10_000
}

fn default_limit() -> u32 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Path to the SQLite cache database. Defaults to the platform data
    /// directory when unset.
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the database path, creating the parent directory if needed.
    pub fn resolve_db_path(&self) -> crate::Result<PathBuf> {
        let path = match &self.db_path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| {
                    crate::Error::ConfigError("Could not find data directory".into())
                })?
                .join("placescout")
                .join("cache.db"),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}
