use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 7343;
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Fallback slot count when the platform driver cannot report one.
pub const DEFAULT_SIM_SLOTS: u8 = 2;

/// Top-level config (rotor.toml + ROTOR_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RotorConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Platform driver settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformConfig {
    /// Overrides the driver-reported slot count. Useful with the logging
    /// stub driver, which has no modem to ask.
    pub sim_slots: Option<u8>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.rotor/rotor.db", home)
}

impl RotorConfig {
    /// Load config from a TOML file with ROTOR_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.rotor/rotor.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: RotorConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("ROTOR_").split("_"))
            .extract()
            .map_err(|e| crate::error::RotorError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.rotor/rotor.toml", home)
}
