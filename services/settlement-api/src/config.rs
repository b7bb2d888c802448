use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub settlement: settlement::Config,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub json_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = settlement::Config::default();

        let mut builder = config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("server.workers", 4)?
            .set_default("server.json_limit_bytes", 1024 * 1024)?
            // Settlement defaults
            .set_default("settlement.decimal_places", defaults.decimal_places as i64)?
            .set_default("settlement.max_members", defaults.max_members as i64)?
            .set_default("settlement.imbalance_policy", "report")?;

        if let Ok(config_file) = env::var("CONFIG_FILE") {
            builder = builder.add_source(File::with_name(&config_file).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("SETTLEMENT_API").separator("__"));

        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }

        if self.server.workers == 0 {
            return Err("At least one worker is required".to_string());
        }

        if self.server.json_limit_bytes == 0 {
            return Err("JSON body limit must be greater than 0".to_string());
        }

        self.settlement.validate().map_err(|e| e.to_string())
    }
}
