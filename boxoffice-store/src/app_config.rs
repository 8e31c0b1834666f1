use boxoffice_core::{DEFAULT_LOCK_TIMEOUT, DEFAULT_SEAT_IDS, DEFAULT_SWEEP_INTERVAL};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub reservation: ReservationConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReservationConfig {
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl ReservationConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    #[serde(default = "default_seat_ids")]
    pub seat_ids: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { seat_ids: default_seat_ids() }
    }
}

fn default_port() -> u16 { 3000 }

fn default_lock_timeout_ms() -> u64 { DEFAULT_LOCK_TIMEOUT.as_millis() as u64 }

fn default_sweep_interval_ms() -> u64 { DEFAULT_SWEEP_INTERVAL.as_millis() as u64 }

fn default_seat_ids() -> Vec<String> {
    DEFAULT_SEAT_IDS.iter().map(|id| id.to_string()).collect()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every file is optional; the serde defaults cover a bare checkout
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `BOXOFFICE__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("BOXOFFICE").separator("__"))
            // Plain PORT wins, as most hosting platforms set it
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.reservation.lock_timeout_ms == 0 {
            return Err(config::ConfigError::Message("reservation.lock_timeout_ms must be greater than zero".into()));
        }
        if self.reservation.sweep_interval_ms == 0 {
            return Err(config::ConfigError::Message("reservation.sweep_interval_ms must be greater than zero".into()));
        }
        if self.inventory.seat_ids.is_empty() {
            return Err(config::ConfigError::Message("inventory.seat_ids must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for id in &self.inventory.seat_ids {
            if id.is_empty() {
                return Err(config::ConfigError::Message("inventory.seat_ids contains an empty id".into()));
            }
            if !seen.insert(id.as_str()) {
                return Err(config::ConfigError::Message(format!("inventory.seat_ids contains duplicate id {}", id)));
            }
        }

        Ok(())
    }
}
