//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! rank-ladder service, including environment variable loading, TOML file
//! loading, and validation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::config::rating::RatingConfig;
use crate::config::season::SeasonConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub season: SeasonConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Periodic-sweep settings for the scheduler daemon.
///
/// The engine itself only exposes batch transforms; spacing the sweeps so
/// decay is applied at most once per elapsed week is this layer's contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Seconds between decay sweeps over the whole player population
    pub decay_interval_seconds: u64,
    /// Seconds between soft-reset sweeps; zero disables the sweep
    pub regression_interval_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rank-ladder".to_string(),
            log_level: "info".to_string(),
            shutdown_timeout_seconds: 30,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            decay_interval_seconds: 7 * 24 * 60 * 60,
            regression_interval_seconds: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Scheduler settings
        if let Ok(interval) = env::var("DECAY_INTERVAL_SECONDS") {
            config.scheduler.decay_interval_seconds = interval
                .parse()
                .map_err(|_| anyhow!("Invalid DECAY_INTERVAL_SECONDS value: {}", interval))?;
        }
        if let Ok(interval) = env::var("REGRESSION_INTERVAL_SECONDS") {
            config.scheduler.regression_interval_seconds = interval
                .parse()
                .map_err(|_| anyhow!("Invalid REGRESSION_INTERVAL_SECONDS value: {}", interval))?;
        }

        // Rating settings
        if let Ok(k) = env::var("RATING_K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k))?;
        }
        if let Ok(default_rating) = env::var("RATING_DEFAULT") {
            config.rating.default_rating = default_rating
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_DEFAULT value: {}", default_rating))?;
        }
        if let Ok(decay) = env::var("RATING_DECAY_FACTOR") {
            config.rating.decay_factor = decay
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_DECAY_FACTOR value: {}", decay))?;
        }

        // Season settings
        if let Ok(divisor) = env::var("SEASON_COHORT_DIVISOR") {
            config.season.cohort_divisor = divisor
                .parse()
                .map_err(|_| anyhow!("Invalid SEASON_COHORT_DIVISOR value: {}", divisor))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Get decay sweep interval as Duration
    pub fn decay_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.decay_interval_seconds)
    }

    /// Get regression sweep interval as Duration, if the sweep is enabled
    pub fn regression_interval(&self) -> Option<Duration> {
        if self.scheduler.regression_interval_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(
                self.scheduler.regression_interval_seconds,
            ))
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    if config.scheduler.decay_interval_seconds == 0 {
        return Err(anyhow!("Decay interval must be greater than 0"));
    }

    config.rating.validate()?;
    config.season.validate()?;

    Ok(())
}
