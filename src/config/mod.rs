//! Configuration management for the ladder engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the service.

pub mod app;
pub mod rating;
pub mod season;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, SchedulerSettings, ServiceSettings};
pub use rating::RatingConfig;
pub use season::SeasonConfig;
