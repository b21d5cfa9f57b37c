//! Rating system configuration

use serde::{Deserialize, Serialize};

use crate::error::LadderError;
use crate::types::DEFAULT_RATING;

/// Tunable parameters of the rating engine.
///
/// The K-factor is the main operational lever: larger values make single
/// matches move ratings further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Elo K-factor applied to every rating update
    pub k_factor: f64,
    /// Rating assigned to new players and targeted by the soft reset
    pub default_rating: i32,
    /// Multiplier applied to inactive players' ratings on each decay sweep
    pub decay_factor: f64,
    /// Days of inactivity before a player is subject to decay
    pub inactivity_threshold_days: i64,
    /// Number of most recent matches considered for the form score
    pub performance_window: usize,
    /// Points credited per win inside the performance window
    pub performance_points_per_win: i32,
    /// Weighted-score blend: long-run rating component
    pub rating_weight: f64,
    /// Weighted-score blend: experience component
    pub experience_weight: f64,
    /// Weighted-score blend: recent-form component
    pub performance_weight: f64,
    /// Penalty added per previous meeting between two candidates
    pub rematch_penalty: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_rating: DEFAULT_RATING,
            decay_factor: 0.99,
            inactivity_threshold_days: 7,
            performance_window: 5,
            performance_points_per_win: 25,
            rating_weight: 0.6,
            experience_weight: 0.2,
            performance_weight: 0.2,
            rematch_penalty: 200.0,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.default_rating < 0 {
            return Err(LadderError::ConfigurationError {
                message: "Default rating cannot be negative".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.decay_factor) {
            return Err(LadderError::ConfigurationError {
                message: "Decay factor must be between 0 and 1".to_string(),
            }
            .into());
        }

        if self.inactivity_threshold_days < 0 {
            return Err(LadderError::ConfigurationError {
                message: "Inactivity threshold cannot be negative".to_string(),
            }
            .into());
        }

        if self.performance_window == 0 {
            return Err(LadderError::ConfigurationError {
                message: "Performance window must be at least 1".to_string(),
            }
            .into());
        }

        if self.rematch_penalty < 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "Rematch penalty cannot be negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RatingConfig::default();
        assert_eq!(config.k_factor, 32.0);
        assert_eq!(config.default_rating, 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RatingConfig::default();
        config.k_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.decay_factor = 1.5;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.performance_window = 0;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.rematch_penalty = -1.0;
        assert!(config.validate().is_err());
    }
}
