//! Season transition configuration

use serde::{Deserialize, Serialize};

use crate::error::LadderError;

/// Parameters for end-of-season processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Divisor applied to a division's player count to size the
    /// promotion/demotion cohort: a value of 10 moves 10% each way
    pub cohort_divisor: usize,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { cohort_divisor: 10 }
    }
}

impl SeasonConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.cohort_divisor == 0 {
            return Err(LadderError::ConfigurationError {
                message: "Cohort divisor must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
