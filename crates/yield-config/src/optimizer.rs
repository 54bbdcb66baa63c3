//! Reallocation tuning.
//!
//! The defaults reproduce the reference reallocation exactly: a 70/30 blend
//! toward the proportional target and a 10% retention for lines without a
//! usable KPI signal.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_damping() -> f64 {
    0.7
}

const fn default_no_signal_retention() -> f64 {
    0.1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptimizerConfig {
    /// Weight of the proportional target in the spend blend; the rest stays on
    /// current spend.
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Fraction of spend kept by unlocked lines with no KPI signal.
    #[serde(default = "default_no_signal_retention")]
    pub no_signal_retention: f64,
}

impl OptimizerConfig {
    /// Both weights must lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("optimizer.damping", self.damping)?;
        check_unit_interval("optimizer.no_signal_retention", self.no_signal_retention)
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a value in [0, 1], got {value}"),
        })
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            no_signal_retention: default_no_signal_retention(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = OptimizerConfig::default();
        assert!((config.damping - 0.7).abs() < f64::EPSILON);
        assert!((config.no_signal_retention - 0.1).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_damping_rejected() {
        let config = OptimizerConfig {
            damping: 1.5,
            ..OptimizerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("optimizer.damping"));
    }

    #[test]
    fn nan_retention_rejected() {
        let config = OptimizerConfig {
            no_signal_retention: f64::NAN,
            ..OptimizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
