use serde::{Deserialize, Serialize};
use vw_core::Real;
use vw_core::limits::{
    DEFAULT_TEMP_THRESHOLD, DEFAULT_VOLT_THRESHOLD, TEMP_THRESHOLD_RANGE, VOLT_THRESHOLD_RANGE,
};
use vw_core::numeric::ensure_in_range;

use crate::MonitorResult;

/// Limits beyond which a cell raises an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Degrees Celsius; a cell strictly above this is overheating.
    pub temp_threshold: Real,
    /// Volts; a cell strictly below this is low.
    pub volt_threshold: Real,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temp_threshold: DEFAULT_TEMP_THRESHOLD,
            volt_threshold: DEFAULT_VOLT_THRESHOLD,
        }
    }
}

impl AlertThresholds {
    /// Validated thresholds: temperature in `[0, 100]`, voltage in `[0, 5]`.
    pub fn new(temp_threshold: Real, volt_threshold: Real) -> MonitorResult<Self> {
        let thresholds = Self {
            temp_threshold,
            volt_threshold,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> MonitorResult<()> {
        ensure_in_range(
            self.temp_threshold,
            TEMP_THRESHOLD_RANGE.0,
            TEMP_THRESHOLD_RANGE.1,
            "temp_threshold",
        )?;
        ensure_in_range(
            self.volt_threshold,
            VOLT_THRESHOLD_RANGE.0,
            VOLT_THRESHOLD_RANGE.1,
            "volt_threshold",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonitorError;

    #[test]
    fn defaults_match_dashboard() {
        let t = AlertThresholds::default();
        assert_eq!(t.temp_threshold, 40.0);
        assert_eq!(t.volt_threshold, 3.5);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(
            AlertThresholds::new(120.0, 3.5),
            Err(MonitorError::Threshold(_))
        ));
        assert!(AlertThresholds::new(40.0, -0.1).is_err());
        assert!(AlertThresholds::new(f64::NAN, 3.0).is_err());
        assert!(AlertThresholds::new(0.0, 5.0).is_ok());
    }
}
