//! Cell chemistry, operating mode and per-tick readings.

use core::fmt;
use core::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::limits::CAPACITY_RANGE;
use crate::numeric::{Real, ensure_finite, ensure_in_range};

/// Fixed voltage window of a cell chemistry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoltageBounds {
    pub min: Real,
    pub max: Real,
}

impl VoltageBounds {
    /// Estimated state of charge in percent, clamped to `[0, 100]`.
    pub fn charge_percent(&self, voltage: Real) -> Real {
        let span = self.max - self.min;
        ((voltage - self.min) / span * 100.0).clamp(0.0, 100.0)
    }

    pub fn contains(&self, voltage: Real) -> bool {
        voltage >= self.min && voltage <= self.max
    }
}

/// Supported cell chemistries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellChemistry {
    /// Lithium iron phosphate.
    Lfp,
    /// Nickel manganese cobalt.
    Nmc,
}

impl CellChemistry {
    pub const ALL: [CellChemistry; 2] = [CellChemistry::Lfp, CellChemistry::Nmc];

    pub fn voltage_bounds(self) -> VoltageBounds {
        match self {
            CellChemistry::Lfp => VoltageBounds { min: 2.8, max: 3.6 },
            CellChemistry::Nmc => VoltageBounds { min: 3.2, max: 4.0 },
        }
    }

    /// Resting voltage reported by the synthetic data source.
    pub fn nominal_voltage(self) -> Real {
        match self {
            CellChemistry::Lfp => 3.2,
            CellChemistry::Nmc => 3.6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellChemistry::Lfp => "lfp",
            CellChemistry::Nmc => "nmc",
        }
    }
}

impl fmt::Display for CellChemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CellChemistry {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lfp" => Ok(CellChemistry::Lfp),
            "nmc" => Ok(CellChemistry::Nmc),
            _ => Err(CoreError::InvalidArg {
                what: "chemistry must be lfp or nmc",
            }),
        }
    }
}

/// Operating mode of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellMode {
    Charging,
    Discharging,
    #[default]
    Idle,
}

impl CellMode {
    pub const ALL: [CellMode; 3] = [CellMode::Charging, CellMode::Discharging, CellMode::Idle];

    pub fn label(self) -> &'static str {
        match self {
            CellMode::Charging => "Charging",
            CellMode::Discharging => "Discharging",
            CellMode::Idle => "Idle",
        }
    }
}

impl fmt::Display for CellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CellMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "charging" => Ok(CellMode::Charging),
            "discharging" => Ok(CellMode::Discharging),
            "idle" => Ok(CellMode::Idle),
            _ => Err(CoreError::InvalidArg {
                what: "mode must be Charging, Discharging or Idle",
            }),
        }
    }
}

/// One cell's values at one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellReading {
    /// Volts.
    pub voltage: Real,
    /// Amperes.
    pub current: Real,
    /// Degrees Celsius.
    pub temperature: Real,
    /// Percent.
    pub capacity: Real,
    pub mode: CellMode,
}

impl Default for CellReading {
    fn default() -> Self {
        Self {
            voltage: 3.7,
            current: 0.0,
            temperature: 25.0,
            capacity: 100.0,
            mode: CellMode::Idle,
        }
    }
}

impl CellReading {
    pub fn new(voltage: Real, current: Real, temperature: Real, capacity: Real, mode: CellMode) -> Self {
        Self {
            voltage,
            current,
            temperature,
            capacity,
            mode,
        }
    }

    /// Reject readings that would poison averages or charts.
    pub fn validate(&self) -> CoreResult<()> {
        ensure_finite(self.voltage, "voltage")?;
        ensure_finite(self.current, "current")?;
        ensure_finite(self.temperature, "temperature")?;
        ensure_in_range(self.capacity, CAPACITY_RANGE.0, CAPACITY_RANGE.1, "capacity")?;
        Ok(())
    }
}
