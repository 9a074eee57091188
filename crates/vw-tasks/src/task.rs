//! Task definitions: one variant per step type, each carrying only its own fields.

use core::fmt;
use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vw_core::limits::clamp_task_duration;
use vw_core::{CoreError, Real, ensure_finite};

use crate::error::TaskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    #[serde(rename = "CC_CV")]
    CcCv,
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "CC_CD")]
    CcCd,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::CcCv, TaskKind::Idle, TaskKind::CcCd];

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::CcCv => "CC_CV",
            TaskKind::Idle => "IDLE",
            TaskKind::CcCd => "CC_CD",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskKind {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "CC_CV" => Ok(TaskKind::CcCv),
            "IDLE" => Ok(TaskKind::Idle),
            "CC_CD" => Ok(TaskKind::CcCd),
            other => Err(TaskError::UnknownKind(other.to_string())),
        }
    }
}

/// One scripted step.
///
/// `cc_cp` is the operator's constant-current / constant-power setpoint as
/// entered (for example `"5A"`). Durations are whole seconds in `[5, 60]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Constant current, then constant voltage charge.
    CcCv {
        cc_cp: String,
        cv_voltage: Real,
        current: Real,
        capacity: Real,
        duration_s: u32,
    },
    Idle {
        duration_s: u32,
    },
    /// Constant current discharge.
    CcCd {
        cc_cp: String,
        voltage: Real,
        capacity: Real,
        duration_s: u32,
    },
}

impl Task {
    pub fn cc_cv(
        cc_cp: impl Into<String>,
        cv_voltage: Real,
        current: Real,
        capacity: Real,
        duration_s: u32,
    ) -> Self {
        Task::CcCv {
            cc_cp: cc_cp.into(),
            cv_voltage,
            current,
            capacity,
            duration_s: clamp_task_duration(duration_s),
        }
    }

    pub fn idle(duration_s: u32) -> Self {
        Task::Idle {
            duration_s: clamp_task_duration(duration_s),
        }
    }

    pub fn cc_cd(cc_cp: impl Into<String>, voltage: Real, capacity: Real, duration_s: u32) -> Self {
        Task::CcCd {
            cc_cp: cc_cp.into(),
            voltage,
            capacity,
            duration_s: clamp_task_duration(duration_s),
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Task::CcCv { .. } => TaskKind::CcCv,
            Task::Idle { .. } => TaskKind::Idle,
            Task::CcCd { .. } => TaskKind::CcCd,
        }
    }

    /// Declared duration in seconds, always within `[5, 60]`.
    pub fn duration_s(&self) -> u32 {
        let raw = match self {
            Task::CcCv { duration_s, .. }
            | Task::Idle { duration_s }
            | Task::CcCd { duration_s, .. } => *duration_s,
        };
        clamp_task_duration(raw)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_s()))
    }

    /// Numeric fields must be finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Task::CcCv {
                cv_voltage,
                current,
                capacity,
                ..
            } => {
                ensure_finite(*cv_voltage, "cv_voltage")?;
                ensure_finite(*current, "current")?;
                ensure_finite(*capacity, "capacity")?;
            }
            Task::Idle { .. } => {}
            Task::CcCd {
                voltage, capacity, ..
            } => {
                ensure_finite(*voltage, "voltage")?;
                ensure_finite(*capacity, "capacity")?;
            }
        }
        Ok(())
    }
}
