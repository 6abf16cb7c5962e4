use strum::{Display, EnumIter};

use crate::hw_trait::MAX_DUTY;

pub(super) const IDLE_TEMP_MAX_C: f32 = 52.0;
pub(super) const SILENT_TEMP_MAX_C: f32 = 60.0;
pub(super) const QUIET_TEMP_MAX_C: f32 = 64.0;
pub(super) const MODERATE_TEMP_MAX_C: f32 = 67.0;

/// Discrete fan speeds, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter)]
pub enum FanLevel {
    Idle,
    Silent,
    Quiet,
    Moderate,
    Turbo,
}

impl FanLevel {
    /// Level for an effective temperature. Each band is closed below and
    /// open above.
    pub fn from_temperature(temp: f32) -> Self {
        if temp < IDLE_TEMP_MAX_C {
            FanLevel::Idle
        } else if temp < SILENT_TEMP_MAX_C {
            FanLevel::Silent
        } else if temp < QUIET_TEMP_MAX_C {
            FanLevel::Quiet
        } else if temp < MODERATE_TEMP_MAX_C {
            FanLevel::Moderate
        } else {
            FanLevel::Turbo
        }
    }

    /// PWM duty in 1024ths.
    pub fn duty(self) -> u16 {
        match self {
            FanLevel::Idle => 0,
            FanLevel::Silent => MAX_DUTY / 4,
            FanLevel::Quiet => MAX_DUTY / 2,
            FanLevel::Moderate => MAX_DUTY / 4 * 3,
            FanLevel::Turbo => MAX_DUTY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub level: FanLevel,
    /// False when `level` is already what the fans were last set to.
    pub should_write: bool,
}

/// Pick the level for `effective_temp` and decide whether the fans need
/// rewriting, given the level applied on the previous sample.
pub fn select(effective_temp: f32, previous: Option<FanLevel>) -> Selection {
    let level = FanLevel::from_temperature(effective_temp);
    Selection {
        level,
        should_write: previous != Some(level),
    }
}
