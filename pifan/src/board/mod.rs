//! Board assembly: which sensor and which fan outputs the daemon drives.

pub mod raspberry_pi;

use std::env;
use std::path::PathBuf;

use crate::mgmt_protocol::sysfs_pwm::DEFAULT_PERIOD_NS;

const VCGENCMD_VAR: &str = "PIFAN_VCGENCMD";
const PWM_CHIP_VAR: &str = "PIFAN_PWM_CHIP";

/// Where the board's hardware interfaces live.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// `vcgencmd` executable, looked up on `PATH` unless absolute.
    pub vcgencmd: PathBuf,
    /// sysfs PWM chip carrying both fan channels.
    pub pwm_chip: PathBuf,
    pub pwm_period_ns: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            vcgencmd: PathBuf::from("vcgencmd"),
            pwm_chip: PathBuf::from("/sys/class/pwm/pwmchip0"),
            pwm_period_ns: DEFAULT_PERIOD_NS,
        }
    }
}

impl BoardConfig {
    /// Defaults, with `PIFAN_VCGENCMD` and `PIFAN_PWM_CHIP` honored if set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(VCGENCMD_VAR) {
            config.vcgencmd = path.into();
        }
        if let Some(path) = lookup(PWM_CHIP_VAR) {
            config.pwm_chip = path.into();
        }
        config
    }
}
