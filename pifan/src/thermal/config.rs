use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

use super::history::PollMode;

const ARM_CEILING_VAR: &str = "PIFAN_ARM_CEILING_MHZ";
const CORE_CEILING_VAR: &str = "PIFAN_CORE_CEILING_MHZ";
const CLOCK_TOLERANCE_VAR: &str = "PIFAN_CLOCK_TOLERANCE_MHZ";

#[derive(Debug, Clone, PartialEq)]
pub struct ThermalConfig {
    /// Sleep between samples while temperature is steady.
    pub baseline_poll_interval: Duration,

    /// Sleep between samples while a temperature edge is in the window.
    pub fast_poll_interval: Duration,

    /// Look-back covered by the history, in either poll mode.
    pub history_window: Duration,

    /// Rise between consecutive samples that switches to fast polling (°C).
    pub edge_trigger_delta_c: f32,

    /// Highest ARM clock still considered unboosted (MHz). Tuned per board
    /// revision.
    pub arm_ceiling_mhz: u32,

    /// Highest GPU core clock still considered unboosted (MHz).
    pub core_ceiling_mhz: u32,

    /// Slack above either ceiling before a clock counts as boosted (MHz).
    pub clock_tolerance_mhz: u32,

    /// Settling time after boot before the first sample.
    pub startup_delay: Duration,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            baseline_poll_interval: Duration::from_secs(6),
            fast_poll_interval: Duration::from_secs(1),
            history_window: Duration::from_secs(60),
            edge_trigger_delta_c: 3.0,
            arm_ceiling_mhz: 700,
            core_ceiling_mhz: 250,
            clock_tolerance_mhz: 100,
            startup_delay: Duration::from_secs(5),
        }
    }
}

impl ThermalConfig {
    /// Defaults with the boost-detection overrides from the environment.
    ///
    /// Only the clock ceilings and tolerance can be overridden; fan
    /// thresholds and timing are fixed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        for (var, field) in [
            (ARM_CEILING_VAR, &mut config.arm_ceiling_mhz),
            (CORE_CEILING_VAR, &mut config.core_ceiling_mhz),
            (CLOCK_TOLERANCE_VAR, &mut config.clock_tolerance_mhz),
        ] {
            if let Some(value) = lookup(var) {
                *field = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::Config(format!("{var}={value:?} is not a MHz value")))?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, interval) in [
            ("baseline poll interval", self.baseline_poll_interval),
            ("fast poll interval", self.fast_poll_interval),
        ] {
            if interval.is_zero() {
                return Err(Error::Config(format!("{name} must be non-zero")));
            }
            if self.history_window.as_nanos() % interval.as_nanos() != 0 {
                return Err(Error::Config(format!(
                    "{name} {interval:?} does not divide the {:?} history window",
                    self.history_window
                )));
            }
        }

        if self.fast_poll_interval > self.baseline_poll_interval {
            return Err(Error::Config(
                "fast poll interval is longer than the baseline".into(),
            ));
        }

        // Debouncing compares against the previous sample, so keep at least two
        if self.capacity(PollMode::Baseline) < 2 {
            return Err(Error::Config(
                "history window must hold at least two baseline samples".into(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self, mode: PollMode) -> Duration {
        match mode {
            PollMode::Baseline => self.baseline_poll_interval,
            PollMode::Fast => self.fast_poll_interval,
        }
    }

    /// Samples needed to span the history window at `mode`'s interval.
    ///
    /// For fast mode this is `baseline capacity × baseline interval in
    /// seconds` whenever the fast interval is one second, as it is by
    /// default. A zero interval yields zero.
    pub fn capacity(&self, mode: PollMode) -> usize {
        self.history_window
            .as_nanos()
            .checked_div(self.poll_interval(mode).as_nanos())
            .unwrap_or(0) as usize
    }

    /// Loop iterations between throttle checks: one window's worth at the
    /// baseline interval, whatever the current poll mode.
    pub fn watchdog_cadence(&self) -> u32 {
        self.capacity(PollMode::Baseline) as u32
    }

    pub(super) fn arm_boost_limit_hz(&self) -> u64 {
        mhz_to_hz(self.arm_ceiling_mhz + self.clock_tolerance_mhz)
    }

    pub(super) fn core_boost_limit_hz(&self) -> u64 {
        mhz_to_hz(self.core_ceiling_mhz + self.clock_tolerance_mhz)
    }
}

fn mhz_to_hz(mhz: u32) -> u64 {
    u64::from(mhz) * 1_000_000
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;

    use super::*;

    fn lookup<'a>(vars: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn default_is_valid() {
        ThermalConfig::default().validate().unwrap();
    }

    #[test]
    fn both_modes_span_sixty_seconds() {
        let config = ThermalConfig::default();

        assert_eq!(config.capacity(PollMode::Baseline), 10);
        assert_eq!(config.capacity(PollMode::Fast), 60);
        for mode in [PollMode::Baseline, PollMode::Fast] {
            let span = config.poll_interval(mode) * config.capacity(mode) as u32;
            assert_eq!(span, Duration::from_secs(60));
        }
    }

    #[test]
    fn fast_capacity_scales_baseline_by_interval() {
        let config = ThermalConfig::default();
        let baseline_secs = config.baseline_poll_interval.as_secs() as usize;

        assert_eq!(
            config.capacity(PollMode::Fast),
            config.capacity(PollMode::Baseline) * baseline_secs
        );
    }

    #[test]
    fn watchdog_runs_once_per_baseline_window() {
        assert_eq!(ThermalConfig::default().watchdog_cadence(), 10);
    }

    #[test]
    fn boost_limits_add_tolerance_to_ceiling() {
        let config = ThermalConfig::default();
        assert_eq!(config.arm_boost_limit_hz(), 800_000_000);
        assert_eq!(config.core_boost_limit_hz(), 350_000_000);
    }

    #[test]
    fn lookup_overrides_boost_detection() {
        let vars = HashMap::from([(ARM_CEILING_VAR, "1500"), (CLOCK_TOLERANCE_VAR, " 50 ")]);

        let config = ThermalConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.arm_ceiling_mhz, 1500);
        assert_eq!(config.core_ceiling_mhz, 250);
        assert_eq!(config.clock_tolerance_mhz, 50);
    }

    #[test]
    fn lookup_rejects_non_numeric_override() {
        let vars = HashMap::from([(CORE_CEILING_VAR, "fast")]);

        let result = ThermalConfig::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn rejects_interval_that_does_not_divide_window() {
        let config = ThermalConfig {
            baseline_poll_interval: Duration::from_secs(7),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let config = ThermalConfig {
            fast_poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_sub_millisecond_interval_that_does_not_divide_window() {
        let config = ThermalConfig {
            fast_poll_interval: Duration::from_micros(700),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn accepts_sub_millisecond_interval_that_divides_window() {
        let config = ThermalConfig {
            fast_poll_interval: Duration::from_micros(500),
            ..Default::default()
        };

        config.validate().unwrap();
        assert_eq!(config.capacity(PollMode::Fast), 120_000);
    }

    #[test]
    fn zero_interval_has_zero_capacity() {
        let config = ThermalConfig {
            baseline_poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.capacity(PollMode::Baseline), 0);
    }

    #[test]
    fn rejects_single_sample_window() {
        let config = ThermalConfig {
            history_window: Duration::from_secs(6),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn from_env_reads_process_environment() {
        // SAFETY: serialized against every other test touching the environment
        unsafe { env::set_var(CORE_CEILING_VAR, "500") };
        let config = ThermalConfig::from_env();
        unsafe { env::remove_var(CORE_CEILING_VAR) };

        assert_eq!(config.unwrap().core_ceiling_mhz, 500);
    }
}
