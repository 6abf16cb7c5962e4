use super::config::ThermalConfig;
use super::sample::Sample;
use crate::error::{Error, Result};
use crate::hw_trait::{ClockDomain, ThermalSensor};

/// Range the SoC sensor can physically report.
const VALID_TEMPERATURE_C: std::ops::RangeInclusive<f32> = -40.0..=125.0;

/// Reads the sensors into a fresh [`Sample`].
#[derive(Debug, Clone)]
pub struct Sampler {
    arm_limit_hz: u64,
    core_limit_hz: u64,
    edge_delta_c: f32,
}

impl Sampler {
    pub fn new(config: &ThermalConfig) -> Self {
        Self {
            arm_limit_hz: config.arm_boost_limit_hz(),
            core_limit_hz: config.core_boost_limit_hz(),
            edge_delta_c: config.edge_trigger_delta_c,
        }
    }

    /// Either clock above its ceiling plus tolerance.
    pub fn is_boosted(&self, arm_hz: u64, core_hz: u64) -> bool {
        arm_hz > self.arm_limit_hz || core_hz > self.core_limit_hz
    }

    pub fn is_edge(&self, temperature_c: f32, previous: Option<&Sample>) -> bool {
        previous.is_some_and(|p| temperature_c - p.temperature_c >= self.edge_delta_c)
    }

    /// Take a sample. `previous` is the newest sample already in the
    /// history, if any.
    pub async fn sample<S: ThermalSensor + ?Sized>(
        &self,
        sensor: &mut S,
        previous: Option<&Sample>,
    ) -> Result<Sample> {
        let temperature_c = sensor.read_temperature().await?;
        if !VALID_TEMPERATURE_C.contains(&temperature_c) {
            return Err(Error::InvalidReading(format!(
                "temperature {temperature_c} °C"
            )));
        }

        let arm_hz = sensor.read_clock_frequency(ClockDomain::Arm).await?;
        let core_hz = sensor.read_clock_frequency(ClockDomain::Core).await?;

        Ok(Sample::new(
            temperature_c,
            self.is_boosted(arm_hz, core_hz),
            self.is_edge(temperature_c, previous),
        ))
    }
}
