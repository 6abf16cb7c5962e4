use async_trait::async_trait;

use super::{Result, ThrottleFlags};

/// Clock domains monitored for boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ClockDomain {
    /// The ARM cores.
    Arm,
    /// The VideoCore GPU.
    Core,
}

/// Temperature, clock and throttle readings for one SoC.
#[async_trait]
pub trait ThermalSensor: Send {
    /// Die temperature in °C.
    async fn read_temperature(&mut self) -> Result<f32>;

    /// Current clock frequency of `domain` in Hz.
    async fn read_clock_frequency(&mut self, domain: ClockDomain) -> Result<u64>;

    /// Latched throttle and under-voltage conditions.
    async fn read_throttle_flags(&mut self) -> Result<ThrottleFlags>;
}
