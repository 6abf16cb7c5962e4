//! Scripted hardware for exercising the controller without a board.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ClockDomain, FanActuator, FanChannel, HwError, Result, ThermalSensor, ThrottleFlags};

pub const IDLE_ARM_HZ: u64 = 600_000_000;
pub const IDLE_CORE_HZ: u64 = 200_000_000;
pub const BOOST_ARM_HZ: u64 = 1_500_000_000;

/// Plays back `(temperature, boosted)` readings, one per temperature read.
///
/// Clock reads report boosted or idle frequencies for the reading most
/// recently returned. Once the script runs out every read fails, which
/// ends any loop driving the sensor.
pub struct ScriptedSensor {
    readings: VecDeque<(f32, bool)>,
    current_boosted: bool,
    throttle: ThrottleFlags,
    pub throttle_reads: Arc<Mutex<usize>>,
}

impl ScriptedSensor {
    pub fn new(readings: impl IntoIterator<Item = (f32, bool)>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            current_boosted: false,
            throttle: ThrottleFlags::empty(),
            throttle_reads: Arc::new(Mutex::new(0)),
        }
    }

    /// Unboosted readings at the given temperatures.
    pub fn temperatures(temperatures: impl IntoIterator<Item = f32>) -> Self {
        Self::new(temperatures.into_iter().map(|t| (t, false)))
    }

    pub fn with_throttle(mut self, flags: ThrottleFlags) -> Self {
        self.throttle = flags;
        self
    }

    fn exhausted() -> HwError {
        HwError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

#[async_trait]
impl ThermalSensor for ScriptedSensor {
    async fn read_temperature(&mut self) -> Result<f32> {
        let (temperature, boosted) = self.readings.pop_front().ok_or_else(Self::exhausted)?;
        self.current_boosted = boosted;
        Ok(temperature)
    }

    async fn read_clock_frequency(&mut self, domain: ClockDomain) -> Result<u64> {
        Ok(match (domain, self.current_boosted) {
            (ClockDomain::Arm, true) => BOOST_ARM_HZ,
            (ClockDomain::Arm, false) => IDLE_ARM_HZ,
            (ClockDomain::Core, _) => IDLE_CORE_HZ,
        })
    }

    async fn read_throttle_flags(&mut self) -> Result<ThrottleFlags> {
        *self.throttle_reads.lock() += 1;
        Ok(self.throttle)
    }
}

/// Records every duty write. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingFans {
    pub writes: Arc<Mutex<Vec<(FanChannel, u16)>>>,
}

impl RecordingFans {
    pub fn writes(&self) -> Vec<(FanChannel, u16)> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl FanActuator for RecordingFans {
    async fn set_duty(&mut self, channel: FanChannel, duty: u16) -> Result<()> {
        self.writes.lock().push((channel, duty));
        Ok(())
    }
}
