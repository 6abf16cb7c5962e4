use crate::error::{Error, Result};
use crate::hw_trait::{FanActuator, FanChannel, MAX_DUTY, ThermalSensor};
use crate::tracing::prelude::*;

/// Periodic throttle check that overrides everything else.
///
/// Fires every `cadence` loop iterations, counted independently of the
/// poll mode, so at the baseline interval it checks once per history
/// window.
#[derive(Debug, Clone)]
pub struct Watchdog {
    cadence: u32,
    ticks: u32,
}

impl Watchdog {
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            ticks: 0,
        }
    }

    /// Count one loop iteration; true when the check is due.
    pub fn tick(&mut self) -> bool {
        self.ticks = (self.ticks + 1) % self.cadence;
        self.ticks == 0
    }

    /// Count one iteration and, when due, check the throttle flags.
    ///
    /// Latched flags force every fan to full duty and return
    /// [`Error::Throttled`]. Each channel is driven independently, so one
    /// failed write does not leave the other fan at its previous speed. The caller is expected to stop: this
    /// condition means the normal control loop already failed to protect
    /// the chip.
    pub async fn poll<S, F>(&mut self, sensor: &mut S, fans: &mut F) -> Result<()>
    where
        S: ThermalSensor + ?Sized,
        F: FanActuator + ?Sized,
    {
        if !self.tick() {
            return Ok(());
        }

        let flags = sensor.read_throttle_flags().await?;
        if flags.is_empty() {
            debug!("Watchdog: no throttle conditions");
            return Ok(());
        }

        error!(%flags, "Throttle condition latched, forcing fans to maximum");
        for channel in FanChannel::ALL {
            if let Err(e) = fans.set_duty(channel, MAX_DUTY).await {
                error!(%channel, error = %e, "Failed to force fan to maximum");
            }
        }

        Err(Error::Throttled(flags))
    }
}
