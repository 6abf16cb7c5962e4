use super::BoardConfig;
use crate::hw_trait::{Result, ThermalSensor};
use crate::mgmt_protocol::{sysfs_pwm::SysfsPwm, vcgencmd::Vcgencmd};
use crate::tracing::prelude::*;

/// A Raspberry Pi with two case fans on the hardware PWM channels.
pub struct RaspberryPi {
    sensor: Vcgencmd,
    fans: SysfsPwm,
}

impl RaspberryPi {
    /// Bring up the fan outputs (stopped) and confirm the firmware answers.
    pub async fn open(config: &BoardConfig) -> Result<Self> {
        let fans = SysfsPwm::open(&config.pwm_chip, config.pwm_period_ns).await?;
        let mut sensor = Vcgencmd::new(&config.vcgencmd);

        let temperature = sensor.read_temperature().await?;
        info!(
            pwm_chip = %config.pwm_chip.display(),
            temp_c = %temperature,
            "Raspberry Pi board ready"
        );

        Ok(Self { sensor, fans })
    }

    pub fn into_parts(self) -> (Vcgencmd, SysfsPwm) {
        (self.sensor, self.fans)
    }
}
