//! Fan PWM through the kernel's sysfs PWM class.
//!
//! Both fan channels live on one PWM chip (`pwm0` on GPIO12 and `pwm1` on
//! GPIO13 with the `pwm-2chan` overlay). The controller speaks in
//! 1024ths of full scale, matching the firmware PWM range; this module
//! converts that to a duty cycle in nanoseconds of the configured period.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::{fs, time};

use crate::hw_trait::{FanActuator, FanChannel, HwError, MAX_DUTY, Result};
use crate::tracing::prelude::*;

/// 25 kHz, the PWM frequency 4-pin PC fans expect.
pub const DEFAULT_PERIOD_NS: u64 = 40_000;

/// Time for udev to apply permissions to a freshly exported channel.
const EXPORT_SETTLE: Duration = Duration::from_millis(100);

/// Convert a `0..=MAX_DUTY` duty value to nanoseconds of `period_ns`.
pub fn duty_cycle_ns(period_ns: u64, duty: u16) -> u64 {
    period_ns * u64::from(duty) / u64::from(MAX_DUTY)
}

/// [`FanActuator`] writing to `/sys/class/pwm/pwmchipN`.
pub struct SysfsPwm {
    chip: PathBuf,
    period_ns: u64,
}

impl SysfsPwm {
    /// Export and enable both fan channels with the fans stopped.
    pub async fn open(chip: impl Into<PathBuf>, period_ns: u64) -> Result<Self> {
        if period_ns == 0 {
            return Err(HwError::InvalidParameter("PWM period must be non-zero".into()));
        }

        let pwm = Self {
            chip: chip.into(),
            period_ns,
        };

        for channel in FanChannel::ALL {
            pwm.init_channel(channel).await?;
        }

        Ok(pwm)
    }

    fn channel_dir(&self, channel: FanChannel) -> PathBuf {
        self.chip.join(format!("pwm{}", channel.index()))
    }

    async fn init_channel(&self, channel: FanChannel) -> Result<()> {
        let dir = self.channel_dir(channel);

        if fs::metadata(&dir).await.is_err() {
            debug!(%channel, chip = %self.chip.display(), "Exporting PWM channel");
            write_attr(&self.chip.join("export"), channel.index()).await?;
            time::sleep(EXPORT_SETTLE).await;
        }

        // duty_cycle may not exceed period, so zero it before touching period
        write_attr(&dir.join("duty_cycle"), 0).await?;
        write_attr(&dir.join("period"), self.period_ns).await?;
        write_attr(&dir.join("enable"), 1).await?;

        Ok(())
    }
}

async fn write_attr(path: &Path, value: impl ToString) -> Result<()> {
    fs::write(path, value.to_string()).await.map_err(|e| {
        HwError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

#[async_trait]
impl FanActuator for SysfsPwm {
    async fn set_duty(&mut self, channel: FanChannel, duty: u16) -> Result<()> {
        if duty > MAX_DUTY {
            return Err(HwError::InvalidParameter(format!(
                "duty {duty} exceeds {MAX_DUTY}"
            )));
        }

        let duty_ns = duty_cycle_ns(self.period_ns, duty);
        trace!(%channel, duty, duty_ns, "Setting fan duty");
        write_attr(&self.channel_dir(channel).join("duty_cycle"), duty_ns).await
    }
}
