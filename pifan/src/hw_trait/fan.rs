use async_trait::async_trait;

use super::Result;

/// Full-scale duty value. Duty is expressed in 1024ths of the PWM period.
pub const MAX_DUTY: u16 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FanChannel {
    Inhale,
    Exhale,
}

impl FanChannel {
    pub const ALL: [FanChannel; 2] = [FanChannel::Inhale, FanChannel::Exhale];

    /// Hardware PWM channel number.
    pub fn index(self) -> u8 {
        match self {
            FanChannel::Inhale => 0,
            FanChannel::Exhale => 1,
        }
    }
}

/// PWM outputs driving the case fans.
#[async_trait]
pub trait FanActuator: Send {
    /// Set one channel's duty, `0..=MAX_DUTY`.
    async fn set_duty(&mut self, channel: FanChannel, duty: u16) -> Result<()>;

    /// Drive every channel to the same duty, stopping at the first failure.
    async fn set_all(&mut self, duty: u16) -> Result<()> {
        for channel in FanChannel::ALL {
            self.set_duty(channel, duty).await?;
        }
        Ok(())
    }
}
