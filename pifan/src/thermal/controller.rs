use std::convert::Infallible;
use std::time::Duration;

use tokio::time;

use super::aggregator::aggregate;
use super::config::ThermalConfig;
use super::history::{HistoryBuffer, PollMode};
use super::sampler::Sampler;
use super::selector::{FanLevel, select};
use super::watchdog::Watchdog;
use crate::error::Result;
use crate::hw_trait::{FanActuator, ThermalSensor};
use crate::tracing::prelude::*;

/// The fan control loop and all of its state.
pub struct ThermalController<S, F> {
    config: ThermalConfig,
    sensor: S,
    fans: F,
    sampler: Sampler,
    history: HistoryBuffer,
    watchdog: Watchdog,
    poll_mode: PollMode,
}

impl<S: ThermalSensor, F: FanActuator> ThermalController<S, F> {
    pub fn new(config: ThermalConfig, sensor: S, fans: F) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            sampler: Sampler::new(&config),
            history: HistoryBuffer::new(&config),
            watchdog: Watchdog::new(config.watchdog_cadence()),
            poll_mode: PollMode::Baseline,
            config,
            sensor,
            fans,
        })
    }

    /// Run until something fatal happens.
    ///
    /// There is no clean exit: the loop ends only with a sensor or
    /// actuator failure, or with [`Error::Throttled`](crate::error::Error::Throttled)
    /// after the watchdog has forced the fans to maximum.
    pub async fn run(mut self) -> Result<Infallible> {
        info!(
            interval = ?self.config.baseline_poll_interval,
            window = ?self.config.history_window,
            "Thermal controller started"
        );

        loop {
            let sleep = self.tick().await?;
            time::sleep(sleep).await;
        }
    }

    pub fn poll_mode(&self) -> PollMode {
        self.poll_mode
    }

    /// Level applied on the most recent sample.
    pub fn current_level(&self) -> Option<FanLevel> {
        self.history.latest().and_then(|s| s.selected_level)
    }

    #[cfg(test)]
    fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// One iteration: sample, watchdog, record, aggregate, select, apply.
    /// Returns how long to sleep before the next one.
    async fn tick(&mut self) -> Result<Duration> {
        let sample = self
            .sampler
            .sample(&mut self.sensor, self.history.latest())
            .await?;

        self.watchdog.poll(&mut self.sensor, &mut self.fans).await?;

        let temperature = sample.temperature_c;
        let boosted = sample.boosted;
        let mode = self.history.push(sample);

        if mode != self.poll_mode {
            info!(
                previous_mode = %self.poll_mode,
                new_mode = %mode,
                interval = ?self.config.poll_interval(mode),
                "Poll mode changed"
            );
            self.poll_mode = mode;
        }

        let effective_temp = aggregate(&mut self.history);
        let previous_level = self.history.previous().and_then(|s| s.selected_level);
        let selection = select(effective_temp, previous_level);

        if selection.should_write {
            info!(
                previous_level = ?previous_level,
                new_level = %selection.level,
                effective_temp_c = %effective_temp,
                duty = selection.level.duty(),
                "Fan level changed"
            );
            self.fans.set_all(selection.level.duty()).await?;
        }

        if let Some(latest) = self.history.latest_mut() {
            latest.selected_level = Some(selection.level);
        }

        debug!(
            temp_c = %temperature,
            boosted,
            effective_temp_c = %effective_temp,
            level = %selection.level,
            wrote = selection.should_write,
            mode = %mode,
            window_len = self.history.len(),
            "Thermal control tick"
        );

        Ok(self.config.poll_interval(mode))
    }
}
