//! Fan control daemon.
//!
//! Runs until the watchdog sees a throttle condition or the hardware
//! stops answering, then exits with status 1. Logs go to the journal
//! under systemd, stdout otherwise; `RUST_LOG` sets verbosity.
//!
//! Environment:
//!   PIFAN_VCGENCMD             vcgencmd executable (default: vcgencmd)
//!   PIFAN_PWM_CHIP             sysfs PWM chip (default: /sys/class/pwm/pwmchip0)
//!   PIFAN_ARM_CEILING_MHZ      highest unboosted ARM clock
//!   PIFAN_CORE_CEILING_MHZ     highest unboosted GPU core clock
//!   PIFAN_CLOCK_TOLERANCE_MHZ  slack above either ceiling before counting as boost

use std::convert::Infallible;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::time;

use pifan::board::{BoardConfig, raspberry_pi::RaspberryPi};
use pifan::thermal::{ThermalConfig, ThermalController};
use pifan::tracing::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pifan::tracing::init_journald_or_stdout();

    info!("pifand v{} starting", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(never) => match never {},
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<Infallible> {
    let config = ThermalConfig::from_env().context("thermal configuration")?;
    let board_config = BoardConfig::from_env();

    let board = RaspberryPi::open(&board_config)
        .await
        .context("opening board")?;
    let (sensor, fans) = board.into_parts();

    debug!(delay = ?config.startup_delay, "Waiting for firmware to settle");
    time::sleep(config.startup_delay).await;

    let controller = ThermalController::new(config, sensor, fans)?;
    Ok(controller.run().await?)
}
