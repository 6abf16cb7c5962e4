//! Sensor readings through the VideoCore `vcgencmd` tool.
//!
//! The firmware exposes temperature, clocks and throttle state only
//! through the mailbox interface, which `vcgencmd` wraps. Each reading
//! spawns the tool once and parses its single line of output.

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use crate::hw_trait::{ClockDomain, HwError, Result, ThermalSensor, ThrottleFlags};
use crate::tracing::prelude::*;

static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^temp=(-?\d+(?:\.\d+)?)'C$").expect("valid regex"));
static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^frequency\(\d+\)=(\d+)$").expect("valid regex"));
static THROTTLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^throttled=0x([0-9a-fA-F]+)$").expect("valid regex"));

/// Parse `measure_temp` output, e.g. `temp=48.3'C`.
pub fn parse_temperature(output: &str) -> Result<f32> {
    TEMPERATURE
        .captures(output)
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| parse_error("measure_temp", output))
}

/// Parse `measure_clock` output in Hz, e.g. `frequency(48)=600117184`.
pub fn parse_clock(output: &str) -> Result<u64> {
    CLOCK
        .captures(output)
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| parse_error("measure_clock", output))
}

/// Parse `get_throttled` output, e.g. `throttled=0x50000`.
pub fn parse_throttled(output: &str) -> Result<ThrottleFlags> {
    THROTTLED
        .captures(output)
        .and_then(|c| u32::from_str_radix(&c[1], 16).ok())
        .map(ThrottleFlags::from_raw)
        .ok_or_else(|| parse_error("get_throttled", output))
}

fn parse_error(what: &'static str, output: &str) -> HwError {
    HwError::Parse {
        what,
        output: output.to_owned(),
    }
}

/// [`ThermalSensor`] backed by the `vcgencmd` executable.
pub struct Vcgencmd {
    program: PathBuf,
}

impl Vcgencmd {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn query(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program).args(args).output().await?;

        if !output.status.success() {
            return Err(HwError::CommandFailed {
                command: format!("{} {}", self.program.display(), args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        trace!(?args, %stdout, "vcgencmd");
        Ok(stdout)
    }
}

#[async_trait]
impl ThermalSensor for Vcgencmd {
    async fn read_temperature(&mut self) -> Result<f32> {
        parse_temperature(&self.query(&["measure_temp"]).await?)
    }

    async fn read_clock_frequency(&mut self, domain: ClockDomain) -> Result<u64> {
        parse_clock(&self.query(&["measure_clock", domain.as_ref()]).await?)
    }

    async fn read_throttle_flags(&mut self) -> Result<ThrottleFlags> {
        parse_throttled(&self.query(&["get_throttled"]).await?)
    }
}
