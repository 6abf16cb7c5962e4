//! Hardware traits consumed by the thermal controller.
//!
//! The controller only ever talks to hardware through these traits, so
//! the decision loop can be driven by scripted fakes in tests and by the
//! Raspberry Pi implementations in [`crate::mgmt_protocol`] in the daemon.

pub mod fan;
#[cfg(test)]
pub(crate) mod mock;
pub mod sensor;
mod throttle;

use std::io;

use thiserror::Error;

pub use fan::{FanActuator, FanChannel, MAX_DUTY};
pub use sensor::{ClockDomain, ThermalSensor};
pub use throttle::ThrottleFlags;

#[derive(Error, Debug)]
pub enum HwError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("unexpected {what} output: {output:?}")]
    Parse { what: &'static str, output: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, HwError>;
