use thiserror::Error;

use crate::hw_trait::{HwError, ThrottleFlags};

#[derive(Error, Debug)]
pub enum Error {
    #[error("hardware error: {0}")]
    Hardware(#[from] HwError),

    /// The firmware latched a throttle or under-voltage condition. Fans
    /// have already been forced to maximum when this is returned.
    #[error("throttle condition latched ({0}), fans forced to maximum")]
    Throttled(ThrottleFlags),

    #[error("invalid sensor reading: {0}")]
    InvalidReading(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
