//! Hysteretic fan-speed control for Raspberry Pi class boards.
//!
//! The [`thermal`] module holds the decision loop. Hardware is reached
//! through the traits in [`hw_trait`], implemented for the Pi firmware
//! and kernel interfaces in [`mgmt_protocol`] and assembled by
//! [`board`].

pub mod board;
pub mod error;
pub mod hw_trait;
pub mod mgmt_protocol;
pub mod thermal;
pub mod tracing;
