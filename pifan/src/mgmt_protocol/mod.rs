//! Raspberry Pi firmware and kernel interfaces.

pub mod sysfs_pwm;
pub mod vcgencmd;
