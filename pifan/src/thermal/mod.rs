mod aggregator;
mod config;
mod controller;
mod history;
mod sample;
mod sampler;
mod selector;
mod watchdog;

pub use aggregator::aggregate;
pub use config::ThermalConfig;
pub use controller::ThermalController;
pub use history::{HistoryBuffer, PollMode};
pub use sample::Sample;
pub use sampler::Sampler;
pub use selector::{FanLevel, Selection, select};
pub use watchdog::Watchdog;
