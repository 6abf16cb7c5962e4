//! Logging setup and the crate-wide macro prelude.

use std::env;

use time::macros::format_description;
use tracing_subscriber::{EnvFilter, fmt::time::LocalTime, prelude::*};

pub mod prelude {
    pub use ::tracing::{debug, error, info, trace, warn};
}

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Under systemd (`JOURNAL_STREAM` is set) events go straight to the
/// journal, which adds its own timestamps. Anywhere else, or if the
/// journal socket can't be reached, events are formatted to stdout.
/// `RUST_LOG` controls verbosity in both cases.
pub fn init_journald_or_stdout() {
    if env::var_os("JOURNAL_STREAM").is_some() {
        if let Ok(journald) = tracing_journald::layer() {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(journald)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .init();
}
