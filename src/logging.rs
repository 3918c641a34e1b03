//! Subscriber setup shared by the binaries.
//!
//! Library code logs through the `log` facade; the subscriber's `tracing-log`
//! bridge picks those records up. Output goes to stderr so stdout stays
//! reserved for the report.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
    if installed.is_err() {
        // A subscriber is already installed; keep it.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tolerates_repeat_calls() {
        init("warn");
        init("debug");
        log::debug!("logging initialised twice without panicking");
    }
}
