//! Tracing setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs the global subscriber: `RUST_LOG` wins over the configured
/// level, extra directives are applied on top. Safe to call more than
/// once; later calls are no-ops.
pub fn init(config: &LoggingConfig) {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    for directive in &config.directives {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => eprintln!("ignoring log directive {directive:?}: {err}"),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(true))
        .with(filter)
        .try_init();
}
