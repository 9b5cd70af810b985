//! Tracing setup for the command-line tool.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug` and the
/// default is `warn`. Output goes to stderr so stdout stays parseable.
pub fn init(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    // A subscriber may already be installed when embedded.
    if let Err(err) = result {
        tracing::debug!("tracing already initialized: {}", err);
    }
}
