//! Diagnostic logging setup for the binary.
//!
//! Library code only emits `tracing` events. The binary installs one fmt
//! subscriber writing to stderr so stdout carries nothing but artifacts.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level used when `RUST_LOG` is unset and `--verbose` is off.
pub const DEFAULT_LEVEL: &str = "warn";

/// Level `--verbose` raises the default to.
pub const VERBOSE_LEVEL: &str = "debug";

/// The filter for this run. `RUST_LOG` wins over both defaults.
pub fn filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
