//! Logging init for the command-line tool.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: only configuration warnings reach the user.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a stderr subscriber so filter output on stdout stays clean.
///
/// `verbose` raises this crate to `debug`, which logs every CDN host decision.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        format!("{DEFAULT_LOG_FILTER},cdn_url_filters=debug")
    } else {
        DEFAULT_LOG_FILTER.to_string()
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
