//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for this
/// crate and everything else stays at `warn`.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "warn,langmon=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
