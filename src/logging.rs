//! Logging initialization.

use env_logger::{Builder, Env};

/// Initialize the global logger.
///
/// Logs go to stderr so stdout only carries export notices and the report.
/// `RUST_LOG` takes precedence over the level picked from `debug`.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(level))
        .format_target(debug)
        .init();
}
