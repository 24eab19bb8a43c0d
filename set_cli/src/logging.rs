//! Logging setup for the console runner.

use env_logger::Env;

/// Initialize logging, filtered by `RUST_LOG` and defaulting to `info`
///
/// # Example
///
/// ```no_run
/// logging::init();
/// log::info!("Game starting");
/// ```
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}
