//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
/// Does nothing if a logger is already installed.
///
/// # Example
/// ```
/// voxsculpt::core::logging::init();
/// log::info!("World created");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init().ok();
}
