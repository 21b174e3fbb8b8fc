//! Logging setup for applications driving the synthesizers

/// Initialize the logger for scripts that build and upload custom trains.
/// Uses INFO level by default so uploads and channel assignments are visible.
/// The RUST_LOG environment variable can override the default level.
/// Calling it again after a logger is installed does nothing.
pub fn init_logger() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .try_init();
}
