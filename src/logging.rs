//! Logger initialisation.

use crate::config::LogLevel;

/// Install the platform logger at the given level.
///
/// Calling this more than once is harmless; later calls only adjust the
/// global max level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

/// Install the browser console logger at the given level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    if console_log::init_with_level(level.to_level()).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}
