//! Global debug-log switch.
//!
//! All crate logging goes through the [`log`] facade at `info`, `warn` and
//! `error` level. The binary installs the sink (`EspLogger` on the ESP32);
//! this module only gates it. Disabling sets the maximum level to `Off`, so
//! a production build with logging disabled emits nothing at all.
//!
//! ```rust
//! use garden_panel::logging;
//!
//! logging::set_debug(false);
//! assert!(!logging::is_debug_enabled());
//!
//! logging::set_debug(true);
//! assert!(logging::is_debug_enabled());
//! ```

use log::LevelFilter;

/// Most verbose level emitted while debug logging is enabled.
pub const DEBUG_LEVEL: LevelFilter = LevelFilter::Info;

/// Enable or disable debug logging globally.
pub fn set_debug(enabled: bool) {
    log::set_max_level(if enabled {
        DEBUG_LEVEL
    } else {
        LevelFilter::Off
    });
}

/// Whether debug logging is currently enabled.
pub fn is_debug_enabled() -> bool {
    log::max_level() != LevelFilter::Off
}
