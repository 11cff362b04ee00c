//! Panel configuration shared by the desktop tests and the ESP32 binary.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use garden_panel::config::{Config, IndicatorConfig, WifiConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.timing.debounce_ms, 80);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_wifi(WifiConfig::default().with_ssid("greenhouse"))
//!     .with_indicators(IndicatorConfig::default().with_blink_interval_ms(250));
//! assert!(config.wifi.is_configured());
//! ```

use heapless::String as HString;

/// Maximum length for config strings (SSID, password, device name)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// WiFi connection configuration
    pub wifi: WifiConfig,
    /// Indicator bit layout and blink behaviour
    pub indicators: IndicatorConfig,
    /// Control loop timing
    pub timing: TimingConfig,
    /// Device identification and logging
    pub device: DeviceConfig,
}

impl Config {
    /// Set WiFi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set indicator configuration
    pub fn with_indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set timing configuration
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi connection configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WifiConfig {
    /// WiFi network SSID
    pub ssid: ShortString,
    /// WiFi password
    pub password: ShortString,
    /// Whether WiFi is enabled
    pub enabled: bool,
    /// Time without success before an association is restarted
    pub retry_interval_ms: u32,
    /// Blocking pause after each poll while the link is down
    pub poll_throttle_ms: u32,
    /// Upper bound on waiting for a confirmed disconnect
    pub disconnect_timeout_ms: u32,
    /// Poll step while waiting for a confirmed disconnect
    pub disconnect_poll_ms: u32,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
            enabled: true,
            retry_interval_ms: 5000,
            poll_throttle_ms: 250,
            disconnect_timeout_ms: 5000,
            disconnect_poll_ms: 10,
        }
    }
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Enable or disable WiFi
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the retry interval
    pub fn with_retry_interval_ms(mut self, ms: u32) -> Self {
        self.retry_interval_ms = ms;
        self
    }

    /// Set the poll throttle
    pub fn with_poll_throttle_ms(mut self, ms: u32) -> Self {
        self.poll_throttle_ms = ms;
        self
    }

    /// Set the disconnect timeout
    pub fn with_disconnect_timeout_ms(mut self, ms: u32) -> Self {
        self.disconnect_timeout_ms = ms;
        self
    }

    /// Check if WiFi credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Indicator Config
// ============================================================================

/// Shift register bit layout and blink parameters
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorConfig {
    /// Register bit of the power LED
    pub power_bit: u8,
    /// Register bit of the WiFi LED
    pub wifi_bit: u8,
    /// Register bit of the pump LED
    pub pump_bit: u8,
    /// Register bit of the vegetable LED
    pub vegetable_bit: u8,
    /// Register bit of the flower LED
    pub flower_bit: u8,
    /// Register bit driving the pump motor
    pub motor_bit: u8,
    /// Half-period of the WiFi blink
    pub blink_interval_ms: u32,
    /// `count` passed to the blink while connecting
    pub wifi_blink_count: u32,
    /// Blink calls made by the status policy before forcing the LED off
    pub wifi_blink_attempts: u8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            power_bit: 0,
            wifi_bit: 1,
            pump_bit: 2,
            vegetable_bit: 3,
            flower_bit: 4,
            motor_bit: 5,
            blink_interval_ms: 500,
            wifi_blink_count: 3,
            wifi_blink_attempts: 3,
        }
    }
}

impl IndicatorConfig {
    /// Set the five indicator bits (power, wifi, pump, vegetable, flower)
    pub fn with_bits(mut self, bits: [u8; 5]) -> Self {
        let [power, wifi, pump, vegetable, flower] = bits;
        self.power_bit = power;
        self.wifi_bit = wifi;
        self.pump_bit = pump;
        self.vegetable_bit = vegetable;
        self.flower_bit = flower;
        self
    }

    /// Set the pump motor bit
    pub fn with_motor_bit(mut self, bit: u8) -> Self {
        self.motor_bit = bit;
        self
    }

    /// Set the blink half-period
    pub fn with_blink_interval_ms(mut self, ms: u32) -> Self {
        self.blink_interval_ms = ms;
        self
    }

    /// Set the blink count used while connecting
    pub fn with_wifi_blink_count(mut self, count: u32) -> Self {
        self.wifi_blink_count = count;
        self
    }
}

// ============================================================================
// Timing Config
// ============================================================================

/// Control loop timing
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Blocking delay at the end of every tick
    pub loop_tick_ms: u32,
    /// Minimum stable time before a button level is committed
    pub debounce_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loop_tick_ms: 10,
            debounce_ms: 80,
        }
    }
}

impl TimingConfig {
    /// Set the loop tick
    pub fn with_loop_tick_ms(mut self, ms: u32) -> Self {
        self.loop_tick_ms = ms;
        self
    }

    /// Set the debounce window
    pub fn with_debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// Whether debug logging is enabled at boot
    pub debug_logging: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("garden-panel"),
            debug_logging: true,
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Enable or disable debug logging
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
