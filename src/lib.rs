//! # garden-panel
//!
//! Control-panel firmware for a smart garden appliance: four push-buttons,
//! five indicator LEDs behind a 74HC595 shift register, a tri-colour grow
//! light strip and a WiFi link.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for shift register lines, strip PWM, buttons and time
//! - **Debounced buttons**: Active-low inputs with an 80 ms debounce window
//! - **Indicator driver**: Named LEDs, strip colour presets and a free-running WiFi blink
//! - **Connection tracking**: Idle/Connecting/Connected with periodic retry
//! - **Mutually exclusive lighting**: Vegetable and flower modes never run together
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware and network abstractions
//! - `shift_register` - In-memory output byte with an explicit latch
//! - `button` - Debounced push-button
//! - `indicators` - Indicator LEDs, strip and pump motor bit
//! - `network` - WiFi connection lifecycle
//! - `state` - Application state record
//! - `panel` - Control loop that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use garden_panel::{ButtonId, Indicator, Panel, PanelButtons, StripMode};
//! use garden_panel::config::Config;
//! use garden_panel::hal::{MockClock, MockInput, MockShiftPins, MockStrip, MockWifi};
//!
//! let config = Config::default();
//! let buttons = PanelButtons::from_inputs(
//!     [MockInput::new(), MockInput::new(), MockInput::new(), MockInput::new()],
//!     [12, 13, 14, 15],
//!     config.timing.debounce_ms,
//! );
//! let mut panel = Panel::new(
//!     MockShiftPins::new(),
//!     MockStrip::new(),
//!     MockWifi::new(),
//!     buttons,
//!     MockClock::new(),
//!     config,
//! );
//! panel.setup().unwrap();
//!
//! panel.handle_click(ButtonId::Power).unwrap();
//! panel.handle_click(ButtonId::Vegetable).unwrap();
//!
//! assert!(panel.indicators().indicator_state(Indicator::Vegetable));
//! assert_eq!(panel.indicators().strip_mode(), StripMode::ColorA);
//!
//! // Main loop
//! for _ in 0..10 {
//!     panel.tick().unwrap();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Debounced push-button input.
pub mod button;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Indicator LEDs, LED strip and pump motor output.
pub mod indicators;
/// WiFi connection lifecycle.
pub mod network;
/// Control loop and button handlers.
pub mod panel;
/// 74HC595 output register.
pub mod shift_register;
/// Application state record.
pub mod state;
/// Core traits for hardware and network abstraction.
pub mod traits;

/// Shared configuration system for desktop and ESP32.
pub mod config;

/// Global debug-log switch.
pub mod logging;

// Re-exports for convenience
pub use button::Button;
pub use indicators::{Indicator, IndicatorDriver, IndicatorMap, StripMode};
pub use network::{ConnectionState, NetworkManager};
pub use panel::{ButtonId, Panel, PanelButtons};
pub use shift_register::ShiftRegister;
pub use state::AppState;
pub use traits::{
    // Hardware
    Clock,
    Delay,
    DigitalInput,
    ShiftRegisterPins,
    StripChannel,
    StripPwm,
    // Network
    LinkStatus,
    WifiLink,
};

// Config re-exports
pub use config::{Config, DeviceConfig, IndicatorConfig, TimingConfig, WifiConfig};
