//! Application state record.
//!
//! [`AppState`] mirrors what the panel is showing, independent of the
//! hardware, so business logic can query it. It is a passive record: no
//! validation and no side effects. Invariants such as "at most one of
//! vegetable/flower is on" are kept by the handlers in [`crate::panel`].

use crate::indicators::Indicator;

/// On/off state of every indicator, the strip and the pump motor.
///
/// # Example
///
/// ```rust
/// use garden_panel::{AppState, Indicator};
///
/// let mut state = AppState::new();
/// state.set_indicator_state(Indicator::Vegetable, true);
///
/// assert!(state.is_vegetable_on());
/// assert!(state.indicator_state(Indicator::Vegetable));
/// assert!(!state.is_power_on());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppState {
    power: bool,
    wifi_indicator: bool,
    pump_indicator: bool,
    vegetable_indicator: bool,
    flower_indicator: bool,
    strip_on: bool,
    motor_on: bool,
}

impl AppState {
    /// Everything off.
    pub const fn new() -> Self {
        Self {
            power: false,
            wifi_indicator: false,
            pump_indicator: false,
            vegetable_indicator: false,
            flower_indicator: false,
            strip_on: false,
            motor_on: false,
        }
    }

    /// Whether the panel is powered on.
    pub fn is_power_on(&self) -> bool {
        self.power
    }

    /// Set the power state.
    pub fn set_power(&mut self, on: bool) {
        self.power = on;
    }

    /// Whether the WiFi indicator is on.
    pub fn is_wifi_on(&self) -> bool {
        self.wifi_indicator
    }

    /// Set the WiFi indicator state.
    pub fn set_wifi(&mut self, on: bool) {
        self.wifi_indicator = on;
    }

    /// Whether the pump indicator is on.
    pub fn is_pump_on(&self) -> bool {
        self.pump_indicator
    }

    /// Set the pump indicator state.
    pub fn set_pump(&mut self, on: bool) {
        self.pump_indicator = on;
    }

    /// Whether the vegetable indicator is on.
    pub fn is_vegetable_on(&self) -> bool {
        self.vegetable_indicator
    }

    /// Set the vegetable indicator state.
    pub fn set_vegetable(&mut self, on: bool) {
        self.vegetable_indicator = on;
    }

    /// Whether the flower indicator is on.
    pub fn is_flower_on(&self) -> bool {
        self.flower_indicator
    }

    /// Set the flower indicator state.
    pub fn set_flower(&mut self, on: bool) {
        self.flower_indicator = on;
    }

    /// Whether the LED strip is on.
    pub fn is_strip_on(&self) -> bool {
        self.strip_on
    }

    /// Set the LED strip state.
    pub fn set_strip(&mut self, on: bool) {
        self.strip_on = on;
    }

    /// Whether the pump motor is running.
    pub fn is_motor_on(&self) -> bool {
        self.motor_on
    }

    /// Set the pump motor state.
    pub fn set_motor(&mut self, on: bool) {
        self.motor_on = on;
    }

    /// Set the boolean backing `indicator`. `Power` aliases the power state.
    pub fn set_indicator_state(&mut self, indicator: Indicator, on: bool) {
        match indicator {
            Indicator::Power => self.power = on,
            Indicator::Wifi => self.wifi_indicator = on,
            Indicator::Pump => self.pump_indicator = on,
            Indicator::Vegetable => self.vegetable_indicator = on,
            Indicator::Flower => self.flower_indicator = on,
        }
    }

    /// Read the boolean backing `indicator`.
    pub fn indicator_state(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Power => self.power,
            Indicator::Wifi => self.wifi_indicator,
            Indicator::Pump => self.pump_indicator,
            Indicator::Vegetable => self.vegetable_indicator,
            Indicator::Flower => self.flower_indicator,
        }
    }
}
