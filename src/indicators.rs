//! Indicator LEDs and the RGB strip.
//!
//! [`IndicatorDriver`] owns the [`ShiftRegister`] and the strip PWM. Every
//! single-indicator operation updates one bit and immediately writes the
//! whole register; there is no batching beyond
//! [`IndicatorDriver::tune_multiple_indicators`], which still flushes after
//! each item.
//!
//! # Example
//!
//! ```rust
//! use garden_panel::{Indicator, IndicatorDriver, StripMode};
//! use garden_panel::config::IndicatorConfig;
//! use garden_panel::hal::{MockShiftPins, MockStrip};
//!
//! let mut leds = IndicatorDriver::new(
//!     MockShiftPins::new(),
//!     MockStrip::new(),
//!     &IndicatorConfig::default(),
//! );
//!
//! leds.set_indicator_state(Indicator::Power, true).unwrap();
//! leds.set_strip_mode(StripMode::ColorB).unwrap();
//!
//! assert!(leds.indicator_state(Indicator::Power));
//! assert_eq!(leds.strip().duties(), [0, 255, 0]);
//! ```

use crate::config::IndicatorConfig;
use crate::shift_register::{ShiftRegister, REGISTER_WIDTH};
use crate::traits::{ShiftRegisterPins, StripChannel, StripPwm};

/// Logical indicator LED on the shift register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Indicator {
    /// Panel powered on.
    Power,
    /// WiFi link status.
    Wifi,
    /// Pump selected.
    Pump,
    /// Vegetable growing profile.
    Vegetable,
    /// Flower growing profile.
    Flower,
}

impl Indicator {
    /// Every indicator, in register order of the default layout.
    pub const ALL: [Indicator; 5] = [
        Indicator::Power,
        Indicator::Wifi,
        Indicator::Pump,
        Indicator::Vegetable,
        Indicator::Flower,
    ];

    /// Returns the indicator name as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Indicator::Power => "power",
            Indicator::Wifi => "wifi",
            Indicator::Pump => "pump",
            Indicator::Vegetable => "vegetable",
            Indicator::Flower => "flower",
        }
    }
}

/// Preset for the tri-colour strip.
///
/// | Mode | Raw | Blue | Red | Green |
/// |------|-----|------|-----|-------|
/// | `ColorA` | 0 | 255 | 0 | 0 |
/// | `ColorB` | 1 | 0 | 255 | 0 |
/// | `Off` | 2 | 0 | 0 | 0 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StripMode {
    /// Full blue (vegetable profile).
    ColorA,
    /// Full red (flower profile).
    ColorB,
    /// All channels off.
    #[default]
    Off,
}

impl StripMode {
    /// Decode a raw mode number. Unknown values yield `None`.
    ///
    /// ```
    /// use garden_panel::StripMode;
    ///
    /// assert_eq!(StripMode::from_raw(0), Some(StripMode::ColorA));
    /// assert_eq!(StripMode::from_raw(2), Some(StripMode::Off));
    /// assert_eq!(StripMode::from_raw(3), None);
    /// ```
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(StripMode::ColorA),
            1 => Some(StripMode::ColorB),
            2 => Some(StripMode::Off),
            _ => None,
        }
    }

    /// Raw mode number.
    pub const fn as_raw(self) -> u8 {
        match self {
            StripMode::ColorA => 0,
            StripMode::ColorB => 1,
            StripMode::Off => 2,
        }
    }

    /// Duty per channel, in [`StripChannel`] order.
    pub const fn duties(self) -> [u8; 3] {
        match self {
            StripMode::ColorA => [255, 0, 0],
            StripMode::ColorB => [0, 255, 0],
            StripMode::Off => [0, 0, 0],
        }
    }

    /// Any channel lit.
    pub const fn is_on(self) -> bool {
        !matches!(self, StripMode::Off)
    }
}

/// Register bit for every indicator and the pump motor. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorMap {
    power: u8,
    wifi: u8,
    pump: u8,
    vegetable: u8,
    flower: u8,
    motor: u8,
}

impl IndicatorMap {
    /// Build the lookup table from configuration.
    ///
    /// Bits outside the register are logged; writes to them wrap.
    pub fn from_config(config: &IndicatorConfig) -> Self {
        let map = Self {
            power: config.power_bit,
            wifi: config.wifi_bit,
            pump: config.pump_bit,
            vegetable: config.vegetable_bit,
            flower: config.flower_bit,
            motor: config.motor_bit,
        };
        for indicator in Indicator::ALL {
            let bit = map.pin(indicator);
            if bit >= REGISTER_WIDTH {
                log::error!(
                    "Indicator {} mapped to bit {} outside the register",
                    indicator.as_str(),
                    bit
                );
            }
        }
        if map.motor >= REGISTER_WIDTH {
            log::error!("Pump motor mapped to bit {} outside the register", map.motor);
        }
        map
    }

    /// Register bit for `indicator`.
    pub const fn pin(&self, indicator: Indicator) -> u8 {
        match indicator {
            Indicator::Power => self.power,
            Indicator::Wifi => self.wifi,
            Indicator::Pump => self.pump,
            Indicator::Vegetable => self.vegetable,
            Indicator::Flower => self.flower,
        }
    }

    /// Register bit of the pump motor.
    pub const fn motor_pin(&self) -> u8 {
        self.motor
    }
}

impl Default for IndicatorMap {
    fn default() -> Self {
        Self::from_config(&IndicatorConfig::default())
    }
}

/// Free-running blink phase for the WiFi indicator.
#[derive(Clone, Copy, Debug, Default)]
struct BlinkPhase {
    last_toggle_ms: u64,
    lit: bool,
    lit_count: u32,
}

/// Drives indicator bits through the shift register and the strip through PWM.
pub struct IndicatorDriver<P, S>
where
    P: ShiftRegisterPins,
    S: StripPwm<Error = P::Error>,
{
    register: ShiftRegister<P>,
    strip: S,
    map: IndicatorMap,
    strip_mode: StripMode,
    blink: BlinkPhase,
    blink_interval_ms: u32,
    wifi_blink_attempts: u8,
    max_wifi_blink_attempts: u8,
}

impl<P, S> IndicatorDriver<P, S>
where
    P: ShiftRegisterPins,
    S: StripPwm<Error = P::Error>,
{
    /// Create a driver. Nothing is written until the first operation.
    pub fn new(pins: P, strip: S, config: &IndicatorConfig) -> Self {
        Self {
            register: ShiftRegister::new(pins),
            strip,
            map: IndicatorMap::from_config(config),
            strip_mode: StripMode::Off,
            blink: BlinkPhase::default(),
            blink_interval_ms: config.blink_interval_ms,
            wifi_blink_attempts: 0,
            max_wifi_blink_attempts: config.wifi_blink_attempts,
        }
    }

    /// Set one indicator and flush the register.
    pub fn set_indicator_state(&mut self, indicator: Indicator, on: bool) -> Result<(), P::Error> {
        self.register.set_pin_state(self.map.pin(indicator), on);
        self.register.write()
    }

    /// Flip one indicator and flush the register.
    pub fn toggle_indicator_state(&mut self, indicator: Indicator) -> Result<(), P::Error> {
        let pin = self.map.pin(indicator);
        let current = self.register.pin_state(pin);
        self.register.set_pin_state(pin, !current);
        self.register.write()
    }

    /// Current bit of `indicator` as held in the register.
    pub fn indicator_state(&self, indicator: Indicator) -> bool {
        self.register.pin_state(self.map.pin(indicator))
    }

    /// Apply `(indicator, on)` pairs in order, flushing after each one.
    pub fn tune_multiple_indicators(&mut self, settings: &[(Indicator, bool)]) -> Result<(), P::Error> {
        for &(indicator, on) in settings {
            self.set_indicator_state(indicator, on)?;
        }
        Ok(())
    }

    /// Drive all three strip channels for `mode`.
    pub fn set_strip_mode(&mut self, mode: StripMode) -> Result<(), P::Error> {
        let duties = mode.duties();
        for channel in StripChannel::ALL {
            self.strip.set_duty(channel, duties[channel.index()])?;
        }
        self.strip_mode = mode;
        Ok(())
    }

    /// Like [`set_strip_mode`](Self::set_strip_mode) for a raw mode number.
    /// Unknown values are ignored.
    pub fn set_strip_mode_raw(&mut self, raw: u8) -> Result<(), P::Error> {
        match StripMode::from_raw(raw) {
            Some(mode) => self.set_strip_mode(mode),
            None => Ok(()),
        }
    }

    /// Last strip mode applied.
    #[inline]
    pub fn strip_mode(&self) -> StripMode {
        self.strip_mode
    }

    /// Advance the WiFi blink. Call every loop iteration while blinking.
    ///
    /// The indicator toggles once per blink interval. Each time it turns on
    /// the phase counter advances and wraps to zero after `count * 2`; the
    /// blink itself keeps running regardless of `count`.
    pub fn blink_wifi_indicator(&mut self, count: u32, now_ms: u64) -> Result<(), P::Error> {
        if now_ms.saturating_sub(self.blink.last_toggle_ms) < u64::from(self.blink_interval_ms) {
            return Ok(());
        }

        self.blink.lit = !self.blink.lit;
        self.register.set_pin_state(self.map.pin(Indicator::Wifi), self.blink.lit);
        self.register.write()?;
        self.blink.last_toggle_ms = now_ms;

        if self.blink.lit {
            self.blink.lit_count += 1;
            if self.blink.lit_count >= count.saturating_mul(2) {
                self.blink.lit_count = 0;
            }
        }
        Ok(())
    }

    /// Number of "on" phases counted by the blink since it last wrapped.
    pub fn blink_phase_count(&self) -> u32 {
        self.blink.lit_count
    }

    /// WiFi indicator policy: solid when connected, a few blinks otherwise.
    ///
    /// While disconnected, each call performs one blink step until the
    /// attempt budget is spent, then forces the indicator off. A connected
    /// report resets the budget.
    pub fn update_wifi_indicator_status(&mut self, is_connected: bool, now_ms: u64) -> Result<(), P::Error> {
        if is_connected {
            self.wifi_blink_attempts = 0;
            return self.set_indicator_state(Indicator::Wifi, true);
        }

        if self.wifi_blink_attempts < self.max_wifi_blink_attempts {
            self.blink_wifi_indicator(1, now_ms)?;
            self.wifi_blink_attempts += 1;
            Ok(())
        } else {
            self.set_indicator_state(Indicator::Wifi, false)
        }
    }

    /// Blink steps spent by the status policy since the last connected report.
    pub fn wifi_blink_attempts(&self) -> u8 {
        self.wifi_blink_attempts
    }

    /// Switch the pump motor bit and flush the register.
    pub fn set_motor_state(&mut self, on: bool) -> Result<(), P::Error> {
        let pin = self.map.motor_pin();
        self.register.set_pin_state(pin, on);
        self.register.write()?;
        log::info!("Motor pump set to {}", if on { "ON" } else { "OFF" });
        Ok(())
    }

    /// Current pump motor bit.
    pub fn motor_state(&self) -> bool {
        self.register.pin_state(self.map.motor_pin())
    }

    /// The indicator lookup table.
    pub fn map(&self) -> &IndicatorMap {
        &self.map
    }

    /// Borrow the shift register.
    pub fn register(&self) -> &ShiftRegister<P> {
        &self.register
    }

    /// Borrow the strip output.
    pub fn strip(&self) -> &S {
        &self.strip
    }
}
