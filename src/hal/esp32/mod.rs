//! ESP32 hardware abstraction layer for the garden panel.
//!
//! This module provides hardware implementations for an ESP32 DevKit board
//! driving the panel front: four push-buttons, a 74HC595 shift register for
//! the indicator LEDs and pump motor, and a common-cathode RGB grow light.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-WROOM-32 DevKit
//! - **Indicators**: 74HC595 shift register (bit-banged over three GPIOs)
//! - **Strip**: RGB LED strip on three LEDC PWM channels
//! - **Buttons**: four momentary switches to GND, internal pull-ups
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod button;
mod clock;
mod shift;
mod strip;

pub use button::Esp32Button;
pub use clock::Esp32Clock;
pub use shift::GpioShiftPins;
pub use strip::Esp32Strip;

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

/// Pin assignments for the ESP32 DevKit panel board.
pub mod pins {
    // =========================================================================
    // Buttons (active low)
    // =========================================================================

    /// Power button
    pub const POWER_BUTTON: u8 = 32;

    /// Pump button
    pub const PUMP_BUTTON: u8 = 33;

    /// Vegetable lighting button
    pub const VEGETABLE_BUTTON: u8 = 25;

    /// Flower lighting button
    pub const FLOWER_BUTTON: u8 = 26;

    // =========================================================================
    // Shift Register (74HC595)
    // =========================================================================

    /// Serial data (DS)
    pub const SHIFT_DATA: u8 = 23;

    /// Shift clock (SH_CP)
    pub const SHIFT_CLOCK: u8 = 18;

    /// Storage/latch clock (ST_CP)
    pub const SHIFT_LATCH: u8 = 5;

    // =========================================================================
    // LED Strip (LEDC PWM)
    // =========================================================================

    /// Blue channel
    pub const STRIP_BLUE: u8 = 16;

    /// Red channel
    pub const STRIP_RED: u8 = 17;

    /// Green channel
    pub const STRIP_GREEN: u8 = 4;

    /// Button pins in dispatch order (power, pump, vegetable, flower).
    pub const BUTTONS: [u8; 4] = [POWER_BUTTON, PUMP_BUTTON, VEGETABLE_BUTTON, FLOWER_BUTTON];
}
