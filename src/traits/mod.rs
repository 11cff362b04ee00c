//! Trait definitions for hardware and network abstraction.
//!
//! This module defines the abstractions that allow the panel to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Be driven by a controllable clock in tests
//!
//! # Submodules
//!
//! - `hardware`: Shift register lines, strip PWM, button inputs, clock, delay
//! - `network`: Station-mode WiFi link
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`ShiftRegisterPins`]: Bit-banged data/clock/latch lines
//! - [`StripPwm`]: 8-bit PWM on the three strip channels
//! - [`DigitalInput`]: Active-low push-buttons
//! - [`Clock`] and [`Delay`]: Time for `no_std` environments

pub mod hardware;
pub mod network;

pub use hardware::*;
pub use network::*;
