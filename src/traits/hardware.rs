//! Hardware abstraction traits for the shift register, LED strip, buttons and time.
//!
//! This module defines the hardware interfaces that allow the panel logic to
//! run on the ESP32 as well as on a desktop with mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`ShiftRegisterPins`] | Data/clock/latch lines of a 74HC595-style register |
//! | [`StripPwm`] | Three PWM channels of the RGB strip |
//! | [`DigitalInput`] | Raw level of a push-button pin |
//! | [`Clock`] | Monotonic millisecond time source |
//! | [`Delay`] | Blocking delay used by the control loop |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use garden_panel::traits::{StripChannel, StripPwm};
//! use garden_panel::hal::MockStrip;
//!
//! let mut strip = MockStrip::new();
//! strip.set_duty(StripChannel::Red, 255).unwrap();
//! assert_eq!(strip.duties(), [0, 255, 0]);
//! ```

/// Output lines of a serial-in/parallel-out shift register.
///
/// The register samples `data` on the rising edge of `clock` and copies its
/// shift stage to the outputs on the rising edge of `latch`.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use garden_panel::traits::ShiftRegisterPins;
///
/// struct MyPins { /* gpio handles */ }
///
/// impl ShiftRegisterPins for MyPins {
///     type Error = ();
///
///     fn set_data(&mut self, high: bool) -> Result<(), ()> { Ok(()) }
///     fn set_clock(&mut self, high: bool) -> Result<(), ()> { Ok(()) }
///     fn set_latch(&mut self, high: bool) -> Result<(), ()> { Ok(()) }
/// }
/// ```
pub trait ShiftRegisterPins {
    /// Error type for pin operations.
    type Error;

    /// Drive the serial data line (DS).
    fn set_data(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drive the shift clock line (SH_CP).
    fn set_clock(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drive the storage/latch clock line (ST_CP).
    fn set_latch(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Emit one full clock pulse (rising then falling edge).
    fn pulse_clock(&mut self) -> Result<(), Self::Error> {
        self.set_clock(true)?;
        self.set_clock(false)
    }
}

/// PWM channel of the tri-colour LED strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StripChannel {
    /// Channel 0, driven full by [`StripMode::ColorA`](crate::StripMode::ColorA).
    Blue,
    /// Channel 1, driven full by [`StripMode::ColorB`](crate::StripMode::ColorB).
    Red,
    /// Channel 2, currently unused by any strip mode.
    Green,
}

impl StripChannel {
    /// All channels in hardware channel order.
    pub const ALL: [StripChannel; 3] = [StripChannel::Blue, StripChannel::Red, StripChannel::Green];

    /// Hardware channel index (0..=2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            StripChannel::Blue => 0,
            StripChannel::Red => 1,
            StripChannel::Green => 2,
        }
    }
}

/// RGB strip PWM output with 8-bit duty resolution.
pub trait StripPwm {
    /// Error type for PWM operations.
    type Error;

    /// Set the duty cycle of one channel (0 = off, 255 = full).
    fn set_duty(&mut self, channel: StripChannel, duty: u8) -> Result<(), Self::Error>;
}

/// Raw digital input, e.g. a push-button with pull-up.
///
/// Buttons on this panel are active low: a pressed button reads LOW.
pub trait DigitalInput {
    /// Returns true if the pin currently reads HIGH.
    fn is_high(&mut self) -> bool;

    /// Returns true if the pin currently reads LOW.
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debouncing, blinking and
/// connection retry timing.
///
/// # Example
///
/// ```rust
/// use garden_panel::traits::Clock;
/// use garden_panel::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Blocking delay.
///
/// The control loop is single-threaded, so every delay stalls button
/// polling for its whole span.
pub trait Delay {
    /// Block for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
