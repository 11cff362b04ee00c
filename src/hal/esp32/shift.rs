//! Bit-banged 74HC595 lines on three ESP32 GPIOs.
//!
//! # Wiring
//!
//! - DS (pin 14) → GPIO23
//! - SH_CP (pin 11) → GPIO18
//! - ST_CP (pin 12) → GPIO5
//! - MR tied high, OE tied low

use crate::traits::ShiftRegisterPins;
use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};

fn level(high: bool) -> Level {
    if high {
        Level::High
    } else {
        Level::Low
    }
}

/// Data, shift clock and latch outputs of a 74HC595.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::OutputPin;
/// use garden_panel::hal::esp32::GpioShiftPins;
/// use garden_panel::ShiftRegister;
///
/// let peripherals = Peripherals::take()?;
/// let pins = GpioShiftPins::new(
///     peripherals.pins.gpio23.downgrade_output(),
///     peripherals.pins.gpio18.downgrade_output(),
///     peripherals.pins.gpio5.downgrade_output(),
/// )?;
/// let mut register = ShiftRegister::new(pins);
/// register.set_pin_state(0, true);
/// register.write()?;
/// ```
pub struct GpioShiftPins<'d> {
    data: PinDriver<'d, AnyOutputPin, Output>,
    clock: PinDriver<'d, AnyOutputPin, Output>,
    latch: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> GpioShiftPins<'d> {
    /// Configure the three lines as outputs, all driven low.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        data: AnyOutputPin,
        clock: AnyOutputPin,
        latch: AnyOutputPin,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut data = PinDriver::output(data)?;
        let mut clock = PinDriver::output(clock)?;
        let mut latch = PinDriver::output(latch)?;

        data.set_low()?;
        clock.set_low()?;
        latch.set_low()?;

        Ok(Self { data, clock, latch })
    }
}

impl ShiftRegisterPins for GpioShiftPins<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn set_data(&mut self, high: bool) -> Result<(), Self::Error> {
        self.data.set_level(level(high))
    }

    fn set_clock(&mut self, high: bool) -> Result<(), Self::Error> {
        self.clock.set_level(level(high))
    }

    fn set_latch(&mut self, high: bool) -> Result<(), Self::Error> {
        self.latch.set_level(level(high))
    }
}
