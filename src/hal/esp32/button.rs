//! Push-button input on an ESP32 GPIO.

use crate::traits::DigitalInput;
use esp_idf_hal::gpio::{AnyIOPin, Input, PinDriver, Pull};

/// Momentary switch to GND read through the internal pull-up.
///
/// All four panel buttons share this type so they fit in one
/// [`PanelButtons`](crate::PanelButtons).
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::IOPin;
/// use garden_panel::hal::esp32::Esp32Button;
/// use garden_panel::traits::DigitalInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut power = Esp32Button::new(peripherals.pins.gpio32.downgrade())?;
/// let pressed = power.is_low();
/// ```
pub struct Esp32Button<'d> {
    pin: PinDriver<'d, AnyIOPin, Input>,
}

impl<'d> Esp32Button<'d> {
    /// Configure `pin` as an input with pull-up.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: AnyIOPin) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        Ok(Self { pin })
    }
}

impl DigitalInput for Esp32Button<'_> {
    #[inline]
    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}
