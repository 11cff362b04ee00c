//! RGB LED strip driven by three ESP32 LEDC PWM channels.
//!
//! The strip is switched through logic-level MOSFETs, one per colour:
//! - Blue → GPIO16
//! - Red → GPIO17
//! - Green → GPIO4

use crate::traits::{StripChannel, StripPwm};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

/// Three-channel strip PWM for ESP32.
///
/// Uses the LEDC peripheral at 5kHz with 8-bit resolution, so strip duty
/// values map one to one onto LEDC duty steps.
///
/// # Example
///
/// ```ignore
/// use garden_panel::hal::esp32::Esp32Strip;
/// use garden_panel::traits::{StripChannel, StripPwm};
///
/// let peripherals = Peripherals::take()?;
/// let mut strip = Esp32Strip::new(
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
///     peripherals.ledc.channel1,
///     peripherals.ledc.channel2,
///     peripherals.pins.gpio16,
///     peripherals.pins.gpio17,
///     peripherals.pins.gpio4,
/// )?;
///
/// strip.set_duty(StripChannel::Blue, 255)?;
/// ```
pub struct Esp32Strip<'d> {
    /// Channel drivers in [`StripChannel::ALL`] order
    channels: [LedcDriver<'d>; 3],
}

impl<'d> Esp32Strip<'d> {
    /// PWM frequency in Hz
    const PWM_FREQ_HZ: u32 = 5_000;

    /// PWM resolution (8-bit = 256 steps)
    const PWM_RESOLUTION: Resolution = Resolution::Bits8;

    /// Creates a new strip driver with every channel off.
    ///
    /// # Arguments
    ///
    /// * `timer` - LEDC timer shared by all three channels
    /// * `blue_channel`, `red_channel`, `green_channel` - LEDC channels
    /// * `blue_pin`, `red_pin`, `green_pin` - PWM-capable GPIOs
    ///
    /// # Errors
    ///
    /// Returns an error if PWM initialization fails.
    #[allow(clippy::too_many_arguments)]
    pub fn new<T, TI, BC, BCI, RC, RCI, GC, GCI, BP, BPI, RP, RPI, GP, GPI>(
        timer: T,
        blue_channel: BC,
        red_channel: RC,
        green_channel: GC,
        blue_pin: BP,
        red_pin: RP,
        green_pin: GP,
    ) -> Result<Self, esp_idf_hal::sys::EspError>
    where
        TI: esp_idf_hal::ledc::LedcTimer + 'd,
        T: Peripheral<P = TI> + 'd,
        BCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        BC: Peripheral<P = BCI> + 'd,
        RCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        RC: Peripheral<P = RCI> + 'd,
        GCI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        GC: Peripheral<P = GCI> + 'd,
        BPI: esp_idf_hal::gpio::OutputPin + 'd,
        BP: Peripheral<P = BPI> + 'd,
        RPI: esp_idf_hal::gpio::OutputPin + 'd,
        RP: Peripheral<P = RPI> + 'd,
        GPI: esp_idf_hal::gpio::OutputPin + 'd,
        GP: Peripheral<P = GPI> + 'd,
    {
        let timer_config = TimerConfig::default()
            .frequency(Self::PWM_FREQ_HZ.Hz())
            .resolution(Self::PWM_RESOLUTION);
        let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;

        let blue = LedcDriver::new(blue_channel, &timer_driver, blue_pin)?;
        let red = LedcDriver::new(red_channel, &timer_driver, red_pin)?;
        let green = LedcDriver::new(green_channel, &timer_driver, green_pin)?;

        let mut strip = Self {
            channels: [blue, red, green],
        };
        for channel in StripChannel::ALL {
            strip.set_duty(channel, 0)?;
        }

        Ok(strip)
    }
}

impl StripPwm for Esp32Strip<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn set_duty(&mut self, channel: StripChannel, duty: u8) -> Result<(), Self::Error> {
        let driver = &mut self.channels[channel.index()];
        let max = driver.get_max_duty();
        driver.set_duty(u32::from(duty) * max / 255)
    }
}
