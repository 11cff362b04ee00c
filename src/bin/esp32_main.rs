//! ESP32 garden panel firmware.
//!
//! This is the main entry point for the physical panel. It runs the
//! 10 ms control loop that:
//! - Polls the four front-panel buttons
//! - Drives the indicator LEDs and pump motor through the 74HC595
//! - Sets the grow light colour on the RGB strip
//! - Keeps the WiFi link up while the panel is powered
//!
//! # Build
//!
//! ```bash
//! WIFI_SSID=MyNetwork WIFI_PASSWORD=secret \
//!     cargo build --release --features wifi --bin esp32_main
//!
//! # Flash and monitor
//! espflash flash --monitor target/xtensa-esp32-espidf/release/esp32_main
//! ```

use esp_idf_hal::gpio::{IOPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::log::EspLogger;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use garden_panel::hal::esp32::{pins, Esp32Button, Esp32Clock, Esp32Strip, Esp32Wifi, GpioShiftPins};
use garden_panel::{Config, Panel, PanelButtons, WifiConfig};

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default().with_wifi(
        WifiConfig::default()
            .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
            .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
    );
    if !config.wifi.is_configured() {
        log::warn!("WiFi not configured (set WIFI_SSID/WIFI_PASSWORD at build time)");
    }

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Shift Register (74HC595)
    // =========================================================================
    let shift_pins = GpioShiftPins::new(
        peripherals.pins.gpio23.downgrade_output(),
        peripherals.pins.gpio18.downgrade_output(),
        peripherals.pins.gpio5.downgrade_output(),
    )?;
    log::info!(
        "Shift register initialized (DS={}, SH_CP={}, ST_CP={})",
        pins::SHIFT_DATA,
        pins::SHIFT_CLOCK,
        pins::SHIFT_LATCH
    );

    // =========================================================================
    // LED Strip (LEDC PWM)
    // =========================================================================
    let strip = Esp32Strip::new(
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        peripherals.ledc.channel1,
        peripherals.ledc.channel2,
        peripherals.pins.gpio16,
        peripherals.pins.gpio17,
        peripherals.pins.gpio4,
    )?;
    log::info!(
        "LED strip initialized (B={}, R={}, G={})",
        pins::STRIP_BLUE,
        pins::STRIP_RED,
        pins::STRIP_GREEN
    );

    // =========================================================================
    // Buttons
    // =========================================================================
    let buttons = PanelButtons::from_inputs(
        [
            Esp32Button::new(peripherals.pins.gpio32.downgrade())?,
            Esp32Button::new(peripherals.pins.gpio33.downgrade())?,
            Esp32Button::new(peripherals.pins.gpio25.downgrade())?,
            Esp32Button::new(peripherals.pins.gpio26.downgrade())?,
        ],
        pins::BUTTONS,
        config.timing.debounce_ms,
    );

    // =========================================================================
    // WiFi (radio stays off until the panel is powered on)
    // =========================================================================
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let wifi = Esp32Wifi::new(peripherals.modem, sysloop, Some(nvs))?;

    // =========================================================================
    // Panel
    // =========================================================================
    let mut panel = Panel::new(shift_pins, strip, wifi, buttons, Esp32Clock::new(), config);
    panel.setup()?;

    loop {
        if let Err(e) = panel.tick() {
            log::error!("Control loop error: {}", e);
        }
    }
}
