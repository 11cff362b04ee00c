//! Non-blocking WiFi station link for ESP32.
//!
//! Unlike a blocking connect, [`Esp32Wifi::begin`](crate::traits::WifiLink::begin)
//! only hands the credentials to the ESP-IDF driver and returns. Association
//! and DHCP progress are observed by polling
//! [`status`](crate::traits::WifiLink::status) from the control loop, so button
//! input keeps being serviced while the link comes up.
//!
//! # Example
//!
//! ```ignore
//! use garden_panel::hal::esp32::Esp32Wifi;
//! use garden_panel::traits::WifiLink;
//!
//! let mut wifi = Esp32Wifi::new(modem, sysloop, Some(nvs))?;
//! wifi.begin("MyNetwork", "secret123")?;
//! // poll wifi.status() until LinkStatus::Connected
//! ```

use crate::traits::{LinkStatus, WifiLink};
use esp_idf_hal::modem::Modem;
use esp_idf_hal::sys::EspError;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{ClientConfiguration, Configuration, EspWifi};
use std::net::Ipv4Addr;

/// Station-mode WiFi link for ESP32.
pub struct Esp32Wifi<'a> {
    wifi: EspWifi<'a>,
    associating: bool,
}

impl<'a> Esp32Wifi<'a> {
    /// Create the WiFi driver. The radio stays off until the first `begin`.
    ///
    /// # Errors
    ///
    /// Returns an error if WiFi driver initialization fails.
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
    ) -> Result<Self, EspError> {
        let wifi = EspWifi::new(modem, sysloop, nvs)?;
        Ok(Self {
            wifi,
            associating: false,
        })
    }

    /// Get the underlying WiFi driver for advanced operations.
    pub fn driver(&self) -> &EspWifi<'a> {
        &self.wifi
    }

    /// Get mutable access to the underlying WiFi driver.
    pub fn driver_mut(&mut self) -> &mut EspWifi<'a> {
        &mut self.wifi
    }

    fn is_up(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false) && self.wifi.sta_netif().is_up().unwrap_or(false)
    }
}

impl WifiLink for Esp32Wifi<'_> {
    type Error = EspError;

    fn begin(&mut self, ssid: &str, password: &str) -> Result<(), EspError> {
        // Create heapless strings for esp-idf
        let mut ssid_buf: heapless::String<32> = heapless::String::new();
        let _ = ssid_buf.push_str(ssid);

        let mut pass_buf: heapless::String<64> = heapless::String::new();
        let _ = pass_buf.push_str(password);

        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: ssid_buf,
                password: pass_buf,
                ..Default::default()
            }))?;

        if !self.wifi.is_started()? {
            self.wifi.start()?;
        }
        self.wifi.connect()?;
        self.associating = true;
        Ok(())
    }

    fn status(&mut self) -> LinkStatus {
        if self.is_up() {
            self.associating = false;
            LinkStatus::Connected
        } else if self.associating {
            LinkStatus::Associating
        } else if self.wifi.is_started().unwrap_or(false) {
            LinkStatus::Disconnected
        } else {
            LinkStatus::Idle
        }
    }

    fn disconnect(&mut self) -> Result<bool, EspError> {
        if !self.wifi.is_started()? {
            return Ok(false);
        }
        self.associating = false;
        self.wifi.disconnect()?;
        Ok(true)
    }

    fn radio_off(&mut self) -> Result<(), EspError> {
        self.associating = false;
        if self.wifi.is_started()? {
            self.wifi.stop()?;
        }
        Ok(())
    }

    fn ip_addr(&self) -> Option<Ipv4Addr> {
        if !self.is_up() {
            return None;
        }
        self.wifi.sta_netif().get_ip_info().ok().map(|info| info.ip)
    }
}
