//! Wireless link abstraction.
//!
//! The platform network stack owns association, DHCP and the radio. The
//! panel only needs to start an association, poll its status and tear it
//! down again, so that is all [`WifiLink`] exposes.

use core::net::Ipv4Addr;

/// Status reported by the underlying link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LinkStatus {
    /// Radio on, no association requested.
    #[default]
    Idle,
    /// Association or DHCP still in progress.
    Associating,
    /// Associated with an IP address.
    Connected,
    /// Association was attempted and failed.
    Failed,
    /// Confirmed disconnected (after a teardown or a drop).
    Disconnected,
}

impl LinkStatus {
    /// Returns true only for [`LinkStatus::Connected`].
    #[inline]
    pub const fn is_connected(self) -> bool {
        matches!(self, LinkStatus::Connected)
    }
}

/// Station-mode WiFi link.
///
/// # Implementation Notes
///
/// - [`begin`](Self::begin) must not block waiting for association
/// - [`status`](Self::status) is polled on every loop tick and should be cheap
/// - [`disconnect`](Self::disconnect) returns `Ok(false)` when the stack
///   refuses the request (e.g. the radio was never started)
pub trait WifiLink {
    /// Error type for link operations.
    type Error;

    /// Start (or restart) association with the given network.
    fn begin(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error>;

    /// Poll the current link status.
    fn status(&mut self) -> LinkStatus;

    /// Request teardown of the association. Returns whether it was accepted.
    fn disconnect(&mut self) -> Result<bool, Self::Error>;

    /// Switch the radio off.
    fn radio_off(&mut self) -> Result<(), Self::Error>;

    /// Address assigned by DHCP, if any.
    fn ip_addr(&self) -> Option<Ipv4Addr>;
}
