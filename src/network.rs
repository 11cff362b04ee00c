//! Non-blocking WiFi connection tracking.
//!
//! [`NetworkManager`] owns the connection lifecycle (Idle, Connecting,
//! Connected) for one [`WifiLink`]. It is advanced once per control-loop
//! tick through [`NetworkManager::handle_connection_result`]; association
//! itself runs in the platform network stack.
//!
//! Two operations block the caller on purpose:
//!
//! - every tick in which the link is not associated ends with a
//!   `poll_throttle_ms` delay (250 ms by default)
//! - [`NetworkManager::disconnect`] polls for up to `disconnect_timeout_ms`
//!   (5000 ms by default) for a confirmed teardown
//!
//! # Example
//!
//! ```rust
//! use garden_panel::{ConnectionState, NetworkManager};
//! use garden_panel::config::WifiConfig;
//! use garden_panel::hal::{MockClock, MockWifi};
//!
//! let config = WifiConfig::default().with_ssid("greenhouse");
//! let mut net = NetworkManager::new(MockWifi::new(), &config);
//! let mut clock = MockClock::new();
//!
//! net.connect(0).unwrap();
//! assert_eq!(net.state(), ConnectionState::Connecting);
//!
//! net.link_mut().associate();
//! net.handle_connection_result(&mut clock).unwrap();
//! assert_eq!(net.state(), ConnectionState::Connected);
//! ```

use crate::config::{ShortString, WifiConfig};
use crate::traits::{Clock, Delay, LinkStatus, WifiLink};

/// Lifecycle of the wireless link as tracked by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConnectionState {
    /// No association requested.
    #[default]
    Idle,
    /// Association started, not yet confirmed.
    Connecting,
    /// Link up.
    Connected,
}

/// Connect/reconnect tracker for one WiFi link.
pub struct NetworkManager<L: WifiLink> {
    link: L,
    ssid: ShortString,
    password: ShortString,
    state: ConnectionState,
    connect_started_ms: u64,
    last_attempt_ms: u64,
    retry_interval_ms: u32,
    poll_throttle_ms: u32,
    disconnect_timeout_ms: u32,
    disconnect_poll_ms: u32,
}

impl<L: WifiLink> NetworkManager<L> {
    /// Create an idle manager. Nothing is sent to the link yet.
    pub fn new(link: L, config: &WifiConfig) -> Self {
        Self {
            link,
            ssid: config.ssid.clone(),
            password: config.password.clone(),
            state: ConnectionState::Idle,
            connect_started_ms: 0,
            last_attempt_ms: 0,
            retry_interval_ms: config.retry_interval_ms,
            poll_throttle_ms: config.poll_throttle_ms,
            disconnect_timeout_ms: config.disconnect_timeout_ms,
            disconnect_poll_ms: config.disconnect_poll_ms.max(1),
        }
    }

    /// Current lifecycle state, without polling the link.
    #[inline]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether an association is in progress.
    #[inline]
    pub fn is_connecting(&self) -> bool {
        self.state == ConnectionState::Connecting
    }

    /// Poll the link and report whether it is up.
    ///
    /// Querying updates the tracked state: a link that came up while idle is
    /// adopted as connected, and a connected link that dropped returns to
    /// idle. An association in progress is left for
    /// [`handle_connection_result`](Self::handle_connection_result) to settle.
    pub fn is_connected(&mut self) -> bool {
        let up = self.link.status().is_connected();
        match (self.state, up) {
            (ConnectionState::Idle, true) => self.state = ConnectionState::Connected,
            (ConnectionState::Connected, false) => self.state = ConnectionState::Idle,
            _ => {}
        }
        up
    }

    /// Neither connecting nor connected (polls the link).
    pub fn is_idle(&mut self) -> bool {
        !self.is_connecting() && !self.is_connected()
    }

    /// Start an association if none is running.
    pub fn connect(&mut self, now_ms: u64) -> Result<(), L::Error> {
        if self.is_idle() {
            self.begin(now_ms)?;
            log::info!("Attempting to connect to WiFi...");
        }
        Ok(())
    }

    fn begin(&mut self, now_ms: u64) -> Result<(), L::Error> {
        self.link.begin(self.ssid.as_str(), self.password.as_str())?;
        self.state = ConnectionState::Connecting;
        self.connect_started_ms = now_ms;
        self.last_attempt_ms = now_ms;
        Ok(())
    }

    /// Advance the lifecycle. Call once per control-loop tick.
    ///
    /// Blocks for the poll throttle whenever the link is not associated.
    pub fn handle_connection_result<C: Clock + Delay>(&mut self, clock: &mut C) -> Result<(), L::Error> {
        let now = clock.now_ms();
        let status = self.link.status();

        match self.state {
            ConnectionState::Connecting => {
                if status.is_connected() {
                    self.state = ConnectionState::Connected;
                    log::info!("Successfully connected to WiFi.");
                    log::info!("SSID: {}", self.ssid);
                    if let Some(ip) = self.link.ip_addr() {
                        log::info!("IP Address: {}", ip);
                    }
                    log::info!(
                        "Association took {} ms",
                        now.saturating_sub(self.connect_started_ms)
                    );
                } else if now.saturating_sub(self.last_attempt_ms) > u64::from(self.retry_interval_ms) {
                    log::info!("Attempting to reconnect to WiFi...");
                    self.begin(now)?;
                }
            }
            ConnectionState::Connected => {
                if !status.is_connected() {
                    log::info!("WiFi disconnected. Attempting to reconnect...");
                    self.state = ConnectionState::Idle;
                    self.connect(now)?;
                }
            }
            ConnectionState::Idle => {
                self.connect(now)?;
            }
        }

        if !self.link.status().is_connected() {
            log::info!(".");
            clock.delay_ms(self.poll_throttle_ms);
        }
        Ok(())
    }

    /// Tear the association down and switch the radio off.
    ///
    /// Waits up to the disconnect timeout for the link to confirm. A timeout
    /// is logged and the state is reset anyway. If the link refuses the
    /// request nothing changes.
    ///
    /// Once the request has been accepted (or has failed), the state always
    /// ends up [`ConnectionState::Idle`]. The first link error is returned
    /// after the teardown has finished.
    pub fn disconnect<C: Clock + Delay>(&mut self, clock: &mut C) -> Result<(), L::Error> {
        let request = match self.link.disconnect() {
            Ok(true) => Ok(()),
            Ok(false) => {
                log::warn!("WiFi disconnect request refused");
                return Ok(());
            }
            Err(e) => {
                log::error!("WiFi disconnect request failed");
                Err(e)
            }
        };

        if request.is_ok() {
            let start = clock.now_ms();
            let timeout = u64::from(self.disconnect_timeout_ms);
            while self.link.status() != LinkStatus::Disconnected
                && clock.now_ms().saturating_sub(start) <= timeout
            {
                clock.delay_ms(self.disconnect_poll_ms);
            }

            if self.link.status() == LinkStatus::Disconnected {
                log::info!("Disconnected from WiFi.");
            } else {
                log::warn!("Disconnection timeout.");
            }
        }

        let radio = self.link.radio_off();
        if radio.is_err() {
            log::error!("Failed to switch the WiFi radio off");
        }
        self.state = ConnectionState::Idle;
        request.and(radio)
    }

    /// When the current association attempt started.
    pub fn connect_started_ms(&self) -> u64 {
        self.connect_started_ms
    }

    /// When association was last (re)started.
    pub fn last_attempt_ms(&self) -> u64 {
        self.last_attempt_ms
    }

    /// Borrow the link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutably borrow the link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockClock, MockWifi};

    fn manager(wifi: MockWifi) -> NetworkManager<MockWifi> {
        let config = WifiConfig::default()
            .with_ssid("greenhouse")
            .with_password("tomato");
        NetworkManager::new(wifi, &config)
    }

    // =========================================================================
    // Connect Tests
    // =========================================================================

    #[test]
    fn starts_idle() {
        let mut net = manager(MockWifi::new());
        assert_eq!(net.state(), ConnectionState::Idle);
        assert!(net.is_idle());
        assert_eq!(net.link().begin_calls, 0);
    }

    #[test]
    fn connect_begins_association_once() {
        let mut net = manager(MockWifi::new());
        net.connect(1234).unwrap();
        net.connect(1300).unwrap();

        assert_eq!(net.state(), ConnectionState::Connecting);
        assert_eq!(net.link().begin_calls, 1);
        assert_eq!(net.link().last_ssid.as_deref(), Some("greenhouse"));
        assert_eq!(net.connect_started_ms(), 1234);
        assert_eq!(net.last_attempt_ms(), 1234);
    }

    #[test]
    fn connect_is_noop_when_link_already_up() {
        let mut wifi = MockWifi::new();
        wifi.associate();
        let mut net = manager(wifi);
        net.connect(0).unwrap();
        assert_eq!(net.link().begin_calls, 0);
        assert_eq!(net.state(), ConnectionState::Connected);
    }

    // =========================================================================
    // is_connected Side Effect Tests
    // =========================================================================

    #[test]
    fn is_connected_polls_every_call() {
        let mut net = manager(MockWifi::new());
        net.is_connected();
        net.is_connected();
        assert_eq!(net.link().status_polls, 2);
    }

    #[test]
    fn is_connected_drops_state_when_link_lost() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.link_mut().associate();
        net.handle_connection_result(&mut clock).unwrap();
        assert_eq!(net.state(), ConnectionState::Connected);

        net.link_mut().drop_link();
        assert!(!net.is_connected());
        assert_eq!(net.state(), ConnectionState::Idle);
    }

    #[test]
    fn is_connected_leaves_connecting_alone() {
        let mut net = manager(MockWifi::new());
        net.connect(0).unwrap();
        net.link_mut().associate();
        assert!(net.is_connected());
        assert_eq!(net.state(), ConnectionState::Connecting);
    }

    // =========================================================================
    // handle_connection_result Tests
    // =========================================================================

    #[test]
    fn idle_handle_starts_connection() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        clock.set(700);
        net.handle_connection_result(&mut clock).unwrap();

        assert_eq!(net.state(), ConnectionState::Connecting);
        assert_eq!(net.link().begin_calls, 1);
        assert_eq!(net.last_attempt_ms(), 700);
    }

    #[test]
    fn connecting_to_connected() {
        let mut net = manager(MockWifi::new().connect_after_polls(3));
        let mut clock = MockClock::new();
        net.connect(0).unwrap();

        let mut ticks = 0;
        while net.state() != ConnectionState::Connected {
            net.handle_connection_result(&mut clock).unwrap();
            ticks += 1;
            assert!(ticks < 10);
        }
        assert!(net.is_connected());
    }

    #[test]
    fn throttles_while_link_down() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.handle_connection_result(&mut clock).unwrap();
        assert_eq!(clock.delays, vec![250]);
        assert_eq!(clock.now_ms(), 250);
    }

    #[test]
    fn no_throttle_once_connected() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.link_mut().associate();
        net.handle_connection_result(&mut clock).unwrap();
        net.handle_connection_result(&mut clock).unwrap();
        assert!(clock.delays.is_empty());
    }

    #[test]
    fn retries_after_interval() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();

        // 250 ms per tick while down; 5000 ms not yet exceeded after 20 ticks
        for _ in 0..20 {
            net.handle_connection_result(&mut clock).unwrap();
        }
        assert_eq!(clock.now_ms(), 5000);
        assert_eq!(net.link().begin_calls, 1);

        clock.advance(1);
        net.handle_connection_result(&mut clock).unwrap();
        assert_eq!(net.link().begin_calls, 2);
        assert_eq!(net.last_attempt_ms(), 5001);
        assert_eq!(net.connect_started_ms(), 5001);
        assert_eq!(net.state(), ConnectionState::Connecting);
    }

    #[test]
    fn reconnects_after_drop() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.link_mut().associate();
        net.handle_connection_result(&mut clock).unwrap();

        net.link_mut().drop_link();
        clock.advance(100);
        net.handle_connection_result(&mut clock).unwrap();

        assert_eq!(net.state(), ConnectionState::Connecting);
        assert_eq!(net.link().begin_calls, 2);
        assert_eq!(net.last_attempt_ms(), 100);
    }

    // =========================================================================
    // Disconnect Tests
    // =========================================================================

    #[test]
    fn disconnect_confirmed() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.link_mut().associate();
        net.handle_connection_result(&mut clock).unwrap();

        net.disconnect(&mut clock).unwrap();
        assert_eq!(net.state(), ConnectionState::Idle);
        assert_eq!(net.link().radio_off_calls, 1);
        assert!(clock.delays.is_empty());
    }

    #[test]
    fn disconnect_timeout_still_resets() {
        let mut net = manager(MockWifi::new().with_unconfirmed_disconnect());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.link_mut().associate();
        net.handle_connection_result(&mut clock).unwrap();

        net.disconnect(&mut clock).unwrap();
        assert_eq!(net.state(), ConnectionState::Idle);
        assert_eq!(net.link().radio_off_calls, 1);
        assert!(clock.total_delay_ms() > 5000);
        assert!(clock.total_delay_ms() <= 5010);
    }

    #[test]
    fn disconnect_refused_keeps_state() {
        let mut wifi = MockWifi::new();
        wifi.accept_disconnect = false;
        let mut net = manager(wifi);
        let mut clock = MockClock::new();
        net.connect(0).unwrap();

        net.disconnect(&mut clock).unwrap();
        assert_eq!(net.state(), ConnectionState::Connecting);
        assert_eq!(net.link().radio_off_calls, 0);
    }

    #[test]
    fn disconnect_while_connecting_resets() {
        let mut net = manager(MockWifi::new());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();
        net.disconnect(&mut clock).unwrap();
        assert_eq!(net.state(), ConnectionState::Idle);

        // A fresh connect is possible again
        net.connect(10).unwrap();
        assert_eq!(net.link().begin_calls, 2);
    }

    #[test]
    fn radio_off_failure_still_resets() {
        let mut net = manager(MockWifi::new().with_failing_radio_off());
        let mut clock = MockClock::new();
        net.connect(0).unwrap();

        assert!(net.disconnect(&mut clock).is_err());
        assert_eq!(net.state(), ConnectionState::Idle);
        assert_eq!(net.link().radio_off_calls, 1);

        net.connect(20).unwrap();
        assert!(net.is_connecting());
        assert_eq!(net.link().begin_calls, 2);
    }

    #[test]
    fn failed_begin_stays_idle() {
        let mut net = manager(MockWifi::new().with_failing_begin());
        assert!(net.connect(300).is_err());
        assert_eq!(net.state(), ConnectionState::Idle);
        assert_eq!(net.last_attempt_ms(), 0);

        net.link_mut().fail_begin = false;
        net.connect(400).unwrap();
        assert!(net.is_connecting());
        assert_eq!(net.last_attempt_ms(), 400);
    }
}
