//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware and network traits,
//! enabling development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockShiftPins`] | [`ShiftRegisterPins`] | Simulates a 74HC595 and records latched bytes |
//! | [`MockStrip`] | [`StripPwm`] | Tracks channel duties |
//! | [`MockInput`] | [`DigitalInput`] | Settable pin level |
//! | [`MockWifi`] | [`WifiLink`] | Scripted association and teardown |
//! | [`MockClock`] | [`Clock`] + [`Delay`] | Controllable time; delays advance it |
//!
//! # Example
//!
//! ```rust
//! use garden_panel::hal::MockShiftPins;
//! use garden_panel::ShiftRegister;
//!
//! let mut register = ShiftRegister::new(MockShiftPins::new());
//! register.set_pin_state(0, true);
//! register.set_pin_state(7, true);
//! register.write().unwrap();
//!
//! assert_eq!(register.pins().outputs(), 0b1000_0001);
//! assert_eq!(register.pins().latched, vec![0b1000_0001]);
//! ```
//!
//! [`ShiftRegisterPins`]: crate::traits::ShiftRegisterPins
//! [`StripPwm`]: crate::traits::StripPwm
//! [`DigitalInput`]: crate::traits::DigitalInput
//! [`WifiLink`]: crate::traits::WifiLink
//! [`Clock`]: crate::traits::Clock
//! [`Delay`]: crate::traits::Delay

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;
use core::net::Ipv4Addr;

use crate::traits::{
    Clock, Delay, DigitalInput, LinkStatus, ShiftRegisterPins, StripChannel, StripPwm, WifiLink,
};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock shift register lines that behave like a 74HC595.
///
/// Data is sampled on every rising clock edge into an internal shift stage,
/// and the shift stage is copied to the outputs on every rising latch edge.
/// Each latched byte is recorded in [`latched`](Self::latched) together with
/// the number of clock pulses seen while the latch was low.
#[derive(Debug, Default)]
pub struct MockShiftPins {
    /// Every byte copied to the outputs, in order.
    pub latched: Vec<u8>,
    /// Clock pulses counted between each latch-low and latch-high.
    pub frame_bits: Vec<usize>,
    data: bool,
    clock: bool,
    latch: bool,
    shift_stage: u8,
    outputs: u8,
    pulses_in_frame: usize,
}

impl MockShiftPins {
    /// Creates mock lines with all outputs low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parallel output byte (Q7..Q0).
    pub fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Level of a single parallel output.
    pub fn output(&self, pin: u8) -> bool {
        (self.outputs >> (pin & 7)) & 1 == 1
    }

    /// Whether the latch line is currently high.
    pub fn latch_high(&self) -> bool {
        self.latch
    }

    /// Number of completed latch frames.
    pub fn write_count(&self) -> usize {
        self.latched.len()
    }
}

impl ShiftRegisterPins for MockShiftPins {
    type Error = ();

    fn set_data(&mut self, high: bool) -> Result<(), ()> {
        self.data = high;
        Ok(())
    }

    fn set_clock(&mut self, high: bool) -> Result<(), ()> {
        if high && !self.clock {
            self.shift_stage = (self.shift_stage << 1) | u8::from(self.data);
            self.pulses_in_frame += 1;
        }
        self.clock = high;
        Ok(())
    }

    fn set_latch(&mut self, high: bool) -> Result<(), ()> {
        if high && !self.latch {
            self.outputs = self.shift_stage;
            self.latched.push(self.shift_stage);
            self.frame_bits.push(self.pulses_in_frame);
        } else if !high {
            self.pulses_in_frame = 0;
        }
        self.latch = high;
        Ok(())
    }
}

/// Mock RGB strip for testing.
///
/// # Example
///
/// ```rust
/// use garden_panel::hal::MockStrip;
/// use garden_panel::traits::{StripChannel, StripPwm};
///
/// let mut strip = MockStrip::new();
/// strip.set_duty(StripChannel::Blue, 255).unwrap();
///
/// assert_eq!(strip.duties(), [255, 0, 0]);
/// assert_eq!(strip.call_count, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStrip {
    duties: [u8; 3],
    /// Number of times `set_duty` was called.
    pub call_count: usize,
}

impl MockStrip {
    /// Creates a new mock strip with all channels at zero duty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current duties in channel order (blue, red, green).
    pub fn duties(&self) -> [u8; 3] {
        self.duties
    }

    /// Current duty of one channel.
    pub fn duty(&self, channel: StripChannel) -> u8 {
        self.duties[channel.index()]
    }
}

impl StripPwm for MockStrip {
    type Error = ();

    fn set_duty(&mut self, channel: StripChannel, duty: u8) -> Result<(), ()> {
        self.duties[channel.index()] = duty;
        self.call_count += 1;
        Ok(())
    }
}

/// Mock push-button input.
///
/// Starts HIGH (released, since buttons are wired with pull-ups).
///
/// # Example
///
/// ```rust
/// use garden_panel::hal::MockInput;
/// use garden_panel::traits::DigitalInput;
///
/// let mut input = MockInput::new();
/// assert!(input.is_high());
///
/// input.press();
/// assert!(input.is_low());
/// assert_eq!(input.read_count, 2);
/// ```
#[derive(Debug)]
pub struct MockInput {
    high: bool,
    /// Number of times the level was sampled.
    pub read_count: usize,
}

impl MockInput {
    /// Creates a released (HIGH) input.
    pub fn new() -> Self {
        Self {
            high: true,
            read_count: 0,
        }
    }

    /// Pull the pin LOW (button pressed).
    pub fn press(&mut self) {
        self.high = false;
    }

    /// Let the pin return HIGH (button released).
    pub fn release(&mut self) {
        self.high = true;
    }

    /// Set the raw level directly.
    pub fn set_high(&mut self, high: bool) {
        self.high = high;
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalInput for MockInput {
    fn is_high(&mut self) -> bool {
        self.read_count += 1;
        self.high
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source. Blocking delays advance the clock
/// instantly and are recorded in [`delays`](Self::delays).
///
/// # Example
///
/// ```rust
/// use garden_panel::hal::MockClock;
/// use garden_panel::traits::{Clock, Delay};
///
/// let mut clock = MockClock::new();
/// clock.set(1000);
/// clock.delay_ms(250);
///
/// assert_eq!(clock.now_ms(), 1250);
/// assert_eq!(clock.delays, vec![250]);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
    /// Every delay requested, in order.
    pub delays: Vec<u32>,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }

    /// Sum of all requested delays.
    pub fn total_delay_ms(&self) -> u64 {
        self.delays.iter().map(|&d| u64::from(d)).sum()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

impl Delay for MockClock {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.current_ms += u64::from(ms);
    }
}

// ============================================================================
// Network Mocks
// ============================================================================

/// Mock WiFi link for testing.
///
/// By default an association started with `begin` stays in
/// [`LinkStatus::Associating`] until [`associate`](Self::associate) is called,
/// or until `connect_after_polls` status polls have happened.
///
/// # Example
///
/// ```rust
/// use garden_panel::hal::MockWifi;
/// use garden_panel::traits::{LinkStatus, WifiLink};
///
/// let mut wifi = MockWifi::new().connect_after_polls(2);
/// wifi.begin("garden", "secret").unwrap();
///
/// assert_eq!(wifi.status(), LinkStatus::Associating);
/// assert_eq!(wifi.status(), LinkStatus::Associating);
/// assert_eq!(wifi.status(), LinkStatus::Connected);
/// assert_eq!(wifi.last_ssid.as_deref(), Some("garden"));
/// ```
#[derive(Debug)]
pub struct MockWifi {
    /// Status returned by the next poll.
    pub status: LinkStatus,
    /// Number of `begin` calls.
    pub begin_calls: usize,
    /// SSID passed to the last `begin`.
    pub last_ssid: Option<String>,
    /// Number of `disconnect` calls.
    pub disconnect_calls: usize,
    /// Number of `radio_off` calls.
    pub radio_off_calls: usize,
    /// Number of status polls.
    pub status_polls: usize,
    /// Whether `disconnect` requests are accepted.
    pub accept_disconnect: bool,
    /// Whether an accepted `disconnect` is confirmed immediately.
    pub confirm_disconnect: bool,
    /// Address reported while connected.
    pub ip: Ipv4Addr,
    /// Make `begin` fail.
    pub fail_begin: bool,
    /// Make `radio_off` fail.
    pub fail_radio_off: bool,
    connect_after: Option<usize>,
    polls_since_begin: usize,
}

impl MockWifi {
    /// Creates an idle link that accepts and confirms disconnects.
    pub fn new() -> Self {
        Self {
            status: LinkStatus::Idle,
            begin_calls: 0,
            last_ssid: None,
            disconnect_calls: 0,
            radio_off_calls: 0,
            status_polls: 0,
            accept_disconnect: true,
            confirm_disconnect: true,
            ip: Ipv4Addr::new(192, 168, 1, 50),
            fail_begin: false,
            fail_radio_off: false,
            connect_after: None,
            polls_since_begin: 0,
        }
    }

    /// Associate automatically after `polls` status polls following `begin`.
    pub fn connect_after_polls(mut self, polls: usize) -> Self {
        self.connect_after = Some(polls);
        self
    }

    /// Never confirm a teardown (simulates a stuck disconnect).
    pub fn with_unconfirmed_disconnect(mut self) -> Self {
        self.confirm_disconnect = false;
        self
    }

    /// Reject every association request.
    pub fn with_failing_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    /// Fail every attempt to switch the radio off.
    pub fn with_failing_radio_off(mut self) -> Self {
        self.fail_radio_off = true;
        self
    }

    /// Complete the association now.
    pub fn associate(&mut self) {
        self.status = LinkStatus::Connected;
    }

    /// Simulate the access point dropping the station.
    pub fn drop_link(&mut self) {
        self.status = LinkStatus::Disconnected;
    }
}

impl Default for MockWifi {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiLink for MockWifi {
    type Error = ();

    fn begin(&mut self, ssid: &str, _password: &str) -> Result<(), ()> {
        self.begin_calls += 1;
        if self.fail_begin {
            return Err(());
        }
        self.last_ssid = Some(ssid.into());
        self.status = LinkStatus::Associating;
        self.polls_since_begin = 0;
        Ok(())
    }

    fn status(&mut self) -> LinkStatus {
        self.status_polls += 1;
        if self.status == LinkStatus::Associating {
            if let Some(after) = self.connect_after {
                if self.polls_since_begin >= after {
                    self.status = LinkStatus::Connected;
                }
            }
            self.polls_since_begin += 1;
        }
        self.status
    }

    fn disconnect(&mut self) -> Result<bool, ()> {
        self.disconnect_calls += 1;
        if !self.accept_disconnect {
            return Ok(false);
        }
        if self.confirm_disconnect {
            self.status = LinkStatus::Disconnected;
        }
        Ok(true)
    }

    fn radio_off(&mut self) -> Result<(), ()> {
        self.radio_off_calls += 1;
        if self.fail_radio_off {
            return Err(());
        }
        self.status = LinkStatus::Disconnected;
        Ok(())
    }

    fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.status.is_connected().then_some(self.ip)
    }
}

// ============================================================================
// Tests
// ============================================================================
