//! Edge case and boundary condition tests for the panel components

use garden_panel::{
    config::IndicatorConfig,
    hal::{MockClock, MockShiftPins, MockStrip, MockWifi},
    ConnectionState, Indicator, IndicatorDriver, NetworkManager, ShiftRegister, StripMode,
    WifiConfig,
};

fn driver(config: &IndicatorConfig) -> IndicatorDriver<MockShiftPins, MockStrip> {
    IndicatorDriver::new(MockShiftPins::new(), MockStrip::new(), config)
}

// ============================================================================
// Shift Register Boundaries
// ============================================================================

#[test]
fn every_write_is_a_full_byte() {
    let mut register = ShiftRegister::new(MockShiftPins::new());
    register.write().unwrap();
    register.set_pin_state(7, true);
    register.write().unwrap();
    register.write().unwrap();

    assert_eq!(register.pins().frame_bits, vec![8, 8, 8]);
    assert_eq!(register.pins().latched, vec![0x00, 0x80, 0x80]);
}

#[test]
fn highest_and_lowest_bit() {
    let mut register = ShiftRegister::new(MockShiftPins::new());
    register.set_pin_state(0, true);
    register.set_pin_state(7, true);
    register.write().unwrap();
    assert_eq!(register.pins().outputs(), 0b1000_0001);

    register.set_pin_state(0, false);
    register.set_pin_state(7, false);
    register.write().unwrap();
    assert_eq!(register.pins().outputs(), 0);
}

#[test]
fn out_of_range_pin_wraps() {
    let mut register = ShiftRegister::new(MockShiftPins::new());
    register.set_pin_state(9, true);
    assert!(register.pin_state(1));
    assert_eq!(register.value(), 0b10);
}

#[test]
fn clear_does_not_write() {
    let mut register = ShiftRegister::new(MockShiftPins::new());
    register.set_pin_state(4, true);
    register.write().unwrap();
    register.clear();

    assert_eq!(register.value(), 0);
    assert_eq!(register.pins().outputs(), 0b1_0000);
}

// ============================================================================
// Indicator Boundaries
// ============================================================================

#[test]
fn misconfigured_indicator_bit_aliases() {
    // Power on bit 9 lands on bit 1, shared with WiFi
    let mut leds = driver(&IndicatorConfig::default().with_bits([9, 1, 2, 3, 4]));
    leds.set_indicator_state(Indicator::Power, true).unwrap();
    assert!(leds.indicator_state(Indicator::Wifi));
    assert_eq!(leds.register().pins().outputs(), 0b10);
}

#[test]
fn every_indicator_reads_back() {
    let mut leds = driver(&IndicatorConfig::default());
    for indicator in Indicator::ALL {
        let pin = leds.map().pin(indicator);
        leds.set_indicator_state(indicator, true).unwrap();
        assert!(leds.register().pin_state(pin));
        leds.set_indicator_state(indicator, false).unwrap();
        assert!(!leds.register().pin_state(pin));
    }
}

#[test]
fn unknown_raw_strip_mode_keeps_previous() {
    let mut leds = driver(&IndicatorConfig::default());
    leds.set_strip_mode_raw(1).unwrap();
    leds.set_strip_mode_raw(u8::MAX).unwrap();

    assert_eq!(leds.strip_mode(), StripMode::ColorB);
    assert_eq!(leds.strip().duties(), [0, 255, 0]);
    assert_eq!(leds.strip().call_count, 3);
}

#[test]
fn blink_with_zero_count_keeps_running() {
    let mut leds = driver(&IndicatorConfig::default());
    for step in 1..=6u64 {
        leds.blink_wifi_indicator(0, step * 500).unwrap();
        assert_eq!(leds.blink_phase_count(), 0);
    }
    assert_eq!(leds.register().pins().write_count(), 6);
}

#[test]
fn blink_before_first_interval_is_silent() {
    let mut leds = driver(&IndicatorConfig::default());
    leds.blink_wifi_indicator(3, 0).unwrap();
    leds.blink_wifi_indicator(3, 499).unwrap();
    assert_eq!(leds.register().pins().write_count(), 0);
}

// ============================================================================
// Network Boundaries
// ============================================================================

#[test]
fn retry_not_before_interval_elapses() {
    let config = WifiConfig::default().with_ssid("greenhouse");
    let mut net = NetworkManager::new(MockWifi::new(), &config);
    let mut clock = MockClock::new();
    net.connect(0).unwrap();

    clock.set(5000);
    net.handle_connection_result(&mut clock).unwrap();
    assert_eq!(net.link().begin_calls, 1);
}

#[test]
fn zero_disconnect_timeout_checks_once() {
    let config = WifiConfig::default()
        .with_ssid("greenhouse")
        .with_disconnect_timeout_ms(0);
    let mut net = NetworkManager::new(MockWifi::new().with_unconfirmed_disconnect(), &config);
    let mut clock = MockClock::new();
    net.connect(0).unwrap();

    net.disconnect(&mut clock).unwrap();
    assert_eq!(clock.delays, vec![10]);
    assert_eq!(net.state(), ConnectionState::Idle);
}

#[test]
fn empty_ssid_still_attempts() {
    let mut net = NetworkManager::new(MockWifi::new(), &WifiConfig::default());
    net.connect(0).unwrap();
    assert_eq!(net.link().last_ssid.as_deref(), Some(""));
    assert!(net.is_connecting());
}
