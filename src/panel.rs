//! Control loop that ties buttons, indicators and the network together.
//!
//! This module provides [`Panel`], the central component of the firmware. It
//! owns the [`AppState`], the [`IndicatorDriver`], the [`NetworkManager`] and
//! the four panel buttons, and runs one cooperative tick at a time.
//!
//! # Overview
//!
//! Each [`Panel::tick`]:
//! 1. Advances every button debouncer
//! 2. Checks Power, Pump, Vegetable and Flower for a click, in that order,
//!    running each handler to completion before the next button is checked
//! 3. While powered, advances the network manager and refreshes the WiFi LED
//! 4. Blocks for the loop tick (10 ms by default)
//!
//! # Example
//!
//! ```rust
//! use garden_panel::{ButtonId, ConnectionState, Panel, PanelButtons};
//! use garden_panel::config::{Config, WifiConfig};
//! use garden_panel::hal::{MockClock, MockInput, MockShiftPins, MockStrip, MockWifi};
//!
//! let config = Config::default().with_wifi(WifiConfig::default().with_ssid("greenhouse"));
//! let buttons = PanelButtons::from_inputs(
//!     [MockInput::new(), MockInput::new(), MockInput::new(), MockInput::new()],
//!     [12, 13, 14, 15],
//!     config.timing.debounce_ms,
//! );
//! let mut panel = Panel::new(
//!     MockShiftPins::new(),
//!     MockStrip::new(),
//!     MockWifi::new(),
//!     buttons,
//!     MockClock::new(),
//!     config,
//! );
//! panel.setup().unwrap();
//!
//! panel.button_mut(ButtonId::Power).input_mut().press();
//! panel.tick().unwrap();
//!
//! assert!(panel.state().is_power_on());
//! assert_eq!(panel.network().state(), ConnectionState::Connecting);
//! ```

use crate::button::Button;
use crate::config::Config;
use crate::indicators::{Indicator, IndicatorDriver, StripMode};
use crate::logging;
use crate::network::NetworkManager;
use crate::state::AppState;
use crate::traits::{Clock, Delay, DigitalInput, ShiftRegisterPins, StripPwm, WifiLink};

/// The four panel buttons, in dispatch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonId {
    /// Power on/off.
    Power,
    /// Pump indicator toggle.
    Pump,
    /// Vegetable lighting.
    Vegetable,
    /// Flower lighting.
    Flower,
}

impl ButtonId {
    /// All buttons in the order clicks are dispatched.
    pub const ALL: [ButtonId; 4] = [
        ButtonId::Power,
        ButtonId::Pump,
        ButtonId::Vegetable,
        ButtonId::Flower,
    ];

    /// Short lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ButtonId::Power => "power",
            ButtonId::Pump => "pump",
            ButtonId::Vegetable => "vegetable",
            ButtonId::Flower => "flower",
        }
    }
}

/// The four debounced buttons of the panel.
pub struct PanelButtons<I: DigitalInput> {
    /// Power button.
    pub power: Button<I>,
    /// Pump button.
    pub pump: Button<I>,
    /// Vegetable button.
    pub vegetable: Button<I>,
    /// Flower button.
    pub flower: Button<I>,
}

impl<I: DigitalInput> PanelButtons<I> {
    /// Group four already-built buttons.
    pub fn new(power: Button<I>, pump: Button<I>, vegetable: Button<I>, flower: Button<I>) -> Self {
        Self {
            power,
            pump,
            vegetable,
            flower,
        }
    }

    /// Build all four buttons from inputs and pin numbers given in
    /// [`ButtonId::ALL`] order.
    pub fn from_inputs(inputs: [I; 4], pins: [u8; 4], debounce_ms: u32) -> Self {
        let [power, pump, vegetable, flower] = inputs;
        Self {
            power: Button::with_debounce(power, pins[0], debounce_ms),
            pump: Button::with_debounce(pump, pins[1], debounce_ms),
            vegetable: Button::with_debounce(vegetable, pins[2], debounce_ms),
            flower: Button::with_debounce(flower, pins[3], debounce_ms),
        }
    }

    /// Borrow one button.
    pub fn get(&self, id: ButtonId) -> &Button<I> {
        match id {
            ButtonId::Power => &self.power,
            ButtonId::Pump => &self.pump,
            ButtonId::Vegetable => &self.vegetable,
            ButtonId::Flower => &self.flower,
        }
    }

    /// Mutably borrow one button.
    pub fn get_mut(&mut self, id: ButtonId) -> &mut Button<I> {
        match id {
            ButtonId::Power => &mut self.power,
            ButtonId::Pump => &mut self.pump,
            ButtonId::Vegetable => &mut self.vegetable,
            ButtonId::Flower => &mut self.flower,
        }
    }

    /// Advance every debouncer.
    pub fn update_all(&mut self, now_ms: u64) {
        for id in ButtonId::ALL {
            self.get_mut(id).update(now_ms);
        }
    }
}

/// Garden panel controller.
///
/// # Type Parameters
///
/// - `P`: shift register lines ([`ShiftRegisterPins`])
/// - `S`: LED strip PWM ([`StripPwm`])
/// - `L`: WiFi link ([`WifiLink`])
/// - `I`: button inputs ([`DigitalInput`])
/// - `C`: time source and blocking delay ([`Clock`] + [`Delay`])
///
/// All hardware operations share one error type, that of the shift register.
pub struct Panel<P, S, L, I, C>
where
    P: ShiftRegisterPins,
    S: StripPwm<Error = P::Error>,
    L: WifiLink<Error = P::Error>,
    I: DigitalInput,
    C: Clock + Delay,
{
    state: AppState,
    indicators: IndicatorDriver<P, S>,
    network: NetworkManager<L>,
    buttons: PanelButtons<I>,
    clock: C,
    config: Config,
}

impl<P, S, L, I, C> Panel<P, S, L, I, C>
where
    P: ShiftRegisterPins,
    S: StripPwm<Error = P::Error>,
    L: WifiLink<Error = P::Error>,
    I: DigitalInput,
    C: Clock + Delay,
{
    /// Assemble a panel. Call [`setup`](Self::setup) before the first tick.
    pub fn new(pins: P, strip: S, link: L, buttons: PanelButtons<I>, clock: C, config: Config) -> Self {
        Self {
            state: AppState::new(),
            indicators: IndicatorDriver::new(pins, strip, &config.indicators),
            network: NetworkManager::new(link, &config.wifi),
            buttons,
            clock,
            config,
        }
    }

    /// One-time initialisation: everything off.
    pub fn setup(&mut self) -> Result<(), P::Error> {
        logging::set_debug(self.config.device.debug_logging);

        self.indicators.tune_multiple_indicators(&[
            (Indicator::Power, false),
            (Indicator::Wifi, false),
            (Indicator::Pump, false),
            (Indicator::Vegetable, false),
            (Indicator::Flower, false),
        ])?;
        self.indicators.set_strip_mode(StripMode::Off)?;
        self.indicators.set_motor_state(false)?;
        self.state = AppState::new();

        log::info!("{} initialized and ready.", self.config.device.name);
        Ok(())
    }

    /// Run one control-loop iteration.
    pub fn tick(&mut self) -> Result<(), P::Error> {
        let now = self.clock.now_ms();
        self.buttons.update_all(now);

        for id in ButtonId::ALL {
            if self.buttons.get_mut(id).is_clicked() {
                self.handle_click(id)?;
            }
        }

        if self.state.is_power_on() {
            if self.config.wifi.enabled {
                self.network.handle_connection_result(&mut self.clock)?;
            }
            self.update_wifi_indicator()?;
        }

        self.clock.delay_ms(self.config.timing.loop_tick_ms);
        Ok(())
    }

    /// Dispatch a click to its handler.
    pub fn handle_click(&mut self, id: ButtonId) -> Result<(), P::Error> {
        match id {
            ButtonId::Power => self.handle_power_click(),
            ButtonId::Pump => self.handle_pump_click(),
            ButtonId::Vegetable => self.handle_vegetable_click(),
            ButtonId::Flower => self.handle_flower_click(),
        }
    }

    /// Power on (only while the network is idle) or tear everything down.
    ///
    /// A failing link never leaves the panel half switched: power-on lights
    /// its LEDs before connecting, and power-off clears every output before
    /// the disconnect error is returned.
    pub fn handle_power_click(&mut self) -> Result<(), P::Error> {
        if !self.state.is_power_on() {
            if !self.network.is_idle() {
                return Ok(());
            }
            self.state.set_power(true);
            log::info!("System powered up.");

            self.indicators
                .tune_multiple_indicators(&[(Indicator::Power, true), (Indicator::Wifi, true)])?;
            self.state.set_wifi(true);

            // A failed start leaves the manager idle; the next tick retries
            if self.config.wifi.enabled {
                let now = self.clock.now_ms();
                self.network.connect(now)?;
            }
        } else {
            self.state.set_power(false);
            log::info!("System powered down.");

            let teardown = self.network.disconnect(&mut self.clock);
            self.state = AppState::new();
            self.indicators.tune_multiple_indicators(&[
                (Indicator::Power, false),
                (Indicator::Wifi, false),
                (Indicator::Pump, false),
                (Indicator::Vegetable, false),
                (Indicator::Flower, false),
            ])?;
            self.indicators.set_strip_mode(StripMode::Off)?;
            self.indicators.set_motor_state(false)?;
            teardown?;
        }
        Ok(())
    }

    /// Toggle the pump LED while powered.
    ///
    /// Only the register bit changes; [`AppState`] is left as it was.
    pub fn handle_pump_click(&mut self) -> Result<(), P::Error> {
        if self.state.is_power_on() {
            self.indicators.toggle_indicator_state(Indicator::Pump)?;
        }
        Ok(())
    }

    /// Vegetable lighting on/off, exclusive with flower.
    pub fn handle_vegetable_click(&mut self) -> Result<(), P::Error> {
        if self.state.is_power_on() {
            self.toggle_exclusive(Indicator::Vegetable, Indicator::Flower, StripMode::ColorA)?;
        } else if self.state.is_vegetable_on() {
            self.state.set_vegetable(false);
        }
        log::info!("Vegetable Button State: {}", self.state.is_vegetable_on());
        Ok(())
    }

    /// Flower lighting on/off, exclusive with vegetable.
    pub fn handle_flower_click(&mut self) -> Result<(), P::Error> {
        if self.state.is_power_on() {
            self.toggle_exclusive(Indicator::Flower, Indicator::Vegetable, StripMode::ColorB)?;
        } else if self.state.is_flower_on() {
            self.state.set_flower(false);
        }
        log::info!("Flower Button State: {}", self.state.is_flower_on());
        Ok(())
    }

    /// Switch `current` on (and `other` off, strip to `mode`), or switch
    /// `current` off together with `other` and the strip.
    fn toggle_exclusive(&mut self, current: Indicator, other: Indicator, mode: StripMode) -> Result<(), P::Error> {
        if !self.state.indicator_state(current) {
            self.indicators.set_indicator_state(current, true)?;
            self.indicators.set_indicator_state(other, false)?;
            self.state.set_indicator_state(current, true);
            self.state.set_indicator_state(other, false);
            self.indicators.set_strip_mode(mode)?;
            self.state.set_strip(true);
        } else {
            self.indicators.set_indicator_state(current, false)?;
            self.state.set_indicator_state(current, false);
            if self.state.indicator_state(other) {
                self.indicators.set_indicator_state(other, false)?;
                self.state.set_indicator_state(other, false);
            }
            self.indicators.set_strip_mode(StripMode::Off)?;
            self.state.set_strip(false);
        }
        Ok(())
    }

    /// Refresh the WiFi LED from the connection state.
    ///
    /// Blinks while connecting and is solid once connected. In any other
    /// state this clears the pump LED, not the WiFi LED.
    pub fn update_wifi_indicator(&mut self) -> Result<(), P::Error> {
        let now = self.clock.now_ms();
        if self.network.is_connecting() {
            self.indicators
                .blink_wifi_indicator(self.config.indicators.wifi_blink_count, now)
        } else if self.network.is_connected() {
            self.indicators.set_indicator_state(Indicator::Wifi, true)
        } else {
            self.indicators.set_indicator_state(Indicator::Pump, false)
        }
    }

    /// Run or stop the pump motor. Ignored while powered off.
    pub fn run_pump_motor(&mut self, on: bool) -> Result<(), P::Error> {
        if !self.state.is_power_on() {
            log::warn!("Pump motor request ignored while powered off");
            return Ok(());
        }
        self.indicators.set_motor_state(on)?;
        self.state.set_motor(on);
        Ok(())
    }

    /// Application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Indicator driver.
    pub fn indicators(&self) -> &IndicatorDriver<P, S> {
        &self.indicators
    }

    /// Network manager.
    pub fn network(&self) -> &NetworkManager<L> {
        &self.network
    }

    /// Mutable network manager.
    pub fn network_mut(&mut self) -> &mut NetworkManager<L> {
        &mut self.network
    }

    /// Mutably borrow one button.
    pub fn button_mut(&mut self, id: ButtonId) -> &mut Button<I> {
        self.buttons.get_mut(id)
    }

    /// Clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WifiConfig;
    use crate::hal::{MockClock, MockInput, MockShiftPins, MockStrip, MockWifi};
    use crate::network::ConnectionState;

    type TestPanel = Panel<MockShiftPins, MockStrip, MockWifi, MockInput, MockClock>;

    fn panel_with(config: Config) -> TestPanel {
        panel_with_link(MockWifi::new(), config)
    }

    fn panel_with_link(link: MockWifi, config: Config) -> TestPanel {
        let buttons = PanelButtons::from_inputs(
            [MockInput::new(), MockInput::new(), MockInput::new(), MockInput::new()],
            [12, 13, 14, 15],
            config.timing.debounce_ms,
        );
        let mut panel = Panel::new(
            MockShiftPins::new(),
            MockStrip::new(),
            link,
            buttons,
            MockClock::new(),
            config,
        );
        panel.setup().unwrap();
        panel
    }

    fn panel() -> TestPanel {
        panel_with(Config::default().with_wifi(WifiConfig::default().with_ssid("greenhouse")))
    }

    fn outputs(panel: &TestPanel) -> u8 {
        panel.indicators().register().pins().outputs()
    }

    // =========================================================================
    // Setup Tests
    // =========================================================================

    #[test]
    fn setup_clears_everything() {
        let p = panel();
        assert_eq!(*p.state(), AppState::new());
        assert_eq!(outputs(&p), 0);
        assert_eq!(p.indicators().strip().duties(), [0, 0, 0]);
        assert_eq!(p.indicators().strip_mode(), StripMode::Off);
        assert_eq!(p.network().state(), ConnectionState::Idle);
    }

    #[test]
    fn tick_blocks_for_loop_tick_while_off() {
        let mut p = panel();
        p.tick().unwrap();
        assert_eq!(p.clock().delays, vec![10]);
    }

    // =========================================================================
    // Power Handler Tests
    // =========================================================================

    #[test]
    fn power_on_lights_power_and_wifi() {
        let mut p = panel();
        p.handle_power_click().unwrap();

        assert!(p.state().is_power_on());
        assert!(p.state().is_wifi_on());
        assert!(p.indicators().indicator_state(Indicator::Power));
        assert!(p.indicators().indicator_state(Indicator::Wifi));
        assert_eq!(p.network().state(), ConnectionState::Connecting);
        assert_eq!(p.network().link().begin_calls, 1);
    }

    #[test]
    fn power_on_refused_while_link_busy() {
        let mut p = panel();
        p.network_mut().connect(0).unwrap();
        p.handle_power_click().unwrap();
        assert!(!p.state().is_power_on());
        assert_eq!(outputs(&p), 0);
    }

    #[test]
    fn power_off_tears_down() {
        let mut p = panel();
        p.handle_power_click().unwrap();
        p.handle_vegetable_click().unwrap();
        p.run_pump_motor(true).unwrap();
        p.handle_power_click().unwrap();

        assert_eq!(*p.state(), AppState::new());
        assert_eq!(outputs(&p), 0);
        assert_eq!(p.indicators().strip_mode(), StripMode::Off);
        assert_eq!(p.network().state(), ConnectionState::Idle);
        assert_eq!(p.network().link().radio_off_calls, 1);
    }

    #[test]
    fn power_on_with_failing_link_still_lights() {
        let mut p = panel_with_link(
            MockWifi::new().with_failing_begin(),
            Config::default().with_wifi(WifiConfig::default().with_ssid("greenhouse")),
        );
        assert!(p.handle_power_click().is_err());

        assert!(p.state().is_power_on());
        assert!(p.state().is_wifi_on());
        assert!(p.indicators().indicator_state(Indicator::Power));
        assert!(p.indicators().indicator_state(Indicator::Wifi));
        assert_eq!(p.network().state(), ConnectionState::Idle);
    }

    #[test]
    fn power_off_with_failing_radio_clears_everything() {
        let mut p = panel_with_link(
            MockWifi::new().with_failing_radio_off(),
            Config::default().with_wifi(WifiConfig::default().with_ssid("greenhouse")),
        );
        p.handle_power_click().unwrap();
        p.handle_vegetable_click().unwrap();
        p.run_pump_motor(true).unwrap();

        assert!(p.handle_power_click().is_err());
        assert_eq!(*p.state(), AppState::new());
        assert_eq!(outputs(&p), 0);
        assert_eq!(p.indicators().strip_mode(), StripMode::Off);
        assert!(!p.indicators().motor_state());
        assert_eq!(p.network().state(), ConnectionState::Idle);

        p.handle_power_click().unwrap();
        assert!(p.state().is_power_on());
        assert_eq!(p.network().state(), ConnectionState::Connecting);
    }

    #[test]
    fn wifi_disabled_powers_on_without_connecting() {
        let mut p = panel_with(Config::default().with_wifi(WifiConfig::default().with_enabled(false)));
        p.handle_power_click().unwrap();
        assert!(p.state().is_power_on());
        assert_eq!(p.network().link().begin_calls, 0);
        assert_eq!(p.network().state(), ConnectionState::Idle);
    }

    // =========================================================================
    // Pump Handler Tests
    // =========================================================================

    #[test]
    fn pump_ignored_while_off() {
        let mut p = panel();
        p.handle_pump_click().unwrap();
        assert!(!p.indicators().indicator_state(Indicator::Pump));
    }

    #[test]
    fn pump_toggles_bit_without_state() {
        let mut p = panel();
        p.handle_power_click().unwrap();

        p.handle_pump_click().unwrap();
        assert!(p.indicators().indicator_state(Indicator::Pump));
        assert!(!p.state().is_pump_on());

        p.handle_pump_click().unwrap();
        assert!(!p.indicators().indicator_state(Indicator::Pump));
    }

    // =========================================================================
    // Vegetable / Flower Handler Tests
    // =========================================================================

    #[test]
    fn vegetable_then_flower_then_flower() {
        let mut p = panel();
        p.handle_power_click().unwrap();

        p.handle_vegetable_click().unwrap();
        assert!(p.state().is_vegetable_on());
        assert!(!p.state().is_flower_on());
        assert!(p.state().is_strip_on());
        assert_eq!(p.indicators().strip_mode(), StripMode::ColorA);

        p.handle_flower_click().unwrap();
        assert!(p.state().is_flower_on());
        assert!(!p.state().is_vegetable_on());
        assert!(!p.indicators().indicator_state(Indicator::Vegetable));
        assert_eq!(p.indicators().strip_mode(), StripMode::ColorB);

        p.handle_flower_click().unwrap();
        assert!(!p.state().is_flower_on());
        assert!(!p.indicators().indicator_state(Indicator::Flower));
        assert!(!p.state().is_strip_on());
        assert_eq!(p.indicators().strip_mode(), StripMode::Off);
    }

    #[test]
    fn lighting_ignored_while_off() {
        let mut p = panel();
        p.handle_vegetable_click().unwrap();
        p.handle_flower_click().unwrap();
        assert!(!p.state().is_vegetable_on());
        assert!(!p.state().is_flower_on());
        assert_eq!(p.indicators().strip().call_count, 3);
    }

    // =========================================================================
    // Loop Tail Tests
    // =========================================================================

    #[test]
    fn connected_link_sets_wifi_solid() {
        let mut p = panel();
        p.handle_power_click().unwrap();
        p.network_mut().link_mut().associate();
        p.tick().unwrap();

        assert_eq!(p.network().state(), ConnectionState::Connected);
        p.tick().unwrap();
        assert!(p.indicators().indicator_state(Indicator::Wifi));
    }

    #[test]
    fn idle_network_tail_clears_pump_led() {
        let mut p = panel_with(Config::default().with_wifi(WifiConfig::default().with_enabled(false)));
        p.handle_power_click().unwrap();
        p.handle_pump_click().unwrap();
        assert!(p.indicators().indicator_state(Indicator::Pump));

        p.tick().unwrap();
        assert!(!p.indicators().indicator_state(Indicator::Pump));
        assert!(p.indicators().indicator_state(Indicator::Wifi));
    }

    // =========================================================================
    // Pump Motor Tests
    // =========================================================================

    #[test]
    fn motor_runs_only_while_powered() {
        let mut p = panel();
        p.run_pump_motor(true).unwrap();
        assert!(!p.state().is_motor_on());
        assert!(!p.indicators().motor_state());

        p.handle_power_click().unwrap();
        p.run_pump_motor(true).unwrap();
        assert!(p.state().is_motor_on());
        assert!(p.indicators().motor_state());

        p.run_pump_motor(false).unwrap();
        assert!(!p.state().is_motor_on());
    }

    // =========================================================================
    // Button Grouping Tests
    // =========================================================================

    #[test]
    fn buttons_keep_their_pins() {
        let p = panel();
        for (id, pin) in ButtonId::ALL.into_iter().zip([12, 13, 14, 15]) {
            assert_eq!(p.buttons.get(id).pin(), pin);
        }
    }
}
