//! Debounced push-button input.
//!
//! Buttons are wired active low with pull-ups: released reads HIGH, pressed
//! reads LOW.
//!
//! A [`Button`] carries two independent edge detectors:
//!
//! - [`Button::update`] debounces the raw level and commits it once it has
//!   been stable for the debounce window.
//! - [`Button::is_clicked`] compares a fresh raw sample against its own
//!   previous sample and reports HIGH→LOW edges. It does not consult the
//!   debounced level, so contact bounce that lasts longer than one poll can
//!   produce extra clicks.
//!
//! # Example
//!
//! ```rust
//! use garden_panel::Button;
//! use garden_panel::hal::MockInput;
//!
//! let mut button = Button::new(MockInput::new(), 12);
//! button.input_mut().press();
//!
//! assert!(button.is_clicked());
//! assert!(!button.is_clicked()); // still held, no new edge
//!
//! assert!(!button.update(0)); // raw change seen, not yet stable
//! assert!(button.update(80)); // stable for the debounce window
//! assert!(button.is_pressed());
//! ```

use crate::traits::DigitalInput;

/// Default debounce window in milliseconds.
pub const DEBOUNCE_MS: u32 = 80;

/// Debounced active-low button bound to one input pin.
pub struct Button<I: DigitalInput> {
    input: I,
    pin: u8,
    debounce_ms: u32,
    last_reading: bool,
    stable_level: bool,
    last_transition_ms: u64,
    last_click_sample: bool,
}

impl<I: DigitalInput> Button<I> {
    /// Bind a button to `input`. `pin` is only used for log messages.
    pub fn new(input: I, pin: u8) -> Self {
        Self::with_debounce(input, pin, DEBOUNCE_MS)
    }

    /// Bind a button with a custom debounce window.
    pub fn with_debounce(input: I, pin: u8, debounce_ms: u32) -> Self {
        log::info!("Button initialized on pin {}", pin);
        Self {
            input,
            pin,
            debounce_ms,
            last_reading: true,
            stable_level: true,
            last_transition_ms: 0,
            last_click_sample: true,
        }
    }

    /// Sample the pin and advance the debouncer. Call on every loop tick.
    ///
    /// Returns true when a new level was committed on this call.
    pub fn update(&mut self, now_ms: u64) -> bool {
        let reading = self.input.is_high();
        if reading != self.last_reading {
            self.last_reading = reading;
            self.last_transition_ms = now_ms;
        }

        let stable_for = now_ms.saturating_sub(self.last_transition_ms);
        if stable_for >= u64::from(self.debounce_ms) && reading != self.stable_level {
            self.stable_level = reading;
            return true;
        }
        false
    }

    /// Sample the pin and report a HIGH→LOW edge since the previous sample.
    pub fn is_clicked(&mut self) -> bool {
        let sample = self.input.is_high();
        let clicked = !sample && self.last_click_sample;
        self.last_click_sample = sample;
        if clicked {
            log::info!("Button clicked on pin {}", self.pin);
        }
        clicked
    }

    /// Debounced level reads as pressed (LOW).
    #[inline]
    pub fn is_pressed(&self) -> bool {
        !self.stable_level
    }

    /// Pin number this button was created with.
    #[inline]
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Borrow the underlying input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Mutably borrow the underlying input.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
