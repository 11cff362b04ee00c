//! In-memory model of a 74HC595-style serial-to-parallel shift register.
//!
//! [`ShiftRegister`] keeps one byte where bit *i* is the level of output
//! Q*i*. Changing bits has no hardware effect until [`ShiftRegister::write`]
//! shifts the whole byte out, MSB first, framed by latch-low and latch-high.
//!
//! # Example
//!
//! ```rust
//! use garden_panel::ShiftRegister;
//! use garden_panel::hal::MockShiftPins;
//!
//! let mut register = ShiftRegister::new(MockShiftPins::new());
//! register.set_pin_state(3, true);
//! assert!(register.pin_state(3));
//! assert_eq!(register.pins().outputs(), 0); // nothing latched yet
//!
//! register.write().unwrap();
//! assert_eq!(register.pins().outputs(), 0b0000_1000);
//! ```

use crate::traits::ShiftRegisterPins;

/// Number of parallel outputs on one register.
pub const REGISTER_WIDTH: u8 = 8;

/// Bit mask for `pin`. Out-of-range pins wrap (`pin & 7`) instead of panicking.
#[inline]
fn mask(pin: u8) -> u8 {
    1u8.wrapping_shl(u32::from(pin))
}

/// Shift register driver with an in-memory output byte.
///
/// Not thread-safe; the single control loop is the only caller.
pub struct ShiftRegister<P: ShiftRegisterPins> {
    pins: P,
    value: u8,
}

impl<P: ShiftRegisterPins> ShiftRegister<P> {
    /// Create a register model with all bits cleared. Nothing is written.
    pub fn new(pins: P) -> Self {
        Self { pins, value: 0 }
    }

    /// Set or clear one bit in memory.
    pub fn set_pin_state(&mut self, pin: u8, state: bool) {
        if state {
            self.value |= mask(pin);
        } else {
            self.value &= !mask(pin);
        }
    }

    /// Read one bit from memory (not from the device).
    pub fn pin_state(&self, pin: u8) -> bool {
        self.value & mask(pin) != 0
    }

    /// The whole in-memory byte.
    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Clear every bit in memory without writing.
    pub fn clear(&mut self) {
        self.value = 0;
    }

    /// Transmit the full byte and latch it to the outputs.
    ///
    /// Always shifts exactly [`REGISTER_WIDTH`] bits, however many changed.
    pub fn write(&mut self) -> Result<(), P::Error> {
        self.pins.set_latch(false)?;
        for bit in (0..REGISTER_WIDTH).rev() {
            self.pins.set_data(self.value & (1 << bit) != 0)?;
            self.pins.pulse_clock()?;
        }
        self.pins.set_latch(true)
    }

    /// Borrow the underlying lines.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutably borrow the underlying lines.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }
}
