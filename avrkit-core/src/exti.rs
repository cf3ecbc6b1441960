//! External interrupt lines
//!
//! A line is a 2-bit sense-control field in a shared control register and
//! an enable bit in a shared mask register.
//!
//! ```text
//!            disable()
//!   DISABLED ◀────────── ENABLED(mode)
//!      │                   ▲      │
//!      └───────────────────┘      │ enable(mode')
//!          enable(mode)           └──────────▶ ENABLED(mode')
//! ```
//!
//! `enable` writes the mode field and the mask bit in two separate
//! register operations. Wrap the call in a critical section if the line
//! may fire in between.

use core::marker::PhantomData;

use avrkit_hal::{Bit, TriggerMode};

use crate::register::Register;

/// External interrupt line
///
/// `LSB` is the position of the low bit of the sense-control field (ISCn0),
/// `MASK_BIT` the enable bit (INTn).
pub struct ExtInt<Control, Mask, const LSB: u8, const MASK_BIT: u8> {
    _regs: PhantomData<fn() -> (Control, Mask)>,
}

impl<Control, Mask, const LSB: u8, const MASK_BIT: u8> ExtInt<Control, Mask, LSB, MASK_BIT>
where
    Control: Register,
    Mask: Register,
{
    const FIELD: u8 = {
        assert!(LSB <= 6, "sense-control field must fit in the register");
        TriggerMode::FIELD_MASK << LSB
    };
    const ENABLE: Bit = Bit::new(MASK_BIT);

    /// Select the trigger mode and unmask the line
    ///
    /// Calling it again with another mode rewrites the field; the mask bit
    /// is simply set again.
    pub fn enable(mode: TriggerMode) {
        Control::modify(|value| (value & !Self::FIELD) | (mode.bits() << LSB));
        Mask::set_bit(Self::ENABLE);
    }

    /// Mask the line
    ///
    /// The sense-control field keeps its last value.
    pub fn disable() {
        Mask::clear_bit(Self::ENABLE);
    }

    /// Whether the line is unmasked
    pub fn is_enabled() -> bool {
        Mask::is_set(Self::ENABLE)
    }

    /// Trigger mode currently in the sense-control field
    pub fn mode() -> TriggerMode {
        match TriggerMode::from_bits((Control::read() & Self::FIELD) >> LSB) {
            Some(mode) => mode,
            // The field is two bits wide, every value decodes
            None => TriggerMode::LowLevel,
        }
    }
}
