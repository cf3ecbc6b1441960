//! GPIO pin capabilities
//!
//! Pins are types, not values: every capability is an associated function
//! with no receiver, so a driver generic over a pin type compiles down to
//! the raw register accesses of that pin.
//!
//! The capabilities are split in two so that a stand-in pin can satisfy the
//! output side without pretending to have an input register.

/// Output-side capability of a GPIO line
///
/// Enough to drive a clock, data or chip-select line.
pub trait Line {
    /// Configure the line as an output
    fn configure_output();

    /// Configure the line as an input
    fn configure_input();

    /// Drive the line high (logic 1)
    fn set();

    /// Drive the line low (logic 0)
    fn clear();

    /// Drive the line to a specific state
    #[inline(always)]
    fn write(high: bool) {
        if high {
            Self::set();
        } else {
            Self::clear();
        }
    }
}

/// Full GPIO line: output side plus input sampling and toggling
pub trait IoLine: Line {
    /// Sample the input register bit
    ///
    /// Returns 0 or 1. Only meaningful while the line is configured as an
    /// input.
    fn read() -> u8;

    /// Flip the output register bit
    ///
    /// Returns the whole output register after the flip, not just the
    /// affected bit. Callers that depend on neighbouring bits rely on this.
    fn toggle() -> u8;

    /// Check if the line reads high
    #[inline(always)]
    fn is_high() -> bool {
        Self::read() != 0
    }

    /// Check if the line reads low
    #[inline(always)]
    fn is_low() -> bool {
        !Self::is_high()
    }
}
