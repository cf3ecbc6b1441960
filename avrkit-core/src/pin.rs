//! GPIO lines
//!
//! A [`Pin`] is the (direction, output, input) register triple of one port
//! plus a bit position. [`NullPin`] is the stand-in for a line that is
//! structurally required but not wired: it accepts configure/set/clear and
//! does nothing, and it does not offer read or toggle at all.
//!
//! ```compile_fail
//! use avrkit_core::{IoLine, NullPin};
//!
//! // A null pin has no input register to sample
//! let _ = <NullPin as IoLine>::read();
//! ```

use core::convert::Infallible;
use core::marker::PhantomData;

use avrkit_hal::{Bit, IoLine, Line};

use crate::register::Register;

/// One GPIO line
///
/// `BIT` is checked when the pin is first used: a value above 7 fails the
/// build.
pub struct Pin<Ddr, Port, Input, const BIT: u8> {
    _regs: PhantomData<fn() -> (Ddr, Port, Input)>,
}

impl<Ddr, Port, Input, const BIT: u8> Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    const LINE: Bit = Bit::new(BIT);

    /// Value handle for APIs that want `&mut self` (embedded-hal)
    pub const fn new() -> Self {
        Self {
            _regs: PhantomData,
        }
    }

    /// Bit position of this line within its port
    pub const fn bit() -> Bit {
        Self::LINE
    }
}

impl<Ddr, Port, Input, const BIT: u8> Default for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Ddr, Port, Input, const BIT: u8> Line for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    #[inline(always)]
    fn configure_output() {
        Ddr::set_bit(Self::LINE);
    }

    #[inline(always)]
    fn configure_input() {
        Ddr::clear_bit(Self::LINE);
    }

    #[inline(always)]
    fn set() {
        Port::set_bit(Self::LINE);
    }

    #[inline(always)]
    fn clear() {
        Port::clear_bit(Self::LINE);
    }
}

impl<Ddr, Port, Input, const BIT: u8> IoLine for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    #[inline(always)]
    fn read() -> u8 {
        (Input::read() & Self::LINE.mask() != 0) as u8
    }

    #[inline(always)]
    fn toggle() -> u8 {
        let value = Port::read() ^ Self::LINE.mask();
        Port::assign(value);
        value
    }
}

impl<Ddr, Port, Input, const BIT: u8> embedded_hal::digital::ErrorType
    for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    type Error = Infallible;
}

impl<Ddr, Port, Input, const BIT: u8> embedded_hal::digital::OutputPin
    for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        <Self as Line>::clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        <Self as Line>::set();
        Ok(())
    }
}

impl<Ddr, Port, Input, const BIT: u8> embedded_hal::digital::StatefulOutputPin
    for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Port::is_set(Self::LINE))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Port::is_set(Self::LINE))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        <Self as IoLine>::toggle();
        Ok(())
    }
}

impl<Ddr, Port, Input, const BIT: u8> embedded_hal::digital::InputPin
    for Pin<Ddr, Port, Input, BIT>
where
    Ddr: Register,
    Port: Register,
    Input: Register,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(<Self as IoLine>::is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(<Self as IoLine>::is_low())
    }
}

/// Line with no hardware behind it
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPin;

impl Line for NullPin {
    #[inline(always)]
    fn configure_output() {}

    #[inline(always)]
    fn configure_input() {}

    #[inline(always)]
    fn set() {}

    #[inline(always)]
    fn clear() {}
}

impl embedded_hal::digital::ErrorType for NullPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
