//! I/O spaces and 8-bit register handles
//!
//! A register handle is a zero-sized type naming one address. All handles
//! for the same address observe and mutate the same memory cell.
//!
//! Bit operations are read-modify-write sequences. They are not atomic: if
//! an interrupt handler writes the same register, the foreground access must
//! run inside a critical section.

use core::marker::PhantomData;

use avrkit_hal::Bit;

/// Byte-addressed space that registers live in
///
/// [`Mmio`] is the real data space of the chip. Tests substitute a simulated
/// space that models peripheral side effects.
pub trait IoSpace {
    /// Read one byte
    fn read(addr: usize) -> u8;

    /// Write one byte
    fn write(addr: usize, value: u8);
}

/// Memory-mapped I/O through volatile pointer access
///
/// Addresses are data-space addresses (I/O address + 0x20 for the low I/O
/// window). Board crates are responsible for only naming addresses from the
/// chip's register file.
#[derive(Debug, Clone, Copy)]
pub struct Mmio;

#[allow(unsafe_code)]
impl IoSpace for Mmio {
    #[inline(always)]
    fn read(addr: usize) -> u8 {
        // SAFETY: addr is a register address from the board definition. The
        // register file is never aliased by a Rust object.
        unsafe { core::ptr::read_volatile(addr as *const u8) }
    }

    #[inline(always)]
    fn write(addr: usize, value: u8) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
    }
}

/// Operations on one 8-bit register
pub trait Register {
    /// Address of the register inside its space
    const ADDRESS: usize;

    /// Current contents
    fn read() -> u8;

    /// Overwrite the whole register
    fn assign(value: u8);

    /// Read, transform and write back
    #[inline(always)]
    fn modify(f: impl FnOnce(u8) -> u8) {
        Self::assign(f(Self::read()));
    }

    /// `reg |= 1 << bit`
    #[inline(always)]
    fn set_bit(bit: Bit) {
        Self::modify(|value| value | bit.mask());
    }

    /// `reg &= !(1 << bit)`
    #[inline(always)]
    fn clear_bit(bit: Bit) {
        Self::modify(|value| value & !bit.mask());
    }

    /// Check a single bit
    #[inline(always)]
    fn is_set(bit: Bit) -> bool {
        Self::read() & bit.mask() != 0
    }
}

/// Register handle at `ADDR` in space `S`
pub struct Reg<S, const ADDR: usize> {
    _space: PhantomData<fn() -> S>,
}

impl<S: IoSpace, const ADDR: usize> Register for Reg<S, ADDR> {
    const ADDRESS: usize = ADDR;

    #[inline(always)]
    fn read() -> u8 {
        S::read(ADDR)
    }

    #[inline(always)]
    fn assign(value: u8) {
        S::write(ADDR, value);
    }
}
