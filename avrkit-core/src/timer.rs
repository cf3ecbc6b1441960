//! 8-bit timer/counter driver
//!
//! Runs the timer in normal mode (count up, wrap at 0xFF). The overflow
//! interrupt feeds [`Timekeeper`](crate::time::Timekeeper); the compare-A
//! interrupt is available for one-shot measurements.

use core::marker::PhantomData;

use avrkit_hal::{Bit, Prescaler};

use crate::register::Register;
use crate::time::TickSource;

/// Clock select field (CSn2:CSn0) in control register B
const CLOCK_SELECT_MASK: u8 = 0b111;

/// Register block of one 8-bit timer
pub trait TimerBlock {
    /// TCCRnA
    type ControlA: Register;
    /// TCCRnB
    type ControlB: Register;
    /// TCNTn
    type Count: Register;
    /// OCRnA
    type CompareA: Register;
    /// TIMSKn
    type InterruptMask: Register;
    /// TIFRn
    type InterruptFlags: Register;

    /// TOIEn / TOVn position
    const OVERFLOW: Bit;
    /// OCIEnA / OCFnA position
    const COMPARE_A: Bit;
}

/// 8-bit timer/counter
pub struct Timer8<B> {
    _block: PhantomData<fn() -> B>,
}

impl<B: TimerBlock> Timer8<B> {
    /// Normal mode, clocked through `prescaler`
    pub fn start(prescaler: Prescaler) {
        B::ControlA::assign(0);
        B::ControlB::assign(prescaler.clock_select());
    }

    /// Change the clock source, keeping the waveform bits
    pub fn set_prescaler(prescaler: Prescaler) {
        B::ControlB::modify(|value| (value & !CLOCK_SELECT_MASK) | prescaler.clock_select());
    }

    /// Disconnect the clock source
    pub fn stop() {
        B::ControlB::modify(|value| value & !CLOCK_SELECT_MASK);
    }

    /// Zero the counter and drop pending overflow/compare flags
    pub fn reset() {
        B::Count::assign(0);
        // Flags clear by writing a one
        B::InterruptFlags::assign(B::OVERFLOW.mask() | B::COMPARE_A.mask());
    }

    /// Current counter value
    #[inline(always)]
    pub fn count() -> u8 {
        B::Count::read()
    }

    pub fn enable_overflow_interrupt() {
        B::InterruptMask::set_bit(B::OVERFLOW);
    }

    pub fn disable_overflow_interrupt() {
        B::InterruptMask::clear_bit(B::OVERFLOW);
    }

    /// Fire the compare-A interrupt when the counter reaches `top`
    pub fn enable_compare_a_interrupt(top: u8) {
        B::CompareA::assign(top);
        B::InterruptFlags::assign(B::COMPARE_A.mask());
        B::InterruptMask::set_bit(B::COMPARE_A);
    }

    pub fn disable_compare_a_interrupt() {
        B::InterruptMask::clear_bit(B::COMPARE_A);
    }

    /// Whether an overflow happened that the handler has not serviced yet
    #[inline(always)]
    pub fn overflow_pending() -> bool {
        B::InterruptFlags::is_set(B::OVERFLOW)
    }
}

impl<B: TimerBlock> TickSource for Timer8<B> {
    #[inline(always)]
    fn count() -> u8 {
        Timer8::<B>::count()
    }

    #[inline(always)]
    fn overflow_pending() -> bool {
        Timer8::<B>::overflow_pending()
    }
}
