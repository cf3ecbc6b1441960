//! Calibrated busy loops
//!
//! [`CpuClock`] converts a duration into CPU cycles from the clock
//! frequency known at compile time and burns exactly that many cycles with
//! `avr_device::asm::delay_cycles`. It does not read any counter, so it
//! works with interrupts disabled, where [`Timekeeper::delay`] would hang.
//! Interrupts that fire during the wait lengthen it.
//!
//! Host builds replace the cycle burner with a plain countdown so the
//! conversion can be unit tested; its duration means nothing.
//!
//! [`Timekeeper::delay`]: crate::time::Timekeeper::delay

/// Busy-wait delays for a CPU running at `HZ`
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuClock<const HZ: u32>;

impl<const HZ: u32> CpuClock<HZ> {
    /// CPU cycles per microsecond
    pub const CYCLES_PER_US: u32 = {
        assert!(HZ >= 1_000_000, "constant delays need at least 1 MHz");
        HZ / 1_000_000
    };

    /// CPU cycles covering `us` microseconds, saturating
    pub const fn cycles_for_us(us: u32) -> u32 {
        us.saturating_mul(Self::CYCLES_PER_US)
    }

    /// Busy-wait `us` microseconds
    #[inline(always)]
    pub fn constant_delay_us(us: u32) {
        delay_cycles(Self::cycles_for_us(us));
    }

    /// Busy-wait `ms` milliseconds
    pub fn constant_delay_ms(ms: u32) {
        // One millisecond per call keeps the cycle count far from u32::MAX
        for _ in 0..ms {
            delay_cycles(Self::cycles_for_us(1_000));
        }
    }
}

#[cfg(target_arch = "avr")]
#[inline(always)]
fn delay_cycles(cycles: u32) {
    avr_device::asm::delay_cycles(cycles);
}

#[cfg(not(target_arch = "avr"))]
fn delay_cycles(cycles: u32) {
    #[cfg(test)]
    tests::record(cycles);

    let mut remaining = cycles;
    while core::hint::black_box(remaining) != 0 {
        remaining -= 1;
    }
}

impl<const HZ: u32> embedded_hal::delay::DelayNs for CpuClock<HZ> {
    fn delay_ns(&mut self, ns: u32) {
        Self::constant_delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        Self::constant_delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        Self::constant_delay_ms(ms);
    }
}
