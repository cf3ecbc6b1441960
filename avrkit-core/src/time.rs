//! Interrupt-driven millisecond and microsecond clock
//!
//! A [`Timekeeper`] owns the counters advanced by the timer overflow
//! interrupt. The board declares one instance as a `static` and calls
//! [`Timekeeper::on_overflow`] from the overflow vector; foreground code
//! reads it through [`millis`](Timekeeper::millis) and
//! [`micros`](Timekeeper::micros).
//!
//! Each overflow adds the cycles it covered to an accumulator and moves
//! whole milliseconds from the accumulator to the millisecond counter. The
//! remainder stays in the accumulator, so the clock does not drift when an
//! overflow period is not a whole number of milliseconds (1.024 ms at
//! 16 MHz with a /64 prescaler).
//!
//! All counters are `u32` and wrap. Elapsed time must be computed with
//! `wrapping_sub`, which stays correct across a wrap for spans below 2^31.
//!
//! Every foreground access runs inside `critical_section::with`: the
//! counters are multi-byte and an 8-bit CPU cannot read them in one
//! instruction.

use core::cell::Cell;
use core::marker::PhantomData;

use avrkit_hal::timer::{TimeBase, TICKS_PER_OVERFLOW};
use critical_section::Mutex;

/// Free-running counter the clock interpolates between overflows with
pub trait TickSource {
    /// Current counter value
    fn count() -> u8;

    /// Whether an overflow is latched but not yet serviced
    fn overflow_pending() -> bool;
}

/// Counters owned by the overflow handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickState {
    /// Overflows seen since start
    pub overflows: u32,
    /// CPU cycles not yet converted into milliseconds
    pub cycles: u32,
    /// Milliseconds since start
    pub millis: u32,
}

impl TickState {
    /// All counters zero
    pub const ZERO: Self = Self {
        overflows: 0,
        cycles: 0,
        millis: 0,
    };

    /// Account for one overflow period
    fn advance(&mut self, base: &TimeBase) {
        self.overflows = self.overflows.wrapping_add(1);
        self.cycles += base.cycles_per_overflow;
        while self.cycles >= base.cycles_per_ms {
            self.cycles -= base.cycles_per_ms;
            self.millis = self.millis.wrapping_add(1);
        }
    }
}

/// Millisecond/microsecond clock fed by the overflows of `T`
pub struct Timekeeper<T> {
    base: TimeBase,
    state: Mutex<Cell<TickState>>,
    _source: PhantomData<fn() -> T>,
}

impl<T: TickSource> Timekeeper<T> {
    /// Clock at zero, counting with `base`
    pub const fn new(base: TimeBase) -> Self {
        Self {
            base,
            state: Mutex::new(Cell::new(TickState::ZERO)),
            _source: PhantomData,
        }
    }

    /// Cycle counts this clock works with
    pub const fn time_base(&self) -> &TimeBase {
        &self.base
    }

    /// Overflow handler body
    ///
    /// Call from the timer overflow vector and nowhere else.
    pub fn on_overflow(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.advance(&self.base);
            cell.set(state);
        });
    }

    /// Zero all counters
    ///
    /// Pair with resetting the timer hardware.
    pub fn reset(&self) {
        critical_section::with(|cs| self.state.borrow(cs).set(TickState::ZERO));
    }

    /// Consistent copy of all counters
    pub fn snapshot(&self) -> TickState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Milliseconds since start, wrapping
    pub fn millis(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow(cs).get().millis)
    }

    /// Microseconds since start, wrapping
    ///
    /// Interpolates with the live counter. An overflow that happened after
    /// interrupts were disabled but before the counter was sampled is still
    /// pending; it is accounted for here, unless the counter reads 0xFF,
    /// in which case it was sampled before the wrap.
    pub fn micros(&self) -> u32 {
        critical_section::with(|cs| {
            let state = self.state.borrow(cs).get();
            let ticks = T::count() as u32;
            let mut cycles = state.cycles + ticks * self.base.prescaler;
            if T::overflow_pending() && ticks < TICKS_PER_OVERFLOW - 1 {
                cycles += self.base.cycles_per_overflow;
            }
            state
                .millis
                .wrapping_mul(1_000)
                .wrapping_add(cycles / self.base.cycles_per_us)
        })
    }

    /// Busy-wait until more than `ms` milliseconds have passed
    ///
    /// Needs the overflow interrupt running; with interrupts disabled this
    /// never returns. Use [`CpuClock`](crate::delay::CpuClock) there.
    pub fn delay(&self, ms: u32) {
        let start = self.millis();
        while self.millis().wrapping_sub(start) <= ms {
            core::hint::spin_loop();
        }
    }

    /// Busy-wait for at least `us` microseconds
    pub fn delay_us(&self, us: u32) {
        let start = self.micros();
        while self.micros().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }

    #[cfg(test)]
    pub(crate) fn seed(&self, state: TickState) {
        critical_section::with(|cs| self.state.borrow(cs).set(state));
    }
}

impl<T: TickSource> embedded_hal::delay::DelayNs for &Timekeeper<T> {
    fn delay_ns(&mut self, ns: u32) {
        Timekeeper::delay_us(*self, ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        Timekeeper::delay_us(*self, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        Timekeeper::delay(*self, ms);
    }
}
