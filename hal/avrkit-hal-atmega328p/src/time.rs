//! System clock
//!
//! Timer0 runs free at the prescaler from `board.toml`; its overflow
//! interrupt advances [`CLOCK`]. Call [`init`] once at startup, then use
//! [`millis`], [`micros`], [`delay`] and [`delay_us`] anywhere.
//!
//! [`constant_delay_us`] and [`constant_delay_ms`] spin on the CPU clock
//! alone and keep working with interrupts disabled.

use avrkit_core::{CpuClock, Timekeeper};
use avrkit_hal::TimerConfig;

use crate::config::{CPU_HZ, TIMER0_PRESCALER};
use crate::peripherals::Timer0;

/// Timer0 clocking derived from the board constants
pub const TIMER_CONFIG: TimerConfig = match TimerConfig::new(CPU_HZ, TIMER0_PRESCALER) {
    Ok(config) => config,
    Err(_) => panic!("board.cpu_hz must be a non-zero multiple of 1 MHz"),
};

/// Busy loops calibrated for this board
pub type Cpu = CpuClock<CPU_HZ>;

/// The clock advanced by the Timer0 overflow interrupt
pub static CLOCK: Timekeeper<Timer0> = Timekeeper::new(TIMER_CONFIG.time_base());

/// Milliseconds since [`init`], wrapping
pub fn millis() -> u32 {
    CLOCK.millis()
}

/// Microseconds since [`init`], wrapping
pub fn micros() -> u32 {
    CLOCK.micros()
}

/// Wait more than `ms` milliseconds; needs interrupts enabled
pub fn delay(ms: u32) {
    CLOCK.delay(ms);
}

/// Wait at least `us` microseconds; needs interrupts enabled
pub fn delay_us(us: u32) {
    CLOCK.delay_us(us);
}

/// Spin for `us` microseconds without the timer
#[inline(always)]
pub fn constant_delay_us(us: u32) {
    Cpu::constant_delay_us(us);
}

/// Spin for `ms` milliseconds without the timer
pub fn constant_delay_ms(ms: u32) {
    Cpu::constant_delay_ms(ms);
}

/// Start Timer0 and the clock
///
/// Enables global interrupts afterwards unless `enable_interrupts` is
/// false in `board.toml`.
#[cfg(target_arch = "avr")]
pub fn init() {
    critical_section::with(|_| {
        Timer0::start(TIMER0_PRESCALER);
        Timer0::reset();
        CLOCK.reset();
        Timer0::enable_overflow_interrupt();
    });

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "{}: clock on Timer0, {} Hz /{}",
        crate::config::BOARD_NAME,
        CPU_HZ,
        TIMER0_PRESCALER.divisor()
    );

    if crate::config::ENABLE_INTERRUPTS_ON_INIT {
        interrupts();
    }
}

/// Set the global interrupt flag
#[cfg(target_arch = "avr")]
#[allow(unsafe_code)]
pub fn interrupts() {
    // SAFETY: every shared counter in this crate lives in a critical_section::Mutex
    unsafe { avr_device::interrupt::enable() }
}

/// Clear the global interrupt flag
#[cfg(target_arch = "avr")]
pub fn no_interrupts() {
    avr_device::interrupt::disable();
}

#[cfg(target_arch = "avr")]
#[allow(unsafe_code)]
mod vectors {
    #[avr_device::interrupt(atmega328p)]
    fn TIMER0_OVF() {
        super::CLOCK.on_overflow();
    }
}
