//! Register-level engines for 8-bit AVR microcontrollers
//!
//! Everything in this crate is a type: a register is a type bound to an
//! address, a pin is a type bound to three registers and a bit, an SPI bus
//! is a type bound to four pins and a register block. Operations are
//! associated functions, so after monomorphization they are the same
//! volatile loads and stores a hand-written register poke would produce.
//!
//! - [`register`] - I/O spaces and 8-bit register handles
//! - [`pin`] - GPIO lines and the [`NullPin`] stand-in
//! - [`exti`] - External interrupt lines
//! - [`timer`] - 8-bit timer/counter driver
//! - [`time`] - Interrupt-driven millisecond/microsecond clock
//! - [`delay`] - Calibrated busy loops that need no interrupts
//! - [`spi`] - Blocking SPI master engine
//!
//! Board crates supply the addresses and bit positions.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod exti;
pub mod pin;
pub mod register;
pub mod spi;
pub mod time;
pub mod timer;

#[cfg(test)]
mod sim;

pub use avrkit_hal::{Bit, IoLine, Line, SpiConfig, TriggerMode};
pub use delay::CpuClock;
pub use exti::ExtInt;
pub use pin::{NullPin, Pin};
pub use register::{IoSpace, Mmio, Reg, Register};
pub use spi::{Spi, SpiBlock};
pub use time::{TickSource, TickState, Timekeeper};
pub use timer::{Timer8, TimerBlock};
