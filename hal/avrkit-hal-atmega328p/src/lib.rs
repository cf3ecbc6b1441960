//! ATmega328P board support for avrkit
//!
//! Binds the generic engines from `avrkit-core` to the ATmega328P register
//! map and provides the system clock the rest of a program reads.
//!
//! # Usage
//!
//! ```ignore
//! use avrkit_hal_atmega328p::{pins::arduino::D13, time, IoLine, Line};
//!
//! time::init();
//! D13::configure_output();
//! loop {
//!     D13::toggle();
//!     time::delay(500);
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Constants generated from `board.toml`
//! - [`regs`] - Register handles and bit positions
//! - [`pins`] - Port pins and Arduino Uno names
//! - [`peripherals`] - SPI, timer and external interrupt bindings
//! - [`time`] - System clock on Timer0
//!
//! Host builds compile everything except the interrupt vector and the
//! global interrupt switches, so register addresses and clock math can be
//! unit tested without hardware.

#![no_std]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]
#![deny(unsafe_code)]

/// Board constants generated by build.rs from `board.toml`
pub mod config {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

pub mod peripherals;
pub mod pins;
pub mod regs;
pub mod time;

pub use avrkit_core::{IoLine, Line, NullPin, SpiConfig, TriggerMode};
pub use peripherals::{Interrupt0, Interrupt1, Spi, SpiSs, Timer0};
