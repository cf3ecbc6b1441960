//! avrkit Hardware Abstraction Layer
//!
//! This crate defines the chip-independent vocabulary shared by the generic
//! register engine (`avrkit-core`) and the board definitions
//! (`avrkit-hal-atmega328p`, ...). Nothing here touches hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avrkit-hal-atmega328p (board aliases)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  avrkit-core  │──────▶│  avrkit-hal   │
//! │   (engines)   │       │ (this crate)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`gpio::Line`], [`gpio::IoLine`] - Pin capabilities
//! - [`bit::Bit`] - Bit positions inside an 8-bit register
//! - [`interrupt::TriggerMode`] - External interrupt sense control
//! - [`spi::SpiConfig`] - SPI master configuration
//! - [`timer::TimerConfig`] - Timer clocking and time base derivation

#![no_std]
#![deny(unsafe_code)]

pub mod bit;
pub mod gpio;
pub mod interrupt;
pub mod spi;
pub mod timer;

// Re-export key items at crate root for convenience
pub use bit::Bit;
pub use gpio::{IoLine, Line};
pub use interrupt::TriggerMode;
pub use spi::SpiConfig;
pub use timer::{ClockError, Prescaler, TimeBase, TimerConfig};
