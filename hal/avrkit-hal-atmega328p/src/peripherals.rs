//! Peripheral bindings
//!
//! Connects the generic engines to the ATmega328P registers.

use avrkit_core::{Bit, ExtInt, NullPin, SpiBlock, Timer8, TimerBlock};

use crate::pins::{SpiMisoPin, SpiMosiPin, SpiSckPin, SpiSsPin};
use crate::regs::{self, *};

/// The SPI peripheral
pub struct Spi0;

impl SpiBlock for Spi0 {
    type Control = SPCR;
    type Status = SPSR;
    type Data = SPDR;

    const ENABLE: Bit = Bit::new(regs::SPE);
    const MASTER: Bit = Bit::new(regs::MSTR);
    const DOUBLE_SPEED: Bit = Bit::new(regs::SPI2X);
    const COMPLETE: Bit = Bit::new(regs::SPIF);
}

/// Timer/counter 0
pub struct Tc0;

impl TimerBlock for Tc0 {
    type ControlA = TCCR0A;
    type ControlB = TCCR0B;
    type Count = TCNT0;
    type CompareA = OCR0A;
    type InterruptMask = TIMSK0;
    type InterruptFlags = TIFR0;

    const OVERFLOW: Bit = Bit::new(regs::TOIE0);
    const COMPARE_A: Bit = Bit::new(regs::OCIE0A);
}

/// Timer0, used by the system clock
pub type Timer0 = Timer8<Tc0>;

/// External interrupt 0, sensed on [`Int0Pin`](crate::pins::Int0Pin)
pub type Interrupt0 = ExtInt<EICRA, EIMSK, { regs::ISC00 }, { regs::INT0 }>;
/// External interrupt 1, sensed on [`Int1Pin`](crate::pins::Int1Pin)
pub type Interrupt1 = ExtInt<EICRA, EIMSK, { regs::ISC10 }, { regs::INT1 }>;

/// Hardware SPI without a select line; the caller frames transactions
pub type Spi = avrkit_core::Spi<Spi0, SpiSckPin, SpiMisoPin, SpiMosiPin, NullPin>;
/// Hardware SPI framing every byte with PB2
pub type SpiSs = avrkit_core::Spi<Spi0, SpiSckPin, SpiMisoPin, SpiMosiPin, SpiSsPin>;
