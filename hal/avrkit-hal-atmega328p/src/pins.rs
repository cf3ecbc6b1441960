//! Port pins
//!
//! Each pin is a type; there is nothing to construct. `PB5::set()` drives
//! port B bit 5 high.

use avrkit_core::Pin;

use crate::regs::{DDRB, DDRC, DDRD, PINB, PINC, PIND, PORTB, PORTC, PORTD};

/// Port B line
pub type PortB<const BIT: u8> = Pin<DDRB, PORTB, PINB, BIT>;
/// Port C line
pub type PortC<const BIT: u8> = Pin<DDRC, PORTC, PINC, BIT>;
/// Port D line
pub type PortD<const BIT: u8> = Pin<DDRD, PORTD, PIND, BIT>;

pub type PB0 = PortB<0>;
pub type PB1 = PortB<1>;
pub type PB2 = PortB<2>;
pub type PB3 = PortB<3>;
pub type PB4 = PortB<4>;
pub type PB5 = PortB<5>;

pub type PC0 = PortC<0>;
pub type PC1 = PortC<1>;
pub type PC2 = PortC<2>;
pub type PC3 = PortC<3>;
pub type PC4 = PortC<4>;

pub type PD0 = PortD<0>;
pub type PD1 = PortD<1>;
pub type PD2 = PortD<2>;
pub type PD3 = PortD<3>;
pub type PD4 = PortD<4>;
pub type PD5 = PortD<5>;
pub type PD6 = PortD<6>;
pub type PD7 = PortD<7>;

/// Hardware SPI slave-select
pub type SpiSsPin = PB2;
/// Hardware SPI data out
pub type SpiMosiPin = PB3;
/// Hardware SPI data in
pub type SpiMisoPin = PB4;
/// Hardware SPI clock
pub type SpiSckPin = PB5;

/// External interrupt 0 input
pub type Int0Pin = PD2;
/// External interrupt 1 input
pub type Int1Pin = PD3;

/// Arduino Uno header names
pub mod arduino {
    use super::*;

    pub type D0 = PD0;
    pub type D1 = PD1;
    pub type D2 = PD2;
    pub type D3 = PD3;
    pub type D4 = PD4;
    pub type D5 = PD5;
    pub type D6 = PD6;
    pub type D7 = PD7;
    pub type D8 = PB0;
    pub type D9 = PB1;
    pub type D10 = PB2;
    pub type D11 = PB3;
    pub type D12 = PB4;
    /// On-board LED
    pub type D13 = PB5;

    pub type A0 = PC0;
    pub type A1 = PC1;
    pub type A2 = PC2;
    pub type A3 = PC3;
    pub type A4 = PC4;

    /// On-board LED
    pub type Led = D13;
}
