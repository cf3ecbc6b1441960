//! ATmega328P register map
//!
//! Addresses are data-space addresses (I/O address + 0x20), which is what
//! [`Mmio`] dereferences. Bit constants are positions, not masks.

use avrkit_core::{Mmio, Reg};

macro_rules! registers {
    ($($(#[$meta:meta])* $name:ident = $addr:literal;)*) => {
        $(
            $(#[$meta])*
            pub type $name = Reg<Mmio, $addr>;
        )*
    };
}

registers! {
    /// Port B input pins
    PINB = 0x23;
    /// Port B data direction
    DDRB = 0x24;
    /// Port B data
    PORTB = 0x25;
    /// Port C input pins
    PINC = 0x26;
    /// Port C data direction
    DDRC = 0x27;
    /// Port C data
    PORTC = 0x28;
    /// Port D input pins
    PIND = 0x29;
    /// Port D data direction
    DDRD = 0x2A;
    /// Port D data
    PORTD = 0x2B;

    /// Timer0 interrupt flags
    TIFR0 = 0x35;
    /// External interrupt mask
    EIMSK = 0x3D;

    /// Timer0 control A
    TCCR0A = 0x44;
    /// Timer0 control B
    TCCR0B = 0x45;
    /// Timer0 counter
    TCNT0 = 0x46;
    /// Timer0 output compare A
    OCR0A = 0x47;

    /// SPI control
    SPCR = 0x4C;
    /// SPI status
    SPSR = 0x4D;
    /// SPI data
    SPDR = 0x4E;

    /// External interrupt control A
    EICRA = 0x69;
    /// Timer0 interrupt mask
    TIMSK0 = 0x6E;
}

// EICRA
pub const ISC00: u8 = 0;
pub const ISC10: u8 = 2;

// EIMSK
pub const INT0: u8 = 0;
pub const INT1: u8 = 1;

// SPCR
pub const SPE: u8 = 6;
pub const MSTR: u8 = 4;

// SPSR
pub const SPIF: u8 = 7;
pub const SPI2X: u8 = 0;

// TIMSK0 / TIFR0
pub const TOIE0: u8 = 0;
pub const TOV0: u8 = 0;
pub const OCIE0A: u8 = 1;
pub const OCF0A: u8 = 1;
