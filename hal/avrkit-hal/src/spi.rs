//! SPI master configuration
//!
//! [`SpiConfig`] carries the low seven bits of the SPI control register plus
//! the double-speed flag that lives in the status register. The engine ORs
//! in the enable and master bits itself, so a configuration can never turn
//! the peripheral into a slave or switch it off.

/// Data order bit (DORD)
const DORD: u8 = 1 << 5;
/// Clock polarity bit (CPOL)
const CPOL: u8 = 1 << 3;
/// Clock phase bit (CPHA)
const CPHA: u8 = 1 << 2;
/// Clock rate select bits (SPR1:SPR0)
const SPR_MASK: u8 = 0b11;

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiConfig {
    /// Control register bits 0-6
    bits: u8,
    /// Set SPI2X after configuring the control register
    double_speed: bool,
}

impl SpiConfig {
    /// Mask applied to the raw control field
    pub const FIELD_MASK: u8 = 0x7F;

    /// MSB first, mode 0, fosc/4
    pub const fn new() -> Self {
        Self {
            bits: 0,
            double_speed: false,
        }
    }

    /// Configuration from a raw control field
    ///
    /// Bit 7 (interrupt enable) is discarded.
    pub const fn from_bits(bits: u8, double_speed: bool) -> Self {
        Self {
            bits: bits & Self::FIELD_MASK,
            double_speed,
        }
    }

    /// Control register field (bits 0-6)
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Whether SPI2X is set when the configuration is applied
    #[inline(always)]
    pub const fn double_speed(&self) -> bool {
        self.double_speed
    }

    /// Select clock polarity and phase
    pub const fn with_mode(self, mode: Mode) -> Self {
        let mut bits = self.bits & !(CPOL | CPHA);
        if let Polarity::IdleHigh = mode.polarity() {
            bits |= CPOL;
        }
        if let Phase::CaptureOnSecondTransition = mode.phase() {
            bits |= CPHA;
        }
        Self { bits, ..self }
    }

    /// Select bit order
    pub const fn with_data_order(self, order: DataOrder) -> Self {
        let bits = match order {
            DataOrder::MsbFirst => self.bits & !DORD,
            DataOrder::LsbFirst => self.bits | DORD,
        };
        Self { bits, ..self }
    }

    /// Select SCK frequency as a divider of the CPU clock
    ///
    /// Also decides the double-speed flag. Applying a configuration only
    /// ever sets SPI2X, so the single-speed rates (`Div4`, `Div16`, `Div64`,
    /// `Div128`) are exact only on a bus that has never run at double speed.
    /// After that the bus runs at half the requested divider.
    pub const fn with_clock(self, rate: ClockRate) -> Self {
        let (spr, double_speed) = rate.encoding();
        Self {
            bits: (self.bits & !SPR_MASK) | spr,
            double_speed,
        }
    }

    /// Clock polarity and phase encoded in this configuration
    pub const fn mode(&self) -> Mode {
        match (self.bits & CPOL != 0, self.bits & CPHA != 0) {
            (false, false) => Mode::Mode0,
            (false, true) => Mode::Mode1,
            (true, false) => Mode::Mode2,
            (true, true) => Mode::Mode3,
        }
    }

    /// Bit order encoded in this configuration
    pub const fn data_order(&self) -> DataOrder {
        if self.bits & DORD != 0 {
            DataOrder::LsbFirst
        } else {
            DataOrder::MsbFirst
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock polarity of this mode
    pub const fn polarity(self) -> Polarity {
        match self {
            Mode::Mode0 | Mode::Mode1 => Polarity::IdleLow,
            Mode::Mode2 | Mode::Mode3 => Polarity::IdleHigh,
        }
    }

    /// Clock phase of this mode
    pub const fn phase(self) -> Phase {
        match self {
            Mode::Mode0 | Mode::Mode2 => Phase::CaptureOnFirstTransition,
            Mode::Mode1 | Mode::Mode3 => Phase::CaptureOnSecondTransition,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        (mode.polarity(), mode.phase())
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataOrder {
    MsbFirst,
    LsbFirst,
}

/// SCK frequency as a divider of the CPU clock
///
/// `Div2`, `Div8` and `Div32` need the SPI2X flag. Once a bus has had that
/// flag set it keeps it until reset, and a single-speed rate chosen later
/// runs at twice its nominal frequency (`Div16` becomes /8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockRate {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
}

impl ClockRate {
    /// SPR1:SPR0 field and SPI2X flag for this rate
    const fn encoding(self) -> (u8, bool) {
        match self {
            ClockRate::Div2 => (0b00, true),
            ClockRate::Div4 => (0b00, false),
            ClockRate::Div8 => (0b01, true),
            ClockRate::Div16 => (0b01, false),
            ClockRate::Div32 => (0b10, true),
            ClockRate::Div64 => (0b10, false),
            ClockRate::Div128 => (0b11, false),
        }
    }

    /// Divider value
    pub const fn divider(self) -> u8 {
        match self {
            ClockRate::Div2 => 2,
            ClockRate::Div4 => 4,
            ClockRate::Div8 => 8,
            ClockRate::Div16 => 16,
            ClockRate::Div32 => 32,
            ClockRate::Div64 => 64,
            ClockRate::Div128 => 128,
        }
    }
}
