//! Timer clocking and time base derivation
//!
//! The millisecond clock is fed by an 8-bit timer overflow interrupt. How
//! much time one overflow covers depends on the CPU frequency and the
//! timer's prescaler; [`TimerConfig`] validates that pair and derives the
//! [`TimeBase`] the timekeeper counts with.

/// Counter ticks per overflow of an 8-bit timer
pub const TICKS_PER_OVERFLOW: u32 = 256;

/// Clock source divider of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// CSn2:CSn0 clock select field
    pub const fn clock_select(self) -> u8 {
        match self {
            Prescaler::Div1 => 0b001,
            Prescaler::Div8 => 0b010,
            Prescaler::Div64 => 0b011,
            Prescaler::Div256 => 0b100,
            Prescaler::Div1024 => 0b101,
        }
    }

    /// CPU cycles per timer tick
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    /// Prescaler from its divisor
    pub const fn from_divisor(divisor: u32) -> Option<Self> {
        match divisor {
            1 => Some(Prescaler::Div1),
            8 => Some(Prescaler::Div8),
            64 => Some(Prescaler::Div64),
            256 => Some(Prescaler::Div256),
            1024 => Some(Prescaler::Div1024),
            _ => None,
        }
    }
}

/// Errors from clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// CPU frequency of 0 Hz
    ZeroFrequency,
    /// CPU frequency is not a whole number of MHz
    FractionalMegahertz,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::ZeroFrequency => f.write_str("CPU frequency is 0 Hz"),
            ClockError::FractionalMegahertz => {
                f.write_str("CPU frequency is not a whole number of MHz")
            }
        }
    }
}

/// Validated CPU frequency and timer prescaler
///
/// Deserializing goes through [`TimerConfig::new`], so an invalid clock is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TimerConfigFields"))]
pub struct TimerConfig {
    cpu_hz: u32,
    prescaler: Prescaler,
}

/// Unvalidated form of [`TimerConfig`] as it appears in config files
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TimerConfigFields {
    cpu_hz: u32,
    prescaler: Prescaler,
}

#[cfg(feature = "serde")]
impl TryFrom<TimerConfigFields> for TimerConfig {
    type Error = ClockError;

    fn try_from(fields: TimerConfigFields) -> Result<Self, Self::Error> {
        TimerConfig::new(fields.cpu_hz, fields.prescaler)
    }
}

impl TimerConfig {
    /// Validate a clock configuration
    ///
    /// The microsecond clock divides by whole cycles per microsecond, so the
    /// CPU frequency must be a non-zero multiple of 1 MHz.
    pub const fn new(cpu_hz: u32, prescaler: Prescaler) -> Result<Self, ClockError> {
        if cpu_hz == 0 {
            return Err(ClockError::ZeroFrequency);
        }
        if cpu_hz % 1_000_000 != 0 {
            return Err(ClockError::FractionalMegahertz);
        }
        Ok(Self { cpu_hz, prescaler })
    }

    /// CPU frequency in Hz
    pub const fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    /// Timer prescaler
    pub const fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Cycle counts the timekeeper works with
    pub const fn time_base(&self) -> TimeBase {
        let prescaler = self.prescaler.divisor();
        TimeBase {
            prescaler,
            cycles_per_overflow: prescaler * TICKS_PER_OVERFLOW,
            cycles_per_ms: self.cpu_hz / 1_000,
            cycles_per_us: self.cpu_hz / 1_000_000,
        }
    }
}

/// Cycle counts derived from a [`TimerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeBase {
    /// CPU cycles per timer tick
    pub prescaler: u32,
    /// CPU cycles covered by one overflow period
    pub cycles_per_overflow: u32,
    /// CPU cycles per millisecond
    pub cycles_per_ms: u32,
    /// CPU cycles per microsecond
    pub cycles_per_us: u32,
}
