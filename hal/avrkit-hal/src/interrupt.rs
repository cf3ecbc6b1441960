//! External interrupt sense control

/// Trigger condition of an external interrupt line
///
/// The discriminants are the 2-bit ISCn1:ISCn0 encoding used by the
/// hardware and are written to the control register unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TriggerMode {
    /// Fires while the line is held low
    LowLevel = 0,
    /// Fires on any logical change
    Change = 1,
    /// Fires on a high-to-low transition
    FallingEdge = 2,
    /// Fires on a low-to-high transition
    RisingEdge = 3,
}

impl TriggerMode {
    /// Width of the sense-control field
    pub const FIELD_MASK: u8 = 0b11;

    /// Hardware encoding of this mode
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a sense-control field
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(TriggerMode::LowLevel),
            1 => Some(TriggerMode::Change),
            2 => Some(TriggerMode::FallingEdge),
            3 => Some(TriggerMode::RisingEdge),
            _ => None,
        }
    }
}
