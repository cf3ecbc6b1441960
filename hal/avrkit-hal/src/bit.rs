//! Bit positions inside an 8-bit register

/// One bit position of an 8-bit register
///
/// The enum makes the 0-7 domain part of the type: there is no way to name
/// bit 8. Const contexts use [`Bit::new`], which fails the build for an
/// out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bit {
    B0 = 0,
    B1 = 1,
    B2 = 2,
    B3 = 3,
    B4 = 4,
    B5 = 5,
    B6 = 6,
    B7 = 7,
}

impl Bit {
    /// All bit positions, LSB first
    pub const ALL: [Bit; 8] = [
        Bit::B0,
        Bit::B1,
        Bit::B2,
        Bit::B3,
        Bit::B4,
        Bit::B5,
        Bit::B6,
        Bit::B7,
    ];

    /// Bit position from a compile-time index
    ///
    /// Panics for `index > 7`. Used from associated consts, where the panic
    /// becomes a build error.
    pub const fn new(index: u8) -> Self {
        match Self::from_index(index) {
            Some(bit) => bit,
            None => panic!("bit index out of range 0..=7"),
        }
    }

    /// Bit position from a runtime index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Bit::B0),
            1 => Some(Bit::B1),
            2 => Some(Bit::B2),
            3 => Some(Bit::B3),
            4 => Some(Bit::B4),
            5 => Some(Bit::B5),
            6 => Some(Bit::B6),
            7 => Some(Bit::B7),
            _ => None,
        }
    }

    /// Index of this bit (0-7)
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single-bit mask, `1 << index`
    #[inline(always)]
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}
