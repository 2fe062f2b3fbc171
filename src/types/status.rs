#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unpacked trailing status word of a full record.
///
/// The word arrives as exactly three hex digits: battery level in the top
/// nibble, signal strength in the middle, satellite count in the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusWord {
    pub battery: u8,
    pub rssi: u8,
    pub satellites: u8,
}

impl StatusWord {
    /// Decompose a 12-bit packed value. Callers guarantee the source
    /// matched three hex digits; no further validation happens here.
    pub fn from_raw(value: u16) -> Self {
        Self {
            battery: (value >> 8) as u8,
            rssi: ((value >> 4) & 0xf) as u8,
            satellites: (value & 0xf) as u8,
        }
    }
}
