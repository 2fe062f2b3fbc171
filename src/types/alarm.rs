#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized alarm kinds reported by the terminals.
///
/// The wire tokens are three-character uppercase codes. The type field of a
/// full record is not guaranteed to carry an alarm code at all (plain
/// report-type and photo-announcement tokens travel in the same slot), so
/// an unknown token is an expected, silent non-match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alarm {
    Sos,
    Geofence,
    Tow,
    HardAcceleration,
    HardBraking,
    FatigueDriving,
    Vibration,
    Movement,
    PowerCut,
}

impl Alarm {
    /// Map a wire token to an alarm kind; unknown tokens yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IN1" => Some(Alarm::Sos),
            "GOF" => Some(Alarm::Geofence),
            "TOW" => Some(Alarm::Tow),
            "HDA" => Some(Alarm::HardAcceleration),
            "HDB" => Some(Alarm::HardBraking),
            "FDA" => Some(Alarm::FatigueDriving),
            "SKA" => Some(Alarm::Vibration),
            "PMA" => Some(Alarm::Movement),
            "CPA" => Some(Alarm::PowerCut),
            _ => None,
        }
    }

    /// Normalized name stored in the `alarm` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alarm::Sos => "sos",
            Alarm::Geofence => "geofence",
            Alarm::Tow => "tow",
            Alarm::HardAcceleration => "hardAcceleration",
            Alarm::HardBraking => "hardBraking",
            Alarm::FatigueDriving => "fatigueDriving",
            Alarm::Vibration => "vibration",
            Alarm::Movement => "movement",
            Alarm::PowerCut => "powerCut",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Alarm::from_code("IN1"), Some(Alarm::Sos));
        assert_eq!(Alarm::from_code("GOF"), Some(Alarm::Geofence));
        assert_eq!(Alarm::from_code("TOW"), Some(Alarm::Tow));
        assert_eq!(Alarm::from_code("HDA"), Some(Alarm::HardAcceleration));
        assert_eq!(Alarm::from_code("HDB"), Some(Alarm::HardBraking));
        assert_eq!(Alarm::from_code("FDA"), Some(Alarm::FatigueDriving));
        assert_eq!(Alarm::from_code("SKA"), Some(Alarm::Vibration));
        assert_eq!(Alarm::from_code("PMA"), Some(Alarm::Movement));
        assert_eq!(Alarm::from_code("CPA"), Some(Alarm::PowerCut));
    }

    #[test]
    fn test_unknown_codes_are_silent() {
        assert_eq!(Alarm::from_code("POS"), None);
        assert_eq!(Alarm::from_code("PHO1234"), None);
        assert_eq!(Alarm::from_code(""), None);
        assert_eq!(Alarm::from_code("in1"), None);
    }
}
