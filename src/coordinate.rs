//! Coordinate text codec
//!
//! The terminals serialize coordinates as `D..DMM.MMMMH`: truncated integer
//! degrees, fractional minutes zero-padded to four decimal places, and a
//! single hemisphere letter. Delta frames patch byte ranges of this text
//! form rather than the numeric value, so the encoding has to round-trip
//! exactly, including the fixed-width minute field.

use regex::Regex;
use std::sync::OnceLock;

/// Hemisphere letter pair for latitude values (positive, negative)
pub const LATITUDE_HEMISPHERES: (char, char) = ('N', 'S');
/// Hemisphere letter pair for longitude values (positive, negative)
pub const LONGITUDE_HEMISPHERES: (char, char) = ('E', 'W');

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)(\d{2}\.\d{4})([NSEW])$").unwrap())
}

/// Format a signed decimal-degree coordinate into its canonical text form.
///
/// Degrees >= 0 map to the positive hemisphere letter. The minute field is
/// always seven characters (`MM.MMMM`).
pub fn format_coordinate(value: f64, hemispheres: (char, char)) -> String {
    let letter = if value >= 0.0 {
        hemispheres.0
    } else {
        hemispheres.1
    };
    let degrees = value.abs().trunc() as u64;
    let minutes = value.abs().fract() * 60.0;

    format!("{}{:07.4}{}", degrees, minutes, letter)
}

/// Parse the canonical coordinate text form back into signed decimal degrees.
///
/// Grammar: integer degrees, two-digit minutes, four-decimal minute
/// fraction, hemisphere letter. `S` and `W` negate the value. Magnitudes
/// beyond the hemisphere's range (90 for N/S, 180 for E/W) are rejected.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let captures = coordinate_pattern().captures(text)?;

    let degrees: f64 = captures[1].parse().ok()?;
    let minutes: f64 = captures[2].parse().ok()?;
    let hemisphere = captures[3].chars().next()?;

    let value = degrees + minutes / 60.0;
    let bound = match hemisphere {
        'N' | 'S' => 90.0,
        _ => 180.0,
    };
    if value > bound {
        return None;
    }

    match hemisphere {
        'S' | 'W' => Some(-value),
        _ => Some(value),
    }
}

/// Apply a positional text patch to a coordinate.
///
/// Formats `original`, splices `patch` into the text starting at `index`
/// while keeping the final character (the hemisphere letter) of the
/// original text, then re-parses the result.
///
/// Returns `0.0` as a "no change" sentinel when the patch cannot apply:
/// `index` past the end of the text, non-UTF-8 patch bytes, or a spliced
/// string that no longer matches the coordinate grammar. A legitimate
/// coordinate of exactly zero degrees is indistinguishable from the
/// sentinel; this matches the on-wire protocol and callers must treat a
/// zero result as "patch did not apply".
pub fn overwrite_coordinate(
    original: f64,
    index: usize,
    patch: &[u8],
    hemispheres: (char, char),
) -> f64 {
    let previous = format_coordinate(original, hemispheres);
    if index > previous.len() {
        return 0.0;
    }

    let patch = match std::str::from_utf8(patch) {
        Ok(text) => text,
        Err(_) => return 0.0,
    };

    let mut patched = String::with_capacity(previous.len());
    patched.push_str(&previous[..index]);
    patched.push_str(patch);
    if let Some(hemisphere) = previous.chars().last() {
        patched.push(hemisphere);
    }

    parse_coordinate(&patched).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(
            format_coordinate(37.391_011_666, LATITUDE_HEMISPHERES),
            "3723.4607N"
        );
        assert_eq!(
            format_coordinate(-122.039_093_333, LONGITUDE_HEMISPHERES),
            "12202.3456W"
        );
        assert_eq!(format_coordinate(0.0, LATITUDE_HEMISPHERES), "000.0000N");
        assert_eq!(
            format_coordinate(-0.5, LONGITUDE_HEMISPHERES),
            "030.0000W"
        );
    }

    #[test]
    fn test_parse_coordinate() {
        assert_close(parse_coordinate("3723.4567N").unwrap(), 37.390945);
        assert_close(parse_coordinate("12202.3456W").unwrap(), -122.039093);
        assert_close(parse_coordinate("000.0000S").unwrap(), 0.0);
        assert!(parse_coordinate("3723.4567X").is_none());
        assert!(parse_coordinate("37234567N").is_none());
        assert!(parse_coordinate("").is_none());
        // out of range for the hemisphere
        assert!(parse_coordinate("9100.0000N").is_none());
        assert!(parse_coordinate("18100.0000E").is_none());
        // 91 degrees is a valid longitude but not a valid latitude
        assert!(parse_coordinate("9100.0000E").is_some());
    }

    #[test]
    fn test_round_trip() {
        for &value in &[
            0.0, 12.5, -12.5, 37.390945, -37.390945, 89.9999, -89.9999,
        ] {
            let text = format_coordinate(value, LATITUDE_HEMISPHERES);
            assert_close(parse_coordinate(&text).unwrap(), value);
        }
        for &value in &[122.039093, -122.039093, 179.9999, -179.9999, 0.0001] {
            let text = format_coordinate(value, LONGITUDE_HEMISPHERES);
            assert_close(parse_coordinate(&text).unwrap(), value);
        }
    }

    #[test]
    fn test_overwrite_replaces_digits() {
        // "3723.4567N" with "24.0000" at index 2 -> "3724.0000N"
        let original = parse_coordinate("3723.4567N").unwrap();
        let patched =
            overwrite_coordinate(original, 2, b"24.0000", LATITUDE_HEMISPHERES);
        assert_close(patched, 37.4);
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let original = parse_coordinate("3723.4567N").unwrap();
        let patched = overwrite_coordinate(original, 2, b"23.4567", LATITUDE_HEMISPHERES);
        assert_close(patched, original);
    }

    #[test]
    fn test_overwrite_preserves_hemisphere() {
        // the splice keeps the original hemisphere letter even when the
        // patch would otherwise run over it
        let original = parse_coordinate("12202.3456W").unwrap();
        let patched = overwrite_coordinate(original, 0, b"12203.0000", LONGITUDE_HEMISPHERES);
        assert_close(patched, -(122.0 + 3.0 / 60.0));
    }

    #[test]
    fn test_overwrite_rejects_bad_patches() {
        let original = parse_coordinate("3723.4567N").unwrap();
        // index past the end of the formatted text
        assert_eq!(
            overwrite_coordinate(original, 99, b"12", LATITUDE_HEMISPHERES),
            0.0
        );
        // splice destroys the grammar
        assert_eq!(
            overwrite_coordinate(original, 2, b"xx", LATITUDE_HEMISPHERES),
            0.0
        );
        // non-UTF-8 payload
        assert_eq!(
            overwrite_coordinate(original, 2, &[0xff, 0xfe], LATITUDE_HEMISPHERES),
            0.0
        );
    }
}
