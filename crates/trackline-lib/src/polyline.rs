//! Encoded polyline codec
//!
//! Implements the Google encoded polyline algorithm at 5 or 6 decimal digits:
//! coordinates are scaled to integers, delta encoded against the previous point,
//! zig-zag transformed and written as 5-bit groups offset by `'?'`.
//!
//! Only latitude and longitude are kept. Decoding reproduces each coordinate within
//! half a quantization step.
//!
//! See <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use crate::{DataError, Point, Result, utils};
use std::fmt;

/// Offset added to every 5-bit group so it lands on a printable character
const CHAR_OFFSET: u8 = 63;
/// Bit marking that another group follows
const CONTINUATION_BIT: i64 = 0x20;
const GROUP_MASK: i64 = 0x1f;

/// Number of decimal digits retained by the codec
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// 5 digits, about 1.1 m at the equator
    #[default]
    Five = 5,
    /// 6 digits, about 0.11 m at the equator
    Six = 6,
}

impl Precision {
    #[inline]
    pub fn digits(self) -> u32 {
        self as u32
    }

    /// Scale between degrees and encoded integers
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Precision::Five => 100_000.0,
            Precision::Six => 1_000_000.0,
        }
    }
}

impl TryFrom<i64> for Precision {
    type Error = DataError;

    fn try_from(digits: i64) -> Result<Self> {
        match digits {
            5 => Ok(Precision::Five),
            6 => Ok(Precision::Six),
            other => Err(DataError::InvalidPrecision(other)),
        }
    }
}

impl TryFrom<i32> for Precision {
    type Error = DataError;

    fn try_from(digits: i32) -> Result<Self> {
        Precision::try_from(i64::from(digits))
    }
}

impl TryFrom<u32> for Precision {
    type Error = DataError;

    fn try_from(digits: u32) -> Result<Self> {
        Precision::try_from(i64::from(digits))
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.digits()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

/// Encode the latitude/longitude of `points` at the given precision
///
/// Fails with [`DataError::InvalidCoordinate`] on a non-finite or out-of-range
/// coordinate.
pub fn encode(points: &[Point], precision: Precision) -> Result<String> {
    let factor = precision.factor();
    // Most deltas between consecutive samples fit in 3-4 characters per axis
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut last_lat: i64 = 0;
    let mut last_lon: i64 = 0;

    for point in points {
        if !utils::is_valid_coordinate(point.latitude(), point.longitude()) {
            return Err(DataError::InvalidCoordinate {
                latitude: point.latitude(),
                longitude: point.longitude(),
            });
        }
        let lat = scale(point.latitude(), factor);
        let lon = scale(point.longitude(), factor);

        encode_value(lat - last_lat, &mut encoded);
        encode_value(lon - last_lon, &mut encoded);

        last_lat = lat;
        last_lon = lon;
    }

    Ok(encoded)
}

/// Decode a polyline produced at the given precision
///
/// Decoded points carry no elevation or timestamp.
pub fn decode(encoded: &str, precision: Precision) -> Result<Vec<Point>> {
    let factor = precision.factor();
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat = accumulate(lat, decode_value(bytes, &mut index)?, index)?;
        if index >= bytes.len() {
            return Err(DataError::MalformedPolyline {
                position: index,
                reason: "latitude without longitude",
            });
        }
        lon = accumulate(lon, decode_value(bytes, &mut index)?, index)?;

        points.push(Point::new(lat as f64 / factor, lon as f64 / factor));
    }

    tracing::debug!(
        "Decoded {} points from {} bytes at precision {}",
        points.len(),
        bytes.len(),
        precision
    );

    Ok(points)
}

/// [`encode`] with the precision given as a plain number of digits
pub fn encode_with_digits(points: &[Point], digits: i64) -> Result<String> {
    let precision = Precision::try_from(digits)?;
    encode(points, precision)
}

/// [`decode`] with the precision given as a plain number of digits
pub fn decode_with_digits(encoded: &str, digits: i64) -> Result<Vec<Point>> {
    let precision = Precision::try_from(digits)?;
    decode(encoded, precision)
}

#[inline]
fn scale(degrees: f64, factor: f64) -> i64 {
    (degrees * factor).round() as i64
}

#[inline]
fn accumulate(total: i64, delta: i64, position: usize) -> Result<i64> {
    total
        .checked_add(delta)
        .ok_or(DataError::MalformedPolyline {
            position,
            reason: "coordinate does not fit in 64 bits",
        })
}

fn encode_value(delta: i64, output: &mut String) {
    let mut value = if delta < 0 {
        !(delta << 1)
    } else {
        delta << 1
    };
    while value >= CONTINUATION_BIT {
        output.push(char::from(
            (CONTINUATION_BIT | (value & GROUP_MASK)) as u8 + CHAR_OFFSET,
        ));
        value >>= 5;
    }
    output.push(char::from(value as u8 + CHAR_OFFSET));
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut shift = 0;
    let mut result: i64 = 0;

    loop {
        let position = *index;
        let byte = *bytes.get(position).ok_or(DataError::MalformedPolyline {
            position,
            reason: "value is truncated",
        })?;
        if !(CHAR_OFFSET..=CHAR_OFFSET + 0x3f).contains(&byte) {
            return Err(DataError::MalformedPolyline {
                position,
                reason: "character outside '?'..='~'",
            });
        }
        if shift > 60 {
            return Err(DataError::MalformedPolyline {
                position,
                reason: "value does not fit in 64 bits",
            });
        }

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        *index += 1;

        if group < CONTINUATION_BIT {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(lat, lon)| Point::new(lat, lon)).collect()
    }

    fn google_example() -> Vec<Point> {
        points(&[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)])
    }

    #[test]
    fn test_precision_from_integer() {
        assert_eq!(Precision::try_from(5i32), Ok(Precision::Five));
        assert_eq!(Precision::try_from(6u32), Ok(Precision::Six));
        assert_eq!(Precision::try_from(4i32), Err(DataError::InvalidPrecision(4)));
        assert_eq!(Precision::try_from(7i64), Err(DataError::InvalidPrecision(7)));
        assert_eq!(Precision::default(), Precision::Five);
        assert_eq!(u32::from(Precision::Six), 6);
    }

    #[test]
    fn test_encode_reference_precision_5() {
        assert_eq!(
            encode(&google_example(), Precision::Five).unwrap(),
            "_p~iF~ps|U_ulLnnqC_mqNvxq`@"
        );
    }

    #[test]
    fn test_encode_reference_precision_6() {
        assert_eq!(
            encode(&google_example(), Precision::Six).unwrap(),
            "_izlhA~rlgdF_{geC~ywl@_kwzCn`{nI"
        );
    }

    #[test]
    fn test_decode_reference() {
        let decoded = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", Precision::Five).unwrap();
        assert_eq!(decoded, google_example());
    }

    #[test]
    fn test_encode_single_values() {
        assert_eq!(encode(&points(&[(0.0, 0.0)]), Precision::Five).unwrap(), "??");
        assert_eq!(
            encode(&points(&[(-0.00001, 0.00001)]), Precision::Five).unwrap(),
            "@A"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[], Precision::Five).unwrap(), "");
        assert_eq!(encode(&[], Precision::Six).unwrap(), "");
        assert!(decode("", Precision::Five).unwrap().is_empty());
        assert!(decode("", Precision::Six).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_precision_6() {
        let input = points(&[(64.0, 10.0), (66.0, 11.0)]);
        let encoded = encode(&input, Precision::Six).unwrap();
        assert_eq!(encoded, "__gayB_gjaR_gayB_c`|@");

        let decoded = decode(&encoded, Precision::Six).unwrap();
        assert_eq!(decoded.len(), 2);
        for (a, b) in input.iter().zip(&decoded) {
            assert!((a.latitude() - b.latitude()).abs() < 0.5e-6);
            assert!((a.longitude() - b.longitude()).abs() < 0.5e-6);
        }
    }

    #[test]
    fn test_round_trip_within_quantization_step() {
        let input: Vec<Point> = (0..500)
            .map(|i| {
                let t = i as f64 / 500.0;
                Point::new(
                    -45.0 + t * 120.0 + (t * 50.0).sin() * 0.0012345,
                    170.0 - t * 340.0 + (t * 30.0).cos() * 0.0098765,
                )
            })
            .collect();

        for precision in [Precision::Five, Precision::Six] {
            let tolerance = 0.5 / precision.factor() + 1e-12;
            let decoded = decode(&encode(&input, precision).unwrap(), precision).unwrap();
            assert_eq!(decoded.len(), input.len());
            for (a, b) in input.iter().zip(&decoded) {
                assert!((a.latitude() - b.latitude()).abs() <= tolerance);
                assert!((a.longitude() - b.longitude()).abs() <= tolerance);
            }
        }
    }

    #[test]
    fn test_encoding_drops_elevation_and_time() {
        let with_extras = vec![Point::with_elevation(38.5, -120.2, 1500.0)];
        let plain = points(&[(38.5, -120.2)]);
        assert_eq!(
            encode(&with_extras, Precision::Five).unwrap(),
            encode(&plain, Precision::Five).unwrap()
        );
    }

    #[test]
    fn test_invalid_digits() {
        let input = google_example();
        for digits in [4, 7] {
            assert_eq!(
                encode_with_digits(&input, digits),
                Err(DataError::InvalidPrecision(digits))
            );
            assert_eq!(
                decode_with_digits("_p~iF~ps|U", digits),
                Err(DataError::InvalidPrecision(digits))
            );
        }
        assert_eq!(
            encode_with_digits(&input, 5).unwrap(),
            "_p~iF~ps|U_ulLnnqC_mqNvxq`@"
        );
    }

    #[test]
    fn test_decode_malformed() {
        // Continuation bit set on the last character
        assert!(matches!(
            decode("_p~iF~ps|", Precision::Five),
            Err(DataError::MalformedPolyline { position: 9, .. })
        ));
        // Latitude without longitude
        assert!(matches!(
            decode("_p~iF", Precision::Five),
            Err(DataError::MalformedPolyline { position: 5, .. })
        ));
        // Character below '?'
        assert!(matches!(
            decode("_p~iF ", Precision::Five),
            Err(DataError::MalformedPolyline { position: 5, .. })
        ));
        // Endless continuation
        assert!(matches!(
            decode(&"~".repeat(20), Precision::Five),
            Err(DataError::MalformedPolyline { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_accumulated_overflow() {
        // Four latitude deltas of 2^61 each: every value fits, their sum does not
        let encoded = "____________C?".repeat(4);
        assert!(matches!(
            decode(&encoded, Precision::Five),
            Err(DataError::MalformedPolyline { position: 55, .. })
        ));
        assert_eq!(decode(&"____________C?".repeat(3), Precision::Five).unwrap().len(), 3);
    }

    #[test]
    fn test_encode_rejects_invalid_coordinates() {
        let non_finite = [Point::new(f64::INFINITY, 0.0), Point::new(f64::NEG_INFINITY, 0.0)];
        assert!(matches!(
            encode(&non_finite, Precision::Five),
            Err(DataError::InvalidCoordinate { .. })
        ));
        assert!(encode(&[Point::new(f64::NAN, 0.0)], Precision::Six).is_err());
        assert_eq!(
            encode(&points(&[(0.0, 0.0), (91.0, 0.0)]), Precision::Five),
            Err(DataError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 0.0
            })
        );
        assert_eq!(
            encode_with_digits(&points(&[(0.0, 1e300)]), 6),
            Err(DataError::InvalidCoordinate {
                latitude: 0.0,
                longitude: 1e300
            })
        );
        assert!(encode(&points(&[(90.0, 180.0), (-90.0, -180.0)]), Precision::Six).is_ok());
    }

    #[test]
    fn test_wrong_precision_scales_coordinates() {
        let encoded = encode(&points(&[(64.0, 10.0)]), Precision::Six).unwrap();
        let decoded = decode(&encoded, Precision::Five).unwrap();
        assert_eq!(decoded, points(&[(640.0, 100.0)]));
    }
}
