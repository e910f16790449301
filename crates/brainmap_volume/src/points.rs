//! Decoding of point observations
//!
//! Points arrive as `"x,y,z"` strings in stereotaxic millimetre space,
//! usually wrapped in a JSON document of the form
//! `{"coordinates": ["x,y,z", ...]}`. A malformed record is reported as a
//! [`DecodeError`] and skipped; the rest of the batch still decodes.

use std::fmt;
use serde::{Serialize, Deserialize};
use brainmap_math::Vec3;

/// Why a coordinate record could not be decoded
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    /// Record did not have exactly three components
    WrongArity(usize),
    /// A component was not a number
    NotNumeric(String),
    /// A component parsed to NaN or infinity
    NonFinite,
}

/// A single coordinate record that failed to decode
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    /// Position of the record in its batch
    pub index: usize,
    /// The offending record text
    pub record: String,
    pub kind: DecodeErrorKind,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DecodeErrorKind::WrongArity(n) => write!(
                f,
                "Coordinate #{} '{}' has {} components, expected 3",
                self.index, self.record, n
            ),
            DecodeErrorKind::NotNumeric(part) => write!(
                f,
                "Coordinate #{} '{}' has non-numeric component '{}'",
                self.index, self.record, part
            ),
            DecodeErrorKind::NonFinite => write!(
                f,
                "Coordinate #{} '{}' is not finite",
                self.index, self.record
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// The coordinates document could not be parsed at all
#[derive(Debug)]
pub enum PayloadError {
    Json(serde_json::Error),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Json(err) => write!(f, "Coordinates payload error: {}", err),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::Json(err)
    }
}

/// JSON document listing point coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesPayload {
    #[serde(default)]
    pub coordinates: Vec<String>,
}

impl CoordinatesPayload {
    /// Parse a payload from JSON text
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode every record, collecting failures alongside the good points
    pub fn decode(&self) -> DecodedPoints {
        decode_coordinates(&self.coordinates)
    }
}

/// Result of decoding a batch of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedPoints {
    pub points: Vec<Vec3>,
    pub errors: Vec<DecodeError>,
}

/// Parse one `"x,y,z"` record
pub fn parse_coordinate(index: usize, record: &str) -> Result<Vec3, DecodeError> {
    let fail = |kind| DecodeError {
        index,
        record: record.to_string(),
        kind,
    };

    let parts: Vec<&str> = record.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(fail(DecodeErrorKind::WrongArity(parts.len())));
    }

    let mut p = Vec3::ZERO;
    for (axis, part) in parts.iter().enumerate() {
        let value: f32 = part
            .parse()
            .map_err(|_| fail(DecodeErrorKind::NotNumeric(part.to_string())))?;
        if !value.is_finite() {
            return Err(fail(DecodeErrorKind::NonFinite));
        }
        p[axis] = value;
    }
    Ok(p)
}

/// Decode a batch of records, skipping and reporting malformed ones
pub fn decode_coordinates<S: AsRef<str>>(records: &[S]) -> DecodedPoints {
    let mut decoded = DecodedPoints {
        points: Vec::with_capacity(records.len()),
        errors: Vec::new(),
    };
    for (index, record) in records.iter().enumerate() {
        match parse_coordinate(index, record.as_ref()) {
            Ok(p) => decoded.points.push(p),
            Err(err) => {
                log::warn!("Skipping coordinate: {}", err);
                decoded.errors.push(err);
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(0, "-16,-16,18").unwrap(), Vec3::new(-16.0, -16.0, 18.0));
        assert_eq!(parse_coordinate(0, " 1.5 , 2 ,-3.25").unwrap(), Vec3::new(1.5, 2.0, -3.25));
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse_coordinate(4, "1,2").unwrap_err();
        assert_eq!(err.index, 4);
        assert_eq!(err.kind, DecodeErrorKind::WrongArity(2));
        let err = parse_coordinate(0, "1,2,3,4").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::WrongArity(4));
    }

    #[test]
    fn test_not_numeric() {
        let err = parse_coordinate(0, "1,abc,3").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::NotNumeric("abc".to_string()));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_non_finite() {
        let err = parse_coordinate(0, "1,NaN,3").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::NonFinite);
        let err = parse_coordinate(0, "inf,0,0").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::NonFinite);
    }

    #[test]
    fn test_decode_batch_skips_bad_records() {
        let decoded = decode_coordinates(&["0,0,0", "bad", "4,8,-12", ""]);
        assert_eq!(decoded.points, vec![Vec3::ZERO, Vec3::new(4.0, 8.0, -12.0)]);
        assert_eq!(decoded.errors.len(), 2);
        assert_eq!(decoded.errors[0].index, 1);
        assert_eq!(decoded.errors[1].index, 3);
    }

    #[test]
    fn test_payload_from_json() {
        let payload = CoordinatesPayload::from_json(r#"{"coordinates": ["1,2,3", "x"]}"#).unwrap();
        let decoded = payload.decode();
        assert_eq!(decoded.points.len(), 1);
        assert_eq!(decoded.errors.len(), 1);
    }

    #[test]
    fn test_payload_missing_field_is_empty() {
        let payload = CoordinatesPayload::from_json("{}").unwrap();
        assert!(payload.coordinates.is_empty());
    }

    #[test]
    fn test_payload_invalid_json() {
        let err = CoordinatesPayload::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("payload"));
    }
}
