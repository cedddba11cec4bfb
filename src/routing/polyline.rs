//! Encoded polyline decoding (precision 5)
//!
//! OSRM returns route geometry as a Google encoded polyline: latitude and
//! longitude deltas against the previous point, zig-zag encoded into 5-bit
//! chunks offset by 63.

use thiserror::Error;

use crate::models::Coordinate;

const PRECISION: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode polyline: {0}")]
pub struct PolylineError(String);

/// Decode an encoded polyline into coordinates
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let line = ::polyline::decode_polyline(encoded, PRECISION)
        .map_err(|e| PolylineError(e.to_string()))?;

    // geo-types stores x = longitude, y = latitude
    Ok(line
        .0
        .into_iter()
        .map(|point| Coordinate::new(point.y, point.x))
        .collect())
}
