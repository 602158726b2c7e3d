//! Query geometry types.
//!
//! A selection is either a single point or an axis-aligned bounding box.
//! Both serialize to the GeoJSON shape the analysis service expects:
//! `{"type":"Point","coordinates":[lng,lat]}` and
//! `{"type":"Polygon","coordinates":[[[lng,lat] x5]]}`.

use crate::error::{FusionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS 84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Coordinate {
    lng: f64,
    lat: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(FusionError::InvalidCoordinate {
                lat,
                lng,
                reason: "coordinates must be finite".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(FusionError::InvalidCoordinate {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(FusionError::InvalidCoordinate {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]".to_string(),
            });
        }
        Ok(Self { lng, lat })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// GeoJSON position order: `[lng, lat]`
    pub fn position(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        coord.position()
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = FusionError;

    fn try_from(position: [f64; 2]) -> Result<Self> {
        Coordinate::new(position[1], position[0])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Axis-aligned bounding box with `min <= max` on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Coordinate,
    max: Coordinate,
}

impl BoundingBox {
    /// Build a box from two opposite corners given in any order
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        let min = Coordinate { lng: a.lng.min(b.lng), lat: a.lat.min(b.lat) };
        let max = Coordinate { lng: a.lng.max(b.lng), lat: a.lat.max(b.lat) };
        Self { min, max }
    }

    pub fn min(&self) -> Coordinate {
        self.min
    }

    pub fn max(&self) -> Coordinate {
        self.max
    }

    /// Closed exterior ring, counter-clockwise from the south-west corner
    pub fn ring(&self) -> [[f64; 2]; 5] {
        let (lng1, lat1) = (self.min.lng, self.min.lat);
        let (lng2, lat2) = (self.max.lng, self.max.lat);
        [[lng1, lat1], [lng2, lat1], [lng2, lat2], [lng1, lat2], [lng1, lat1]]
    }
}

/// The active query geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeometryWire", try_from = "GeometryWire")]
pub enum Geometry {
    Point(Coordinate),
    BoundingBox(BoundingBox),
}

impl Geometry {
    /// Create a Point geometry from map-click order (lat, lng)
    pub fn point(lat: f64, lng: f64) -> Result<Self> {
        Ok(Geometry::Point(Coordinate::new(lat, lng)?))
    }

    /// Create a bounding box from two opposite corners
    pub fn bounding_box(a: Coordinate, b: Coordinate) -> Self {
        Geometry::BoundingBox(BoundingBox::from_corners(a, b))
    }

    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::BoundingBox(_) => "Polygon",
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point(_))
    }

    /// Parse a GeoJSON geometry string
    pub fn from_geojson_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| FusionError::InvalidGeometry {
            reason: e.to_string(),
        })
    }

    /// Convert to serde_json::Value (GeoJSON)
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(coord) => write!(f, "Point ({})", coord),
            Geometry::BoundingBox(bbox) => write!(f, "Area ({} .. {})", bbox.min, bbox.max),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeometryWire {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl From<Geometry> for GeometryWire {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Point(coord) => GeometryWire::Point { coordinates: coord.position() },
            Geometry::BoundingBox(bbox) => GeometryWire::Polygon {
                coordinates: vec![bbox.ring().to_vec()],
            },
        }
    }
}

impl TryFrom<GeometryWire> for Geometry {
    type Error = FusionError;

    fn try_from(wire: GeometryWire) -> Result<Self> {
        match wire {
            GeometryWire::Point { coordinates } => {
                Ok(Geometry::Point(Coordinate::try_from(coordinates)?))
            }
            GeometryWire::Polygon { coordinates } => {
                let ring = match coordinates.as_slice() {
                    [ring] => ring,
                    _ => {
                        return Err(FusionError::InvalidGeometry {
                            reason: format!(
                                "expected exactly one ring, found {}",
                                coordinates.len()
                            ),
                        })
                    }
                };
                if ring.len() != 5 {
                    return Err(FusionError::InvalidGeometry {
                        reason: format!("bounding box ring must have 5 positions, found {}", ring.len()),
                    });
                }

                let corners = ring
                    .iter()
                    .map(|position| Coordinate::try_from(*position))
                    .collect::<Result<Vec<_>>>()?;
                let bbox = corners[1..].iter().fold(
                    BoundingBox { min: corners[0], max: corners[0] },
                    |acc, c| BoundingBox {
                        min: Coordinate { lng: acc.min.lng.min(c.lng), lat: acc.min.lat.min(c.lat) },
                        max: Coordinate { lng: acc.max.lng.max(c.lng), lat: acc.max.lat.max(c.lat) },
                    },
                );

                if !is_box_ring(&bbox, ring) {
                    return Err(FusionError::InvalidGeometry {
                        reason: "polygon is not an axis-aligned bounding box ring".to_string(),
                    });
                }
                Ok(Geometry::BoundingBox(bbox))
            }
        }
    }
}

/// A closed ring visiting every corner of `bbox` along its edges.
///
/// Any start corner and either winding is accepted.
fn is_box_ring(bbox: &BoundingBox, ring: &[[f64; 2]]) -> bool {
    let corners = bbox.ring();
    let is_corner = |p: &[f64; 2]| corners.contains(p);

    ring.first() == ring.last()
        && ring.iter().all(is_corner)
        && corners[..4].iter().all(|c| ring[..4].contains(c))
        && ring.windows(2).all(|w| w[0][0] == w[1][0] || w[0][1] == w[1][1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_serialization() {
        let point = Geometry::point(28.6, 77.2).unwrap();
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(value, json!({"type": "Point", "coordinates": [77.2, 28.6]}));

        let parsed: Geometry = serde_json::from_value(value).unwrap();
        assert_eq!(point, parsed);
    }

    #[test]
    fn test_bounding_box_ring() {
        let a = Coordinate::new(28.7, 77.3).unwrap();
        let b = Coordinate::new(28.5, 77.1).unwrap();
        let geometry = Geometry::bounding_box(a, b);

        let value = serde_json::to_value(geometry).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Polygon",
                "coordinates": [[[77.1, 28.5], [77.3, 28.5], [77.3, 28.7], [77.1, 28.7], [77.1, 28.5]]]
            })
        );

        let parsed: Geometry = serde_json::from_value(value).unwrap();
        assert_eq!(geometry, parsed);
    }

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_non_rectangular_polygon() {
        let triangle = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.5, 2.0], [0.0, 0.0]]]
        });
        assert!(serde_json::from_value::<Geometry>(triangle).is_err());

        let holes = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]],
                [[0.2, 0.2], [0.4, 0.2], [0.4, 0.4], [0.2, 0.4], [0.2, 0.2]]
            ]
        });
        assert!(serde_json::from_value::<Geometry>(holes).is_err());
    }

    #[test]
    fn test_accepts_any_box_winding() {
        let expected = Geometry::bounding_box(
            Coordinate::new(28.5, 77.1).unwrap(),
            Coordinate::new(28.7, 77.3).unwrap(),
        );

        // North-east start, clockwise
        let clockwise = json!({
            "type": "Polygon",
            "coordinates": [[[77.3, 28.7], [77.3, 28.5], [77.1, 28.5], [77.1, 28.7], [77.3, 28.7]]]
        });
        assert_eq!(serde_json::from_value::<Geometry>(clockwise).unwrap(), expected);

        // North-west start, counter-clockwise
        let north_west = json!({
            "type": "Polygon",
            "coordinates": [[[77.1, 28.7], [77.1, 28.5], [77.3, 28.5], [77.3, 28.7], [77.1, 28.7]]]
        });
        assert_eq!(serde_json::from_value::<Geometry>(north_west).unwrap(), expected);

        // Corners visited across the diagonal
        let bowtie = json!({
            "type": "Polygon",
            "coordinates": [[[77.1, 28.5], [77.3, 28.7], [77.3, 28.5], [77.1, 28.7], [77.1, 28.5]]]
        });
        assert!(serde_json::from_value::<Geometry>(bowtie).is_err());

        let open = json!({
            "type": "Polygon",
            "coordinates": [[[77.1, 28.5], [77.3, 28.5], [77.3, 28.7], [77.1, 28.7], [77.3, 28.7]]]
        });
        assert!(serde_json::from_value::<Geometry>(open).is_err());
    }

    #[test]
    fn test_from_geojson_str() {
        let geometry = Geometry::from_geojson_str(r#"{"type":"Point","coordinates":[115.0,-8.5]}"#)
            .unwrap();
        assert!(geometry.is_point());
        assert_eq!(geometry.type_name(), "Point");

        assert!(Geometry::from_geojson_str(r#"{"type":"Point","coordinates":[200.0,0.0]}"#).is_err());
        assert!(Geometry::from_geojson_str("not json").is_err());
    }
}
