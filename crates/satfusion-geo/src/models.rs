//! Geometry models for satfusion-geo.
//!
//! This module re-exports canonical types from `satfusion-core` and provides
//! conversions to the `geo` crate types used for computation.

use geo::{coord, Geometry as GeoGeometry, Point, Rect};

pub use satfusion_core::models::{BoundingBox, Coordinate, Geometry};

/// Convert a canonical Geometry to a geo::Geometry
pub fn to_geo_geometry(geom: &Geometry) -> GeoGeometry {
    match geom {
        Geometry::Point(c) => GeoGeometry::Point(to_geo_point(c)),
        Geometry::BoundingBox(bbox) => GeoGeometry::Polygon(to_geo_rect(bbox).to_polygon()),
    }
}

/// Convert a coordinate to a geo::Point (x = lng, y = lat)
pub fn to_geo_point(c: &Coordinate) -> Point {
    Point::new(c.lng(), c.lat())
}

/// Convert a bounding box to a geo::Rect
pub fn to_geo_rect(bbox: &BoundingBox) -> Rect {
    Rect::new(
        coord! { x: bbox.min().lng(), y: bbox.min().lat() },
        coord! { x: bbox.max().lng(), y: bbox.max().lat() },
    )
}
