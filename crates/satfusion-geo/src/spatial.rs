use crate::models::{to_geo_geometry, to_geo_point, Coordinate, Geometry};
use geo::algorithm::centroid::Centroid;
use geo::{Distance, GeodesicArea, Haversine};

/// Approximate geodesic area of a selection in square kilometres.
///
/// Points have no area.
pub fn area_km2(geometry: &Geometry) -> f64 {
    match to_geo_geometry(geometry) {
        geo::Geometry::Polygon(polygon) => polygon.geodesic_area_unsigned() / 1_000_000.0,
        _ => 0.0,
    }
}

/// Centre of the selection as (lng, lat)
pub fn centroid(geometry: &Geometry) -> Option<Coordinate> {
    let point = to_geo_geometry(geometry).centroid()?;
    Coordinate::new(point.y(), point.x()).ok()
}

/// Great-circle distance between two coordinates in kilometres
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine.distance(to_geo_point(a), to_geo_point(b)) / 1000.0
}

/// Diagonal of the selection in kilometres (zero for a point)
pub fn extent_km(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Point(_) => 0.0,
        Geometry::BoundingBox(bbox) => distance_km(&bbox.min(), &bbox.max()),
    }
}
