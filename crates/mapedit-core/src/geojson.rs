//! GeoJSON data model
//!
//! Typed mirror of the subset of GeoJSON the edit modes operate on. All types
//! serialize to and from the standard wire format with serde.

use glam::DVec2;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::path::RingAddress;

/// A coordinate: longitude, latitude and optional elevation
///
/// Serialized as a 2- or 3-element JSON array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position {
    /// Longitude (or projected x)
    pub lng: f64,
    /// Latitude (or projected y)
    pub lat: f64,
    /// Optional elevation
    pub alt: Option<f64>,
}

impl Position {
    /// Create a 2D position
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng,
            lat,
            alt: None,
        }
    }

    /// Create a position with elevation
    pub const fn with_alt(lng: f64, lat: f64, alt: f64) -> Self {
        Self {
            lng,
            lat,
            alt: Some(alt),
        }
    }

    /// Horizontal components as a vector
    pub fn to_vec2(&self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    /// Replace the horizontal components, keeping the elevation
    pub fn with_vec2(&self, xy: DVec2) -> Self {
        Self {
            lng: xy.x,
            lat: xy.y,
            alt: self.alt,
        }
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<[f64; 2]> for Position {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lng, lat] => Ok(Self::new(*lng, *lat)),
            [lng, lat, alt] => Ok(Self::with_alt(*lng, *lat, *alt)),
            other => Err(format!(
                "position must have 2 or 3 coordinates, got {}",
                other.len()
            )),
        }
    }
}

impl From<Position> for Vec<f64> {
    fn from(p: Position) -> Self {
        match p.alt {
            Some(alt) => vec![p.lng, p.lat, alt],
            None => vec![p.lng, p.lat],
        }
    }
}

/// A GeoJSON geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single position
    Point(Position),
    /// Unconnected positions
    MultiPoint(Vec<Position>),
    /// Open polyline
    LineString(Vec<Position>),
    /// Several polylines
    MultiLineString(Vec<Vec<Position>>),
    /// Closed rings, the first is the exterior
    Polygon(Vec<Vec<Position>>),
    /// Several polygons
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Whether the geometry is made of closed rings
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    /// Collect every position in document order
    pub fn positions(&self) -> Vec<Position> {
        match self {
            Geometry::Point(p) => vec![*p],
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.clone(),
            Geometry::MultiLineString(rings) | Geometry::Polygon(rings) => {
                rings.iter().flatten().copied().collect()
            }
            Geometry::MultiPolygon(polygons) => polygons.iter().flatten().flatten().copied().collect(),
        }
    }

    /// Build a new geometry by mapping every position
    pub fn map_positions(&self, f: impl Fn(&Position) -> Position) -> Geometry {
        let map_line = |line: &Vec<Position>| line.iter().map(&f).collect::<Vec<_>>();
        match self {
            Geometry::Point(p) => Geometry::Point(f(p)),
            Geometry::MultiPoint(ps) => Geometry::MultiPoint(map_line(ps)),
            Geometry::LineString(ps) => Geometry::LineString(map_line(ps)),
            Geometry::MultiLineString(rings) => {
                Geometry::MultiLineString(rings.iter().map(map_line).collect())
            }
            Geometry::Polygon(rings) => Geometry::Polygon(rings.iter().map(map_line).collect()),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| rings.iter().map(map_line).collect())
                    .collect(),
            ),
        }
    }

    /// All addressable rings (or lines) with their address
    ///
    /// Polygon rings and MultiLineString lines use [`RingAddress::Ring`],
    /// MultiPolygon rings use [`RingAddress::MultiRing`]. Other geometry
    /// types have no addressable rings.
    pub fn rings(&self) -> Vec<(RingAddress, &[Position])> {
        match self {
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => rings
                .iter()
                .enumerate()
                .map(|(ring, coords)| (RingAddress::Ring { ring }, coords.as_slice()))
                .collect(),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .enumerate()
                .flat_map(|(polygon, rings)| {
                    rings.iter().enumerate().map(move |(ring, coords)| {
                        (RingAddress::MultiRing { polygon, ring }, coords.as_slice())
                    })
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get the ring at an address
    pub fn ring(&self, address: RingAddress) -> Option<&[Position]> {
        match (self, address) {
            (Geometry::Polygon(rings) | Geometry::MultiLineString(rings), RingAddress::Ring { ring }) => {
                rings.get(ring).map(Vec::as_slice)
            }
            (Geometry::MultiPolygon(polygons), RingAddress::MultiRing { polygon, ring }) => polygons
                .get(polygon)
                .and_then(|rings| rings.get(ring))
                .map(Vec::as_slice),
            _ => None,
        }
    }

    /// Get a mutable ring at an address
    pub fn ring_mut(&mut self, address: RingAddress) -> Option<&mut Vec<Position>> {
        match (self, address) {
            (Geometry::Polygon(rings) | Geometry::MultiLineString(rings), RingAddress::Ring { ring }) => {
                rings.get_mut(ring)
            }
            (Geometry::MultiPolygon(polygons), RingAddress::MultiRing { polygon, ring }) => {
                polygons.get_mut(polygon).and_then(|rings| rings.get_mut(ring))
            }
            _ => None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Optional feature identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Feature geometry
    pub geometry: Geometry,
    /// Arbitrary properties (`null` deserializes as empty)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Create a feature without properties
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    /// Attach a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A GeoJSON feature collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Ordered features
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create a collection from features
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_wire_format() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[0,1],[1,1],[0,0]]]},
                "properties": null
            }]
        }"#;
        let fc: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(fc.len(), 1);
        assert!(fc.features[0].properties.is_empty());
        match &fc.features[0].geometry {
            Geometry::Polygon(rings) => assert_eq!(rings[0][2], Position::new(1.0, 1.0)),
            other => panic!("unexpected geometry {other:?}"),
        }

        let value = serde_json::to_value(&fc).unwrap();
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn test_position_arity() {
        let p: Position = serde_json::from_str("[1.5, 2.5, 30]").unwrap();
        assert_eq!(p.alt, Some(30.0));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,2.5,30.0]");

        assert!(serde_json::from_str::<Position>("[1.0]").is_err());
        assert!(serde_json::from_str::<Position>("[1, 2, 3, 4]").is_err());
    }

    #[test]
    fn test_multipolygon_rings() {
        let square = vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(0.0, 0.0),
        ];
        let geometry = Geometry::MultiPolygon(vec![vec![square.clone()], vec![square.clone(), square]]);
        let rings = geometry.rings();
        assert_eq!(rings.len(), 3);
        assert_eq!(rings[2].0, RingAddress::MultiRing { polygon: 1, ring: 1 });
        assert!(geometry.ring(RingAddress::Ring { ring: 0 }).is_none());
    }

    #[test]
    fn test_map_positions_keeps_elevation() {
        let geometry = Geometry::LineString(vec![Position::with_alt(1.0, 2.0, 5.0)]);
        let moved = geometry.map_positions(|p| p.with_vec2(p.to_vec2() * 2.0));
        assert_eq!(moved.positions(), vec![Position::with_alt(2.0, 4.0, 5.0)]);
    }
}
