//
// Copyright (c) Pirmin Kalberer. All rights reserved.
//

use serde_json::{Map, Number, Value as Json};
use std::slice::Iter;

/// A bounding box, kept exactly as given in the input. Never computed or
/// validated beyond being an array of numbers.
pub type Bbox = Vec<f64>;

/// A single coordinate tuple: x is longitude, y is latitude, z is the
/// optional altitude. Axis order is fixed by the WGS84 lon/lat convention
/// and must not be swapped.
#[derive(PartialEq, Clone, Debug)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Position {
        Position { x, y, z: Some(z) }
    }
}

impl From<(f64, f64)> for Position {
    fn from(xy: (f64, f64)) -> Position {
        Position::new(xy.0, xy.1)
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from(xyz: (f64, f64, f64)) -> Position {
        Position::with_z(xyz.0, xyz.1, xyz.2)
    }
}

impl From<[f64; 2]> for Position {
    fn from(xy: [f64; 2]) -> Position {
        Position::new(xy[0], xy[1])
    }
}

impl From<[f64; 3]> for Position {
    fn from(xyz: [f64; 3]) -> Position {
        Position::with_z(xyz[0], xyz[1], xyz[2])
    }
}

/// Geometry payload, one variant per GeoJSON geometry kind. The variant
/// decides whether the wire object carries `coordinates` (and at which
/// nesting depth) or `geometries`.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Value {
    /// The `type` discriminator this payload is tagged with on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Point(_) => "Point",
            Value::MultiPoint(_) => "MultiPoint",
            Value::LineString(_) => "LineString",
            Value::MultiLineString(_) => "MultiLineString",
            Value::Polygon(_) => "Polygon",
            Value::MultiPolygon(_) => "MultiPolygon",
            Value::GeometryCollection(_) => "GeometryCollection",
        }
    }
}

/// A geometry object: the payload plus the optional `crs` and `bbox`
/// members any top-level GeoJSON object may carry.
#[derive(PartialEq, Clone, Debug)]
pub struct Geometry {
    pub value: Value,
    pub crs: Option<Crs>,
    pub bbox: Option<Bbox>,
}

impl Geometry {
    pub fn new(value: Value) -> Geometry {
        Geometry {
            value,
            crs: None,
            bbox: None,
        }
    }
}

impl From<Value> for Geometry {
    fn from(value: Value) -> Geometry {
        Geometry::new(value)
    }
}

/// A declared coordinate reference system. Absence (`None` in the
/// containing object) means the default CRS, WGS84.
#[derive(PartialEq, Clone, Debug)]
pub enum Crs {
    /// `{"type": "name", "properties": {"name": ...}}`
    Named { name: String },
    /// `{"type": "link", "properties": {"href": ..., "type": ...}}`
    Linked {
        href: String,
        link_type: Option<String>,
    },
}

/// A feature identifier: a JSON string or number.
#[derive(PartialEq, Clone, Debug)]
pub enum FeatureId {
    String(String),
    Number(Number),
}

/// A feature: an optional geometry (`null` on the wire is an explicit
/// absent slot, not an error) plus a free-form properties bag.
#[derive(PartialEq, Clone, Debug)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<Map<String, Json>>,
    pub id: Option<FeatureId>,
    pub crs: Option<Crs>,
    pub bbox: Option<Bbox>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Feature {
        Feature {
            geometry: Some(geometry),
            properties: None,
            id: None,
            crs: None,
            bbox: None,
        }
    }

    /// Look up a property value by key.
    pub fn property(&self, key: &str) -> Option<&Json> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }
}

/// An ordered collection of features. Order is significant and survives
/// round-tripping.
#[derive(PartialEq, Clone, Debug)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub crs: Option<Crs>,
    pub bbox: Option<Bbox>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            features,
            crs: None,
            bbox: None,
        }
    }

    pub fn iter(&self) -> Iter<Feature> {
        self.features.iter()
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Any top-level GeoJSON object.
#[derive(PartialEq, Clone, Debug)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl From<Value> for GeoJson {
    fn from(value: Value) -> GeoJson {
        GeoJson::Geometry(Geometry::new(value))
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> GeoJson {
        GeoJson::Geometry(geometry)
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> GeoJson {
        GeoJson::Feature(feature)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> GeoJson {
        GeoJson::FeatureCollection(collection)
    }
}
