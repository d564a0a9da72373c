//
// Copyright (c) Pirmin Kalberer. All rights reserved.
//

//! Decoding GeoJSON from JSON text or already-parsed `serde_json` values.
//!
//! Dispatch is a closed, case-sensitive match on the `type` discriminator;
//! coordinate arrays are checked against the exact nesting depth their
//! geometry kind requires. Malformed input is rejected with a classified
//! [`Error`](crate::error::Error) carrying the JSON path of the offending
//! field, never silently coerced.

use serde_json::{Map, Value as Json};
use std::str::FromStr;

use crate::error::Error;
use crate::types::{Bbox, Crs, Feature, FeatureCollection, FeatureId, GeoJson, Geometry, Position, Value};

/// Default bound on geometry nesting (`GeometryCollection` inside
/// `GeometryCollection`). Exceeding it fails with `Error::NestingTooDeep`
/// instead of exhausting the call stack.
pub const MAX_NESTING: usize = 32;

/// Decoding from a parsed JSON value into the typed model.
pub trait FromJson: Sized {
    /// Decode with the default nesting limit ([`MAX_NESTING`]).
    fn from_json(json: &Json) -> Result<Self, Error> {
        Self::from_json_with_limit(json, MAX_NESTING)
    }

    /// Decode with a caller-chosen nesting limit.
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<Self, Error>;
}

impl FromJson for GeoJson {
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<GeoJson, Error> {
        Decoder::new(max_nesting).any(json)
    }
}

impl FromJson for Geometry {
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<Geometry, Error> {
        Decoder::new(max_nesting).geometry(json)
    }
}

impl FromJson for Feature {
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<Feature, Error> {
        Decoder::new(max_nesting).feature(json)
    }
}

impl FromJson for FeatureCollection {
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<FeatureCollection, Error> {
        Decoder::new(max_nesting).collection(json)
    }
}

impl FromJson for Crs {
    fn from_json_with_limit(json: &Json, max_nesting: usize) -> Result<Crs, Error> {
        Decoder::new(max_nesting).crs(json)
    }
}

macro_rules! impl_text_decode {
    ($t:ty) => {
        impl FromStr for $t {
            type Err = Error;

            fn from_str(s: &str) -> Result<$t, Error> {
                let json: Json = serde_json::from_str(s)?;
                <$t>::from_json(&json)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<$t, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let json: Json = serde::Deserialize::deserialize(deserializer)?;
                <$t>::from_json(&json).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_text_decode!(GeoJson);
impl_text_decode!(Geometry);
impl_text_decode!(Feature);
impl_text_decode!(FeatureCollection);

enum Seg {
    Field(&'static str),
    Index(usize),
}

/// Walks a JSON value tree, tracking the field path for error reports and
/// the geometry nesting depth for the recursion guard.
struct Decoder {
    max_nesting: usize,
    depth: usize,
    path: Vec<Seg>,
}

impl Decoder {
    fn new(max_nesting: usize) -> Decoder {
        Decoder {
            max_nesting,
            depth: 0,
            path: Vec::new(),
        }
    }

    fn path(&self) -> String {
        let mut out = String::from("$");
        for seg in &self.path {
            match seg {
                Seg::Field(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                Seg::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    fn unknown_type(&self, found: String) -> Error {
        Error::UnknownDiscriminator {
            path: self.path(),
            found,
        }
    }

    fn shape(&self, expected: &'static str, found: &Json) -> Error {
        Error::ShapeMismatch {
            path: self.path(),
            expected,
            found: describe(found).to_string(),
        }
    }

    fn missing(&self, expected: &'static str) -> Error {
        Error::ShapeMismatch {
            path: self.path(),
            expected,
            found: "missing".to_string(),
        }
    }

    fn invalid_position(&self, reason: String) -> Error {
        Error::InvalidPosition {
            path: self.path(),
            reason,
        }
    }

    fn invalid_crs(&self, reason: String) -> Error {
        Error::InvalidCrs {
            path: self.path(),
            reason,
        }
    }

    fn object<'a>(&self, json: &'a Json) -> Result<&'a Map<String, Json>, Error> {
        json.as_object()
            .ok_or_else(|| self.unknown_type(format!("{} where an object was expected", describe(json))))
    }

    fn type_tag<'a>(&self, obj: &'a Map<String, Json>) -> Result<&'a str, Error> {
        match obj.get("type") {
            Some(Json::String(tag)) => Ok(tag),
            Some(other) => Err(self.unknown_type(describe(other).to_string())),
            None => Err(self.unknown_type("missing".to_string())),
        }
    }

    /// Entry point for "any top-level GeoJSON object". The discriminator
    /// sets of geometries, Feature and FeatureCollection are disjoint, so
    /// this is a single total dispatch.
    fn any(&mut self, json: &Json) -> Result<GeoJson, Error> {
        let obj = self.object(json)?;
        let tag = self.type_tag(obj)?;
        match tag {
            "Feature" => Ok(GeoJson::Feature(self.feature_body(obj)?)),
            "FeatureCollection" => Ok(GeoJson::FeatureCollection(self.collection_body(obj)?)),
            _ => Ok(GeoJson::Geometry(self.geometry_body(obj, tag)?)),
        }
    }

    fn geometry(&mut self, json: &Json) -> Result<Geometry, Error> {
        let obj = self.object(json)?;
        let tag = self.type_tag(obj)?;
        self.geometry_body(obj, tag)
    }

    fn geometry_body(&mut self, obj: &Map<String, Json>, tag: &str) -> Result<Geometry, Error> {
        if self.depth == self.max_nesting {
            return Err(Error::NestingTooDeep {
                path: self.path(),
                limit: self.max_nesting,
            });
        }
        self.depth += 1;
        let value = match tag {
            "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon" => {
                self.path.push(Seg::Field("coordinates"));
                let coords = match obj.get("coordinates") {
                    Some(json) => json,
                    None => return Err(self.missing("a coordinates array")),
                };
                let value = match tag {
                    "Point" => Value::Point(self.position(coords)?),
                    "MultiPoint" => Value::MultiPoint(self.positions(coords)?),
                    "LineString" => Value::LineString(self.positions(coords)?),
                    "MultiLineString" => Value::MultiLineString(self.position_lists(coords)?),
                    "Polygon" => Value::Polygon(self.position_lists(coords)?),
                    _ => Value::MultiPolygon(self.polygons(coords)?),
                };
                self.path.pop();
                value
            }
            "GeometryCollection" => {
                self.path.push(Seg::Field("geometries"));
                let items = match obj.get("geometries") {
                    Some(Json::Array(items)) => items,
                    Some(other) => return Err(self.shape("an array of geometries", other)),
                    None => return Err(self.missing("an array of geometries")),
                };
                let mut geometries = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.path.push(Seg::Index(i));
                    geometries.push(self.geometry(item)?);
                    self.path.pop();
                }
                self.path.pop();
                Value::GeometryCollection(geometries)
            }
            _ => return Err(self.unknown_type(format!("{:?}", tag))),
        };
        self.depth -= 1;
        let crs = self.crs_slot(obj)?;
        let bbox = self.bbox_slot(obj)?;
        Ok(Geometry { value, crs, bbox })
    }

    /// One position: an array of exactly 2 or 3 finite numbers.
    fn position(&mut self, json: &Json) -> Result<Position, Error> {
        let items = match json {
            Json::Array(items) => items,
            other => return Err(self.shape("a position array", other)),
        };
        // An array element here means the coordinates are nested one level
        // deeper than the geometry kind allows.
        if items.iter().any(Json::is_array) {
            return Err(self.shape("a position array of numbers", json));
        }
        if items.len() != 2 && items.len() != 3 {
            return Err(self.invalid_position(format!("expected 2 or 3 elements, found {}", items.len())));
        }
        let mut axes = [0.0f64; 3];
        for (i, item) in items.iter().enumerate() {
            self.path.push(Seg::Index(i));
            axes[i] = match item.as_f64() {
                Some(number) if number.is_finite() => number,
                Some(_) => return Err(self.invalid_position("non-finite number".to_string())),
                None => {
                    return Err(self.invalid_position(format!("expected a number, found {}", describe(item))))
                }
            };
            self.path.pop();
        }
        let z = if items.len() == 3 { Some(axes[2]) } else { None };
        Ok(Position { x: axes[0], y: axes[1], z })
    }

    /// Depth 2: MultiPoint and LineString coordinates.
    fn positions(&mut self, json: &Json) -> Result<Vec<Position>, Error> {
        let items = match json {
            Json::Array(items) => items,
            other => return Err(self.shape("an array of positions", other)),
        };
        let mut positions = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push(Seg::Index(i));
            positions.push(self.position(item)?);
            self.path.pop();
        }
        Ok(positions)
    }

    /// Depth 3: MultiLineString coordinates and Polygon rings.
    fn position_lists(&mut self, json: &Json) -> Result<Vec<Vec<Position>>, Error> {
        let items = match json {
            Json::Array(items) => items,
            other => return Err(self.shape("an array of position lists", other)),
        };
        let mut lists = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push(Seg::Index(i));
            lists.push(self.positions(item)?);
            self.path.pop();
        }
        Ok(lists)
    }

    /// Depth 4: MultiPolygon coordinates.
    fn polygons(&mut self, json: &Json) -> Result<Vec<Vec<Vec<Position>>>, Error> {
        let items = match json {
            Json::Array(items) => items,
            other => return Err(self.shape("an array of polygons", other)),
        };
        let mut polygons = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push(Seg::Index(i));
            polygons.push(self.position_lists(item)?);
            self.path.pop();
        }
        Ok(polygons)
    }

    fn feature(&mut self, json: &Json) -> Result<Feature, Error> {
        let obj = self.object(json)?;
        match self.type_tag(obj)? {
            "Feature" => self.feature_body(obj),
            tag => Err(self.unknown_type(format!("{:?}", tag))),
        }
    }

    fn feature_body(&mut self, obj: &Map<String, Json>) -> Result<Feature, Error> {
        self.path.push(Seg::Field("geometry"));
        let geometry = match obj.get("geometry") {
            None | Some(Json::Null) => None,
            Some(json) => Some(self.geometry(json)?),
        };
        self.path.pop();

        self.path.push(Seg::Field("properties"));
        let properties = match obj.get("properties") {
            None | Some(Json::Null) => None,
            Some(Json::Object(props)) => Some(props.clone()),
            Some(other) => return Err(self.shape("an object of properties", other)),
        };
        self.path.pop();

        self.path.push(Seg::Field("id"));
        let id = match obj.get("id") {
            None | Some(Json::Null) => None,
            Some(Json::String(s)) => Some(FeatureId::String(s.clone())),
            Some(Json::Number(n)) => Some(FeatureId::Number(n.clone())),
            Some(other) => return Err(self.shape("a string or number id", other)),
        };
        self.path.pop();

        let crs = self.crs_slot(obj)?;
        let bbox = self.bbox_slot(obj)?;
        Ok(Feature {
            geometry,
            properties,
            id,
            crs,
            bbox,
        })
    }

    fn collection(&mut self, json: &Json) -> Result<FeatureCollection, Error> {
        let obj = self.object(json)?;
        match self.type_tag(obj)? {
            "FeatureCollection" => self.collection_body(obj),
            tag => Err(self.unknown_type(format!("{:?}", tag))),
        }
    }

    fn collection_body(&mut self, obj: &Map<String, Json>) -> Result<FeatureCollection, Error> {
        self.path.push(Seg::Field("features"));
        let items = match obj.get("features") {
            Some(Json::Array(items)) => items,
            Some(other) => return Err(self.shape("an array of features", other)),
            None => return Err(self.missing("an array of features")),
        };
        let mut features = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push(Seg::Index(i));
            let feature = self.object(item)?;
            match self.type_tag(feature)? {
                "Feature" => features.push(self.feature_body(feature)?),
                tag => return Err(self.unknown_type(format!("{:?}", tag))),
            }
            self.path.pop();
        }
        self.path.pop();

        let crs = self.crs_slot(obj)?;
        let bbox = self.bbox_slot(obj)?;
        Ok(FeatureCollection { features, crs, bbox })
    }

    /// The optional `crs` member of a top-level object. Absent or `null`
    /// means the default CRS and is not an error.
    fn crs_slot(&mut self, obj: &Map<String, Json>) -> Result<Option<Crs>, Error> {
        self.path.push(Seg::Field("crs"));
        let crs = match obj.get("crs") {
            None | Some(Json::Null) => None,
            Some(json) => Some(self.crs(json)?),
        };
        self.path.pop();
        Ok(crs)
    }

    fn crs(&mut self, json: &Json) -> Result<Crs, Error> {
        let obj = match json.as_object() {
            Some(obj) => obj,
            None => return Err(self.invalid_crs(format!("expected an object, found {}", describe(json)))),
        };
        let tag = match obj.get("type") {
            Some(Json::String(tag)) => tag.as_str(),
            Some(other) => return Err(self.invalid_crs(format!("`type` must be a string, found {}", describe(other)))),
            None => return Err(self.invalid_crs("missing `type`".to_string())),
        };
        let properties = match obj.get("properties") {
            Some(Json::Object(props)) => props,
            Some(other) => {
                return Err(self.invalid_crs(format!("`properties` must be an object, found {}", describe(other))))
            }
            None => return Err(self.invalid_crs("missing `properties`".to_string())),
        };
        match tag {
            "name" => match properties.get("name") {
                Some(Json::String(name)) => Ok(Crs::Named { name: name.clone() }),
                _ => Err(self.invalid_crs("missing `properties.name`".to_string())),
            },
            "link" => {
                let href = match properties.get("href") {
                    Some(Json::String(href)) => href.clone(),
                    _ => return Err(self.invalid_crs("missing `properties.href`".to_string())),
                };
                let link_type = match properties.get("type") {
                    None | Some(Json::Null) => None,
                    Some(Json::String(s)) => Some(s.clone()),
                    Some(other) => {
                        return Err(self.invalid_crs(format!("link `type` must be a string, found {}", describe(other))))
                    }
                };
                Ok(Crs::Linked { href, link_type })
            }
            _ => Err(self.invalid_crs(format!("unrecognized kind {:?}", tag))),
        }
    }

    /// The optional `bbox` member: an opaque array of numbers, stored as
    /// given.
    fn bbox_slot(&mut self, obj: &Map<String, Json>) -> Result<Option<Bbox>, Error> {
        self.path.push(Seg::Field("bbox"));
        let bbox = match obj.get("bbox") {
            None | Some(Json::Null) => None,
            Some(Json::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.path.push(Seg::Index(i));
                    match item.as_f64() {
                        Some(value) => values.push(value),
                        None => return Err(self.shape("a number", item)),
                    }
                    self.path.pop();
                }
                Some(values)
            }
            Some(other) => return Err(self.shape("an array of numbers", other)),
        };
        self.path.pop();
        Ok(bbox)
    }
}

fn describe(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
fn nested_collection(levels: usize) -> String {
    let mut json = r#"{"type":"Point","coordinates":[0.0,0.0]}"#.to_string();
    for _ in 0..levels {
        json = format!(r#"{{"type":"GeometryCollection","geometries":[{}]}}"#, json);
    }
    json
}

#[test]
fn test_decode_point() {
    // {"type":"Point","coordinates":[10,20]}
    let geojson: GeoJson = r#"{"type":"Point","coordinates":[10,20]}"#.parse().unwrap();
    assert_eq!(
        geojson,
        GeoJson::Geometry(Geometry::new(Value::Point(Position::new(10.0, 20.0))))
    );

    let geometry: Geometry = r#"{"type":"Point","coordinates":[10.0,20.0,5.5]}"#.parse().unwrap();
    assert_eq!(geometry.value, Value::Point(Position::with_z(10.0, 20.0, 5.5)));
}

#[test]
fn test_decode_each_kind() {
    let geometry: Geometry = r#"{"type":"MultiPoint","coordinates":[[10.0,20.0],[30.0,40.0]]}"#
        .parse()
        .unwrap();
    assert_eq!(
        geometry.value,
        Value::MultiPoint(vec![Position::new(10.0, 20.0), Position::new(30.0, 40.0)])
    );

    let geometry: Geometry = r#"{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}"#
        .parse()
        .unwrap();
    assert_eq!(
        geometry.value,
        Value::LineString(vec![Position::new(0.0, 0.0), Position::new(1.0, 1.0)])
    );

    let geometry: Geometry =
        r#"{"type":"MultiLineString","coordinates":[[[0.0,0.0],[1.0,1.0]],[[2.0,2.0],[3.0,3.0]]]}"#
            .parse()
            .unwrap();
    assert_eq!(
        geometry.value,
        Value::MultiLineString(vec![
            vec![Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            vec![Position::new(2.0, 2.0), Position::new(3.0, 3.0)],
        ])
    );

    // The ring's closing position repeats the first and must survive
    // unchanged.
    let geometry: Geometry =
        r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[4.0,0.0],[4.0,4.0],[0.0,0.0]]]}"#
            .parse()
            .unwrap();
    assert_eq!(
        geometry.value,
        Value::Polygon(vec![vec![
            Position::new(0.0, 0.0),
            Position::new(4.0, 0.0),
            Position::new(4.0, 4.0),
            Position::new(0.0, 0.0),
        ]])
    );

    let geometry: Geometry =
        r#"{"type":"MultiPolygon","coordinates":[[[[0.0,0.0],[1.0,0.0],[0.0,0.0]]]]}"#
            .parse()
            .unwrap();
    assert_eq!(
        geometry.value,
        Value::MultiPolygon(vec![vec![vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(0.0, 0.0),
        ]]])
    );

    let geometry: Geometry =
        r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1.0,2.0]}]}"#
            .parse()
            .unwrap();
    assert_eq!(
        geometry.value,
        Value::GeometryCollection(vec![Geometry::new(Value::Point(Position::new(1.0, 2.0)))])
    );
}

#[test]
fn test_discriminator_rejection() {
    // missing, non-string and unrecognized discriminators
    let err = r#"{"coordinates":[10.0,20.0]}"#.parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));

    let err = r#"{"type":7,"coordinates":[10.0,20.0]}"#.parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));

    let err = r#"{"type":"point","coordinates":[10.0,20.0]}"#.parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));

    let err = r#"{"type":"Pointt","coordinates":[10.0,20.0]}"#.parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));

    // a geometry-typed slot does not accept Feature
    let err = r#"{"type":"Feature","geometry":null,"properties":null}"#
        .parse::<Geometry>()
        .unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));

    let err = "[1,2,3]".parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));
}

#[test]
fn test_position_bounds() {
    for bad in [
        r#"{"type":"Point","coordinates":[10.0]}"#,
        r#"{"type":"Point","coordinates":[10.0,20.0,30.0,40.0]}"#,
        r#"{"type":"Point","coordinates":[10.0,"x"]}"#,
    ]
    .iter()
    {
        let err = bad.parse::<Geometry>().unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { .. }), "{}", bad);
    }

    assert!(r#"{"type":"Point","coordinates":[10.0,20.0]}"#.parse::<Geometry>().is_ok());
    assert!(r#"{"type":"Point","coordinates":[10.0,20.0,5.0]}"#.parse::<Geometry>().is_ok());
    // negative and fractional altitudes are fine
    assert!(r#"{"type":"Point","coordinates":[10.0,20.0,-0.5]}"#.parse::<Geometry>().is_ok());
}

#[test]
fn test_coordinate_shape_mismatch() {
    // each coordinate-bearing kind at one nesting level too shallow and
    // one too deep
    for bad in [
        r#"{"type":"Point","coordinates":10.0}"#,
        r#"{"type":"Point","coordinates":[[10.0,20.0]]}"#,
        r#"{"type":"MultiPoint","coordinates":[10.0,20.0]}"#,
        r#"{"type":"MultiPoint","coordinates":[[[10.0,20.0]]]}"#,
        r#"{"type":"LineString","coordinates":[0.0,0.0]}"#,
        r#"{"type":"LineString","coordinates":[[[0.0,0.0]]]}"#,
        r#"{"type":"MultiLineString","coordinates":[[0.0,0.0],[1.0,1.0]]}"#,
        r#"{"type":"MultiLineString","coordinates":[[[[0.0,0.0]]]]}"#,
        r#"{"type":"Polygon","coordinates":[[0.0,0.0],[1.0,1.0]]}"#,
        r#"{"type":"Polygon","coordinates":[[[[0.0,0.0]]]]}"#,
        r#"{"type":"MultiPolygon","coordinates":[[[0.0,0.0],[1.0,1.0]]]}"#,
        r#"{"type":"MultiPolygon","coordinates":[[[[[0.0,0.0]]]]]}"#,
        r#"{"type":"Point"}"#,
    ]
    .iter()
    {
        let err = bad.parse::<Geometry>().unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }), "{}", bad);
    }
}

#[test]
fn test_degenerate_linestring_is_accepted() {
    // shape is enforced, geometric validity is not
    let geometry: Geometry = r#"{"type":"LineString","coordinates":[[0.0,0.0]]}"#.parse().unwrap();
    assert_eq!(geometry.value, Value::LineString(vec![Position::new(0.0, 0.0)]));
}

#[test]
fn test_decode_feature() {
    let feature: Feature =
        r#"{"type":"Feature","id":7,"geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{"name":"A"}}"#
            .parse()
            .unwrap();
    assert_eq!(feature.id, Some(FeatureId::Number(7.into())));
    assert_eq!(
        feature.geometry,
        Some(Geometry::new(Value::Point(Position::new(1.0, 2.0))))
    );
    assert_eq!(feature.property("name"), Some(&Json::String("A".to_string())));

    // null geometry is an explicit absent slot, not an error
    let feature: Feature = r#"{"type":"Feature","geometry":null,"properties":{}}"#.parse().unwrap();
    assert_eq!(feature.geometry, None);
    assert_eq!(feature.properties, Some(Map::new()));

    // missing members decode like null ones
    let feature: Feature = r#"{"type":"Feature"}"#.parse().unwrap();
    assert_eq!(feature.geometry, None);
    assert_eq!(feature.properties, None);

    let err = r#"{"type":"Feature","geometry":null,"properties":3}"#
        .parse::<Feature>()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));

    let err = r#"{"type":"Feature","geometry":null,"properties":null,"id":true}"#
        .parse::<Feature>()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_decode_collection() {
    let collection: FeatureCollection = r#"{"type":"FeatureCollection","features":[]}"#.parse().unwrap();
    assert_eq!(collection.features.len(), 0);

    let err = r#"{"type":"FeatureCollection"}"#.parse::<FeatureCollection>().unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));

    let err = r#"{"type":"FeatureCollection","features":null}"#
        .parse::<FeatureCollection>()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));

    // only Feature objects belong in the features slot
    let err = r#"{"type":"FeatureCollection","features":[{"type":"Point","coordinates":[0.0,0.0]}]}"#
        .parse::<FeatureCollection>()
        .unwrap_err();
    assert!(matches!(err, Error::UnknownDiscriminator { .. }));
}

#[test]
fn test_decode_crs() {
    let geometry: Geometry =
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"name","properties":{"name":"EPSG:4326"}}}"#
            .parse()
            .unwrap();
    assert_eq!(geometry.crs, Some(Crs::Named { name: "EPSG:4326".to_string() }));

    let geometry: Geometry =
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"link","properties":{"href":"http://example.com/crs/42","type":"proj4"}}}"#
            .parse()
            .unwrap();
    assert_eq!(
        geometry.crs,
        Some(Crs::Linked {
            href: "http://example.com/crs/42".to_string(),
            link_type: Some("proj4".to_string()),
        })
    );

    // absent and null both mean the default CRS
    let geometry: Geometry = r#"{"type":"Point","coordinates":[1.0,2.0]}"#.parse().unwrap();
    assert_eq!(geometry.crs, None);
    let geometry: Geometry = r#"{"type":"Point","coordinates":[1.0,2.0],"crs":null}"#.parse().unwrap();
    assert_eq!(geometry.crs, None);

    for bad in [
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"properties":{"name":"EPSG:4326"}}}"#,
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"wgs84","properties":{}}}"#,
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"name","properties":{}}}"#,
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"name"}}"#,
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":{"type":"link","properties":{"type":"proj4"}}}"#,
        r#"{"type":"Point","coordinates":[1.0,2.0],"crs":17}"#,
    ]
    .iter()
    {
        let err = bad.parse::<Geometry>().unwrap_err();
        assert!(matches!(err, Error::InvalidCrs { .. }), "{}", bad);
    }
}

#[test]
fn test_decode_bbox() {
    let geometry: Geometry =
        r#"{"type":"Point","coordinates":[1.0,2.0],"bbox":[0.0,0.0,2.0,3.0]}"#.parse().unwrap();
    assert_eq!(geometry.bbox, Some(vec![0.0, 0.0, 2.0, 3.0]));

    let err = r#"{"type":"Point","coordinates":[1.0,2.0],"bbox":[0.0,"x"]}"#
        .parse::<Geometry>()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_nesting_guard() {
    let json: Json = serde_json::from_str(&nested_collection(4)).unwrap();
    let err = GeoJson::from_json_with_limit(&json, 4).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { limit: 4, .. }));
    assert!(GeoJson::from_json_with_limit(&json, 5).is_ok());

    // the default limit holds too
    let err = nested_collection(40).parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { limit: MAX_NESTING, .. }));
}

#[test]
fn test_malformed_json() {
    let err = "{not json".parse::<GeoJson>().unwrap_err();
    assert!(matches!(err, Error::MalformedJson(_)));
}

#[test]
fn test_error_paths() {
    let err = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[10.0,"x"]},"properties":null}]}"#
        .parse::<GeoJson>()
        .unwrap_err();
    match err {
        Error::InvalidPosition { path, .. } => {
            assert_eq!(path, "$.features[0].geometry.coordinates[1]")
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = r#"{"type":"MultiLineString","coordinates":[[[0.0,0.0],[1.0,1.0]],[17.0]]}"#
        .parse::<Geometry>()
        .unwrap_err();
    match err {
        Error::ShapeMismatch { path, .. } => assert_eq!(path, "$.coordinates[1][0]"),
        other => panic!("unexpected error: {:?}", other),
    }
}
