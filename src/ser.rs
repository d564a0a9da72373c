//
// Copyright (c) Pirmin Kalberer. All rights reserved.
//

//! Encoding the typed model into `serde_json` values and JSON text.
//!
//! Encoding is total and pure: any well-formed in-memory value produces a
//! JSON object with its `type` discriminator written first, and decoding
//! that object yields the value back unchanged.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Number, Value as Json};
use std::fmt;

use crate::types::{Bbox, Crs, Feature, FeatureCollection, FeatureId, GeoJson, Geometry, Position, Value};

/// Encoding into a `serde_json` value.
pub trait ToJson {
    /// Build the JSON value for this object.
    fn to_json(&self) -> Json;
}

impl ToJson for Position {
    fn to_json(&self) -> Json {
        let mut axes = vec![number(self.x), number(self.y)];
        if let Some(z) = self.z {
            axes.push(number(z));
        }
        Json::Array(axes)
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Json {
        Json::Object(geometry_object(self))
    }
}

impl ToJson for Geometry {
    fn to_json(&self) -> Json {
        let mut obj = geometry_object(&self.value);
        append_crs_bbox(&mut obj, &self.crs, &self.bbox);
        Json::Object(obj)
    }
}

impl ToJson for Crs {
    fn to_json(&self) -> Json {
        match self {
            Crs::Named { name } => json!({ "type": "name", "properties": { "name": name } }),
            Crs::Linked { href, link_type } => {
                let mut properties = Map::new();
                properties.insert("href".to_string(), Json::String(href.clone()));
                if let Some(link_type) = link_type {
                    properties.insert("type".to_string(), Json::String(link_type.clone()));
                }
                let mut obj = Map::new();
                obj.insert("type".to_string(), Json::String("link".to_string()));
                obj.insert("properties".to_string(), Json::Object(properties));
                Json::Object(obj)
            }
        }
    }
}

impl ToJson for FeatureId {
    fn to_json(&self) -> Json {
        match self {
            FeatureId::String(s) => Json::String(s.clone()),
            FeatureId::Number(n) => Json::Number(n.clone()),
        }
    }
}

impl ToJson for Feature {
    fn to_json(&self) -> Json {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Json::String("Feature".to_string()));
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), id.to_json());
        }
        // geometry and properties are emitted even when absent; an absent
        // slot is an explicit null on the wire
        obj.insert(
            "geometry".to_string(),
            match &self.geometry {
                Some(geometry) => geometry.to_json(),
                None => Json::Null,
            },
        );
        obj.insert(
            "properties".to_string(),
            match &self.properties {
                Some(properties) => Json::Object(properties.clone()),
                None => Json::Null,
            },
        );
        append_crs_bbox(&mut obj, &self.crs, &self.bbox);
        Json::Object(obj)
    }
}

impl ToJson for FeatureCollection {
    fn to_json(&self) -> Json {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Json::String("FeatureCollection".to_string()));
        obj.insert(
            "features".to_string(),
            Json::Array(self.features.iter().map(|feature| feature.to_json()).collect()),
        );
        append_crs_bbox(&mut obj, &self.crs, &self.bbox);
        Json::Object(obj)
    }
}

impl ToJson for GeoJson {
    fn to_json(&self) -> Json {
        match self {
            GeoJson::Geometry(geometry) => geometry.to_json(),
            GeoJson::Feature(feature) => feature.to_json(),
            GeoJson::FeatureCollection(collection) => collection.to_json(),
        }
    }
}

/// The tagged object for a geometry payload: `type` first, then
/// `coordinates` or `geometries` depending on the variant.
fn geometry_object(value: &Value) -> Map<String, Json> {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Json::String(value.type_name().to_string()));
    let (field, payload) = match value {
        Value::Point(position) => ("coordinates", position.to_json()),
        Value::MultiPoint(positions) => ("coordinates", positions_json(positions)),
        Value::LineString(positions) => ("coordinates", positions_json(positions)),
        Value::MultiLineString(lists) => ("coordinates", position_lists_json(lists)),
        Value::Polygon(rings) => ("coordinates", position_lists_json(rings)),
        Value::MultiPolygon(polygons) => (
            "coordinates",
            Json::Array(polygons.iter().map(|lists| position_lists_json(lists)).collect()),
        ),
        Value::GeometryCollection(geometries) => (
            "geometries",
            Json::Array(geometries.iter().map(|geometry| geometry.to_json()).collect()),
        ),
    };
    obj.insert(field.to_string(), payload);
    obj
}

fn positions_json(positions: &[Position]) -> Json {
    Json::Array(positions.iter().map(|position| position.to_json()).collect())
}

fn position_lists_json(lists: &[Vec<Position>]) -> Json {
    Json::Array(lists.iter().map(|positions| positions_json(positions)).collect())
}

fn append_crs_bbox(obj: &mut Map<String, Json>, crs: &Option<Crs>, bbox: &Option<Bbox>) {
    if let Some(crs) = crs {
        obj.insert("crs".to_string(), crs.to_json());
    }
    if let Some(bbox) = bbox {
        obj.insert(
            "bbox".to_string(),
            Json::Array(bbox.iter().map(|value| number(*value)).collect()),
        );
    }
}

// from_f64 only rejects non-finite values, which the decoder never
// produces; a hand-built non-finite axis still encodes (as null) rather
// than panic.
fn number(value: f64) -> Json {
    Number::from_f64(value).map(Json::Number).unwrap_or(Json::Null)
}

macro_rules! impl_text_encode {
    ($t:ty) => {
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.to_json().to_string())
            }
        }

        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.to_json().serialize(serializer)
            }
        }
    };
}

impl_text_encode!(GeoJson);
impl_text_encode!(Geometry);
impl_text_encode!(Feature);
impl_text_encode!(FeatureCollection);

#[test]
fn test_encode_point() {
    // 'POINT (10 -20)'
    let point = Geometry::new(Value::Point(Position::new(10.0, -20.0)));
    assert_eq!(point.to_string(), r#"{"type":"Point","coordinates":[10.0,-20.0]}"#);

    // 'POINT Z (10 -20 99)'
    let point = Geometry::new(Value::Point(Position::with_z(10.0, -20.0, 99.0)));
    assert_eq!(point.to_string(), r#"{"type":"Point","coordinates":[10.0,-20.0,99.0]}"#);

    // 'SRID=4326;POINT (10 -20)'
    let point = Geometry {
        value: Value::Point(Position::new(10.0, -20.0)),
        crs: Some(Crs::Named { name: "EPSG:4326".to_string() }),
        bbox: None,
    };
    assert_eq!(
        point.to_string(),
        r#"{"type":"Point","coordinates":[10.0,-20.0],"crs":{"type":"name","properties":{"name":"EPSG:4326"}}}"#
    );
}

#[test]
fn test_encode_geometries() {
    let line = Geometry::new(Value::LineString(vec![
        Position::new(10.0, -20.0),
        Position::new(0.0, -0.5),
    ]));
    assert_eq!(
        line.to_string(),
        r#"{"type":"LineString","coordinates":[[10.0,-20.0],[0.0,-0.5]]}"#
    );

    let polygon = Geometry::new(Value::Polygon(vec![vec![
        Position::new(0.0, 0.0),
        Position::new(4.0, 0.0),
        Position::new(4.0, 4.0),
        Position::new(0.0, 0.0),
    ]]));
    assert_eq!(
        polygon.to_string(),
        r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[4.0,0.0],[4.0,4.0],[0.0,0.0]]]}"#
    );

    let collection = Geometry::new(Value::GeometryCollection(vec![
        Geometry::new(Value::Point(Position::new(1.0, 2.0))),
        Geometry::new(Value::MultiPoint(vec![Position::new(3.0, 4.0)])),
    ]));
    assert_eq!(
        collection.to_string(),
        r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1.0,2.0]},{"type":"MultiPoint","coordinates":[[3.0,4.0]]}]}"#
    );
}

#[test]
fn test_encode_feature() {
    let mut properties = Map::new();
    properties.insert("name".to_string(), Json::String("North Pole".to_string()));
    let feature = Feature {
        geometry: Some(Geometry::new(Value::Point(Position::new(0.0, 90.0)))),
        properties: Some(properties),
        id: Some(FeatureId::String("np".to_string())),
        crs: None,
        bbox: None,
    };
    assert_eq!(
        feature.to_string(),
        r#"{"type":"Feature","id":"np","geometry":{"type":"Point","coordinates":[0.0,90.0]},"properties":{"name":"North Pole"}}"#
    );

    // absent geometry and properties stay explicit nulls on the wire
    let feature = Feature {
        geometry: None,
        properties: None,
        id: None,
        crs: None,
        bbox: None,
    };
    assert_eq!(feature.to_string(), r#"{"type":"Feature","geometry":null,"properties":null}"#);
}

#[test]
fn test_encode_collection() {
    let collection = FeatureCollection {
        features: vec![Feature::new(Geometry::new(Value::Point(Position::new(1.0, 2.0))))],
        crs: None,
        bbox: Some(vec![1.0, 2.0, 1.0, 2.0]),
    };
    assert_eq!(
        collection.to_string(),
        r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":null}],"bbox":[1.0,2.0,1.0,2.0]}"#
    );
}

#[test]
fn test_serialize_bridge() {
    let point = GeoJson::from(Value::Point(Position::new(10.0, -20.0)));
    assert_eq!(serde_json::to_value(&point).unwrap(), point.to_json());
    assert_eq!(serde_json::to_string(&point).unwrap(), point.to_string());
}
