extern crate geojson;

use geojson::{
    Crs, Error, Feature, FeatureCollection, FeatureId, FromJson, GeoJson, Geometry, Position, ToJson, Value,
};
use serde_json::{json, Map, Value as Json};

/// One in-memory value per variant, exercising optional fields in both
/// states.
fn sample_values() -> Vec<GeoJson> {
    let ring = vec![
        Position::new(0.0, 0.0),
        Position::new(4.0, 0.0),
        Position::new(4.0, 4.0),
        Position::new(0.0, 0.0),
    ];
    let mut properties = Map::new();
    properties.insert("name".to_string(), json!("Dinagat Islands"));
    properties.insert("population".to_string(), json!(1205));
    properties.insert("tags".to_string(), json!(["remote", {"wet": true}]));

    vec![
        GeoJson::from(Value::Point(Position::new(125.6, 10.1))),
        GeoJson::from(Value::Point(Position::with_z(125.6, 10.1, -4.25))),
        GeoJson::from(Value::MultiPoint(vec![Position::new(1.0, 2.0), Position::new(1.0, 2.0)])),
        GeoJson::from(Value::LineString(vec![Position::new(0.0, 0.0), Position::new(9.5, -3.25)])),
        GeoJson::from(Value::MultiLineString(vec![
            vec![Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            vec![Position::with_z(2.0, 2.0, 7.0), Position::new(3.0, 3.0)],
        ])),
        GeoJson::from(Value::Polygon(vec![ring.clone()])),
        GeoJson::from(Value::MultiPolygon(vec![vec![ring.clone()], vec![ring.clone()]])),
        GeoJson::from(Value::GeometryCollection(vec![
            Geometry::new(Value::Point(Position::new(1.0, 2.0))),
            Geometry::new(Value::GeometryCollection(vec![Geometry::new(Value::MultiPoint(vec![]))])),
        ])),
        GeoJson::from(Geometry {
            value: Value::Point(Position::new(0.0, 0.0)),
            crs: Some(Crs::Named { name: "urn:ogc:def:crs:OGC:1.3:CRS84".to_string() }),
            bbox: Some(vec![0.0, 0.0, 0.0, 0.0]),
        }),
        GeoJson::from(Feature {
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            properties: Some(properties),
            id: Some(FeatureId::String("dinagat".to_string())),
            crs: None,
            bbox: None,
        }),
        GeoJson::from(Feature {
            geometry: None,
            properties: None,
            id: Some(FeatureId::Number(42.into())),
            crs: None,
            bbox: None,
        }),
        GeoJson::from(FeatureCollection {
            features: vec![
                Feature::new(Geometry::new(Value::Point(Position::new(1.0, 2.0)))),
                Feature::new(Geometry::new(Value::Point(Position::new(3.0, 4.0)))),
            ],
            crs: Some(Crs::Linked {
                href: "http://example.com/crs/42".to_string(),
                link_type: Some("proj4".to_string()),
            }),
            bbox: Some(vec![1.0, 2.0, 3.0, 4.0]),
        }),
    ]
}

#[test]
fn round_trip_law() {
    // decode(encode(v)) == v, element order and optional-field presence
    // included
    for value in sample_values() {
        let decoded = GeoJson::from_json(&value.to_json()).unwrap();
        assert_eq!(decoded, value);

        // and via text
        let decoded: GeoJson = value.to_string().parse().unwrap();
        assert_eq!(decoded, value);
    }
}

#[test]
fn discriminator_fidelity() {
    for doc in [
        r#"{"type":"Point","coordinates":[1.0,2.0]}"#,
        r#"{"type":"MultiPoint","coordinates":[]}"#,
        r#"{"type":"LineString","coordinates":[]}"#,
        r#"{"type":"MultiLineString","coordinates":[]}"#,
        r#"{"type":"Polygon","coordinates":[]}"#,
        r#"{"type":"MultiPolygon","coordinates":[]}"#,
        r#"{"type":"GeometryCollection","geometries":[]}"#,
    ]
    .iter()
    {
        let input: Json = serde_json::from_str(doc).unwrap();
        let geometry = Geometry::from_json(&input).unwrap();
        assert_eq!(Some(geometry.value.type_name()), input["type"].as_str(), "{}", doc);
    }
}

#[test]
fn rejection_totality() {
    // no partially-built value ever comes back for a bad discriminator
    for doc in [
        r#"{}"#,
        r#"{"type":null}"#,
        r#"{"type":17}"#,
        r#"{"type":" Point"}"#,
        r#"{"type":"POINT","coordinates":[1.0,2.0]}"#,
        r#"{"type":"Circle","coordinates":[1.0,2.0]}"#,
        r#""Point""#,
    ]
    .iter()
    {
        let err = doc.parse::<GeoJson>().unwrap_err();
        assert!(matches!(err, Error::UnknownDiscriminator { .. }), "{}", doc);
    }
}

#[test]
fn decode_point_scenario() {
    let gj: GeoJson = r#"{"type":"Point","coordinates":[10,20]}"#.parse().unwrap();
    match &gj {
        GeoJson::Geometry(geometry) => {
            assert_eq!(geometry.value, Value::Point(Position::new(10.0, 20.0)));
        }
        other => panic!("expected a geometry, got {:?}", other),
    }
    // re-encoding keeps the same structure
    assert_eq!(gj.to_json(), json!({"type": "Point", "coordinates": [10.0, 20.0]}));
}

#[test]
fn decode_mixed_collection_scenario() {
    let doc = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Point","coordinates":[102.0,0.5]},"properties":{"prop0":"value0"}},
        {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[100.0,0.0],[101.0,0.0],[101.0,1.0],[100.0,0.0]]]},"properties":null},
        {"type":"Feature","geometry":{"type":"MultiPolygon","coordinates":[[[[1.0,1.0],[2.0,1.0],[1.0,1.0]]]]},"properties":null}
    ]}"#;
    let collection: FeatureCollection = doc.parse().unwrap();
    assert_eq!(collection.features.len(), 3);

    let kinds: Vec<&str> = collection
        .iter()
        .filter_map(|feature| feature.geometry.as_ref())
        .map(|geometry| geometry.value.type_name())
        .collect();
    assert_eq!(kinds, vec!["Point", "Polygon", "MultiPolygon"]);
}

#[test]
fn null_geometry_scenario() {
    let feature: Feature = r#"{"type":"Feature","geometry":null,"properties":{}}"#.parse().unwrap();
    assert_eq!(feature.geometry, None);
    assert_eq!(feature.properties, Some(Map::new()));

    // and the absence survives a round trip
    let encoded = feature.to_json();
    assert_eq!(encoded["geometry"], Json::Null);
    assert_eq!(Feature::from_json(&encoded).unwrap(), feature);
}

#[test]
fn degenerate_linestring_scenario() {
    // a single-point LineString has the right nesting depth; the codec
    // checks shape, not geometric validity
    let geometry: Geometry = r#"{"type":"LineString","coordinates":[[0,0]]}"#.parse().unwrap();
    assert_eq!(geometry.value, Value::LineString(vec![Position::new(0.0, 0.0)]));
}

#[test]
fn missing_crs_is_not_an_error() {
    let gj: GeoJson = r#"{"type":"Point","coordinates":[1.0,2.0]}"#.parse().unwrap();
    match gj {
        GeoJson::Geometry(geometry) => assert_eq!(geometry.crs, None),
        other => panic!("expected a geometry, got {:?}", other),
    }
}

#[test]
fn crs_round_trip() {
    let named = Crs::Named { name: "EPSG:4326".to_string() };
    assert_eq!(Crs::from_json(&named.to_json()).unwrap(), named);

    let linked = Crs::Linked { href: "http://example.com/crs".to_string(), link_type: None };
    assert_eq!(Crs::from_json(&linked.to_json()).unwrap(), linked);

    let err = Crs::from_json(&json!({"type": "name"})).unwrap_err();
    assert!(matches!(err, Error::InvalidCrs { .. }));
}

#[test]
fn nested_collection_guard() {
    let mut json = json!({"type": "Point", "coordinates": [0.0, 0.0]});
    for _ in 0..10 {
        json = json!({"type": "GeometryCollection", "geometries": [json]});
    }
    let err = Geometry::from_json_with_limit(&json, 8).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { limit: 8, .. }));
    assert!(Geometry::from_json_with_limit(&json, 11).is_ok());
}

#[test]
fn serde_embedding() {
    // the model participates in serde like any other type
    let feature: Feature =
        serde_json::from_str(r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[5.0,6.0]},"properties":null}"#)
            .unwrap();
    assert_eq!(feature.geometry, Some(Geometry::new(Value::Point(Position::new(5.0, 6.0)))));

    let text = serde_json::to_string(&feature).unwrap();
    assert_eq!(text.parse::<Feature>().unwrap(), feature);
}

#[test]
fn bbox_survives_round_trip() {
    let doc = r#"{"type":"Feature","geometry":null,"properties":null,"bbox":[-10.0,-10.0,10.0,10.0]}"#;
    let feature: Feature = doc.parse().unwrap();
    assert_eq!(feature.bbox, Some(vec![-10.0, -10.0, 10.0, 10.0]));
    assert_eq!(feature.to_string(), doc);
}
