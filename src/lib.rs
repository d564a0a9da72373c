//
// Copyright (c) ShuYu Wang <andelf@gmail.com>, Feather Workshop and Pirmin Kalberer. All rights reserved.
//

//! GeoJSON (geojson.org) support for Rust.
//!
//! - Typed model of every GeoJSON object: the seven geometry kinds,
//!   Feature, FeatureCollection and CRS declarations
//! - Strict decoding with classified, path-reporting errors
//! - Lossless round-tripping between JSON text and the typed model
//!
//! Decoding:
//!
//! ```rust
//! use geojson::{GeoJson, Value};
//!
//! let gj: GeoJson = r#"{"type":"Point","coordinates":[10.0,-20.0]}"#.parse().unwrap();
//! match gj {
//!     GeoJson::Geometry(geometry) => match geometry.value {
//!         Value::Point(position) => assert_eq!((position.x, position.y), (10.0, -20.0)),
//!         _ => unreachable!(),
//!     },
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Encoding:
//!
//! ```rust
//! use geojson::{Geometry, Position, Value};
//!
//! let point = Geometry::new(Value::Point(Position::new(10.0, -20.0)));
//! assert_eq!(point.to_string(), r#"{"type":"Point","coordinates":[10.0,-20.0]}"#);
//! ```
//!
//! Malformed input is rejected with the JSON path at which it went wrong:
//!
//! ```rust
//! use geojson::{Error, Geometry};
//!
//! let err = r#"{"type":"LineString","coordinates":[10.0,-20.0]}"#
//!     .parse::<Geometry>()
//!     .unwrap_err();
//! assert!(matches!(err, Error::ShapeMismatch { .. }));
//! ```

pub mod error;
mod types;
pub use crate::types::{Bbox, Crs, Feature, FeatureCollection, FeatureId, GeoJson, Geometry, Position, Value};
mod de;
pub use crate::de::{FromJson, MAX_NESTING};
mod ser;
pub use crate::ser::ToJson;
pub use crate::error::Error;
