use thiserror::Error;

/// Decoding failures, classified by kind. Every variant except
/// `MalformedJson` reports the JSON path (field chain) at which it
/// occurred, rendered as e.g. `$.features[2].geometry.coordinates[0][1]`.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not valid JSON at all. Surfaced from the underlying
    /// JSON parser, never generated by the decoder itself.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// The `type` field was missing, not a string, or not in the
    /// recognized set for the expected context.
    #[error("unrecognized `type` discriminator at {path}: {found}")]
    UnknownDiscriminator { path: String, found: String },
    /// A payload does not have the shape its discriminator requires,
    /// most commonly a coordinates array nested one level too shallow
    /// or too deep for the geometry kind.
    #[error("shape mismatch at {path}: expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },
    /// A position with the wrong element count, or a non-numeric or
    /// non-finite element.
    #[error("invalid position at {path}: {reason}")]
    InvalidPosition { path: String, reason: String },
    /// A `crs` object without a recognized kind or its required fields.
    #[error("invalid CRS at {path}: {reason}")]
    InvalidCrs { path: String, reason: String },
    /// Geometry nesting exceeded the configured limit.
    #[error("nesting deeper than {limit} levels at {path}")]
    NestingTooDeep { path: String, limit: usize },
}
