use thiserror::Error;

/// Contract errors for core types and configuration.
///
/// User-facing portfolio problems are never reported through this type; they
/// are accumulated as [`crate::Issue`] values inside a
/// [`crate::ValidationResult`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("weight bounds are inverted: min {min} > max {max}")]
    InvertedWeightBounds { min: f64, max: f64 },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("max_assets must be at least 1")]
    ZeroMaxAssets,
    #[error("at least one allowed file extension is required")]
    NoAllowedExtensions,

    #[error("invalid weight unit '{value}', expected one of percentage, fraction")]
    InvalidWeightUnit { value: String },
    #[error("invalid template '{value}', expected one of balanced, growth, income")]
    InvalidTemplate { value: String },

    #[error("asset index {index} is out of bounds for {len} assets")]
    AssetIndexOutOfBounds { index: usize, len: usize },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
