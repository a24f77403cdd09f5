// /src/errors.rs
//! Error handling for view creation, payload access and surface setup
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcilerError {
    #[error("No view factory registered for render type '{tag}'")]
    UnregisteredRenderType { tag: String },

    #[error("Unsupported supplementary element kind '{kind}'")]
    UnsupportedElementKind { kind: String },

    #[error("Payload error for '{property}': {details}")]
    PayloadError { property: String, details: String },

    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversionError { expected: String, actual: String },

    #[error("Child index {index} out of bounds (surface has {len} children)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

// Payload field extraction with typed conversion
#[macro_export]
macro_rules! payload_get {
    ($payload:expr, $key:expr, $ty:ty) => {{
        let value = $crate::converters::payload_field($payload, $key)?;
        serde_json::from_value::<$ty>(value.clone()).map_err(|e| {
            $crate::errors::ReconcilerError::TypeConversionError {
                expected: stringify!($ty).to_string(),
                actual: e.to_string(),
            }
        })?
    }};
    ($payload:expr, $key:expr, $ty:ty, $default:expr) => {{
        match $payload.get($key) {
            Some(value) => serde_json::from_value::<$ty>(value.clone()).map_err(|e| {
                $crate::errors::ReconcilerError::TypeConversionError {
                    expected: stringify!($ty).to_string(),
                    actual: e.to_string(),
                }
            }),
            None => Ok($default),
        }?
    }};
}

pub type Result<T> = std::result::Result<T, ReconcilerError>;
