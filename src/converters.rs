//! Payload conversion helpers with explicit error handling
use crate::errors::ReconcilerError;
use crate::types::Payload;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Decode a whole payload into a typed configuration struct
pub fn decode_payload<T: DeserializeOwned>(payload: &Payload) -> Result<T, ReconcilerError> {
    serde_json::from_value(payload.clone()).map_err(|e| ReconcilerError::TypeConversionError {
        expected: std::any::type_name::<T>().to_string(),
        actual: e.to_string(),
    })
}

/// Encode a typed configuration into a payload
pub fn payload_from<T: Serialize>(config: &T) -> Result<Payload, ReconcilerError> {
    Ok(serde_json::to_value(config)?)
}

/// Look up a single field of an object payload
pub fn payload_field<'a>(payload: &'a Payload, key: &str) -> Result<&'a serde_json::Value, ReconcilerError> {
    let object = payload.as_object().ok_or_else(|| ReconcilerError::TypeConversionError {
        expected: "object".into(),
        actual: format!("payload is not a json object (was {})", payload),
    })?;
    object.get(key).ok_or_else(|| ReconcilerError::PayloadError {
        property: key.to_string(),
        details: "Property not found".to_string(),
    })
}
