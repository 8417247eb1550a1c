//! The wire codec: msgpack via `holochain_serialized_bytes`, with the
//! deserialization failures a client needs to tell apart.
//!
//! Tagged unions must keep exact discrimination: a byte sequence whose
//! tag matches no known variant fails with [`CodecError::UnknownVariant`]
//! and is never coerced into a default or nearest-match variant. Binary
//! payloads (keys, hashes, secrets) pass through untouched.

use holochain_serialized_bytes::SerializedBytesError;

/// Failure to map between domain values and wire bytes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The bytes carried a tag outside the expected variant set.
    #[error("unknown variant in wire payload: {0}")]
    UnknownVariant(String),
    /// The bytes were malformed for the expected shape.
    #[error("failed to deserialize wire payload: {0}")]
    Deserialize(String),
    /// The value could not be serialized.
    #[error("failed to serialize wire payload: {0}")]
    Serialize(String),
}

/// Serialize a domain value to its wire bytes.
pub fn encode<T>(value: &T) -> Result<Vec<u8>, CodecError>
where
    T: serde::Serialize + std::fmt::Debug,
{
    holochain_serialized_bytes::encode(value).map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Deserialize wire bytes into a domain value of a known shape.
pub fn decode<T>(bytes: &[u8]) -> Result<T, CodecError>
where
    T: for<'de> serde::Deserialize<'de> + std::fmt::Debug,
{
    holochain_serialized_bytes::decode(bytes).map_err(|e| match e {
        // serde only reports an unrecognised enum tag through the error
        // message, so the classification happens here, in one place.
        SerializedBytesError::Deserialize(msg) if msg.contains("unknown variant") => {
            CodecError::UnknownVariant(msg)
        }
        e => CodecError::Deserialize(e.to_string()),
    })
}
