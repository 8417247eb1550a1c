//! Payloads crossing the zome function boundary.

use holochain_serialized_bytes::prelude::*;

/// A zome function payload, already serialized.
///
/// Zome call inputs and outputs are opaque to the conductor and to this
/// client: they are msgpack produced by one app and consumed by another.
/// The inner bytes are carried verbatim across the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
pub struct ExternIO(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl ExternIO {
    /// Serialize a value into a payload.
    pub fn encode<T>(value: T) -> Result<Self, SerializedBytesError>
    where
        T: serde::Serialize + std::fmt::Debug,
    {
        Ok(Self(holochain_serialized_bytes::encode(&value)?))
    }

    /// Deserialize the payload into a value.
    pub fn decode<T>(&self) -> Result<T, SerializedBytesError>
    where
        T: for<'de> serde::Deserialize<'de> + std::fmt::Debug,
    {
        holochain_serialized_bytes::decode(&self.0)
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw payload bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ExternIO {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ExternIO {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let io = ExternIO::encode("foo").unwrap();
        let back: String = io.decode().unwrap();
        assert_eq!(back, "foo");
    }
}
