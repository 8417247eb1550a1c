//! The secret half of a capability claim/grant pair.

use holochain_serialized_bytes::prelude::*;

/// The number of bits we want for a comfy secret.
pub const CAP_SECRET_BITS: usize = 512;
/// The number of bytes we want for a comfy secret.
pub const CAP_SECRET_BYTES: usize = CAP_SECRET_BITS / 8;
/// A fixed size array of bytes that a secret must be.
pub type CapSecretBytes = [u8; CAP_SECRET_BYTES];

/// A CapSecret is used by a caller to prove to a callee access to a
/// committed CapGrant.
///
/// It is a random, unique identifier for the capability, which is shared
/// by the grantor to allow access to others. The grantor can optionally
/// further restrict usage of the secret to specific agents.
///
/// Capability secrets are not cryptographic secrets: they are closer to
/// API keys. The wire representation is a raw byte string of exactly
/// [`CAP_SECRET_BYTES`] bytes; anything shorter or longer fails to decode
/// rather than being truncated or padded.
#[derive(Clone, Copy, PartialEq, Eq, SerializedBytes)]
pub struct CapSecret(pub CapSecretBytes);

impl From<CapSecretBytes> for CapSecret {
    fn from(bytes: CapSecretBytes) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for CapSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep secrets out of logs.
        write!(f, "CapSecret(..)")
    }
}

impl serde::Serialize for CapSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

struct CapSecretVisitor;

impl<'de> serde::de::Visitor<'de> for CapSecretVisitor {
    type Value = CapSecret;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "a byte array of length {}", CAP_SECRET_BYTES)
    }

    fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if value.len() == CAP_SECRET_BYTES {
            let mut bytes = [0; CAP_SECRET_BYTES];
            bytes.copy_from_slice(value);
            Ok(CapSecret(bytes))
        } else {
            let expected = format!("{} bytes, got {} bytes", CAP_SECRET_BYTES, value.len());
            Err(E::invalid_value(
                serde::de::Unexpected::Bytes(value),
                &expected.as_str(),
            ))
        }
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element()? {
            vec.push(b);
        }
        self.visit_bytes(&vec)
    }
}

impl<'de> serde::Deserialize<'de> for CapSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_bytes(CapSecretVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    #[test]
    fn secret_round_trip() {
        let secret = CapSecret::from([7; CAP_SECRET_BYTES]);
        let sb: SerializedBytes = secret.try_into().unwrap();
        let back: CapSecret = sb.try_into().unwrap();
        assert_eq!(secret, back);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let bytes = holochain_serialized_bytes::encode(&serde_bytes::Bytes::new(&[0; 32])).unwrap();
        let result: Result<CapSecret, _> = holochain_serialized_bytes::decode(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn debug_does_not_leak() {
        let secret = CapSecret::from([42; CAP_SECRET_BYTES]);
        assert_eq!(format!("{:?}", secret), "CapSecret(..)");
    }
}
