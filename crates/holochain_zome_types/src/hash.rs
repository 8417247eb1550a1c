//! Opaque hash newtypes.
//!
//! A conductor client never inspects the internal structure of a hash: it
//! receives these values from the conductor and hands them back verbatim.
//! They are compared for equality and ordered so they can live in sets and
//! maps, nothing more.

use holochain_serialized_bytes::prelude::*;

macro_rules! opaque_hash {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, SerializedBytes,
        )]
        pub struct $name(#[serde(with = "serde_bytes")] Vec<u8>);

        impl $name {
            /// Wrap raw hash bytes received from the conductor.
            pub fn from_raw(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            /// The raw bytes of this hash.
            pub fn get_raw(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self::from_raw(bytes)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                for b in &self.0 {
                    write!(f, "{:02x}", b)?;
                }
                write!(f, ")")
            }
        }
    };
}

opaque_hash!(
    /// The public key of an agent, identifying it across the network.
    AgentPubKey
);

opaque_hash!(
    /// The hash of a DNA, identifying one application package.
    DnaHash
);
