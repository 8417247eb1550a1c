//! Countersigning session data.

use holochain_serialized_bytes::prelude::*;

/// The session state negotiated between countersigning peers so that
/// multiple source chains can move forward together.
///
/// The session is produced and consumed by conductors; a client only ever
/// transports it alongside a [`Entry::CounterSign`](crate::Entry)
/// entry, so it is carried here as an opaque serialized blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSigningSessionData(pub SerializedBytes);

impl From<SerializedBytes> for CounterSigningSessionData {
    fn from(sb: SerializedBytes) -> Self {
        Self(sb)
    }
}
