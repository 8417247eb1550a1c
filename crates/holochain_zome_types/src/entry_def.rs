//! The tag space entries are classified by.

use holochain_serialized_bytes::prelude::*;

/// Whether the entry content is published to the DHT or kept private to
/// the author's chain.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    SerializedBytes,
)]
pub enum EntryVisibility {
    /// Published to the DHT.
    Public,
    /// Stored only on the author's chain.
    Private,
}

/// Identifies one app entry definition within a DNA: which zome declared
/// it, its position in that zome's entry definitions, and its visibility.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    SerializedBytes,
)]
pub struct AppEntryDef {
    /// The index of this definition within its zome.
    pub entry_index: u8,
    /// The index of the declaring zome within the DNA.
    pub zome_index: u8,
    /// DHT visibility of entries of this type.
    pub visibility: EntryVisibility,
}

impl AppEntryDef {
    /// Constructor.
    pub fn new(entry_index: u8, zome_index: u8, visibility: EntryVisibility) -> Self {
        Self {
            entry_index,
            zome_index,
            visibility,
        }
    }
}

/// The type tag of an [`Entry`](crate::Entry): either one of the atomic
/// system tags or the compound `App` form carrying its definition.
/// Exactly one form is active per instance; an unrecognised tag fails to
/// decode rather than falling back to any variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    SerializedBytes,
)]
pub enum EntryType {
    /// An agent public key entry.
    Agent,
    /// An app-defined entry, classified by its definition.
    App(AppEntryDef),
    /// A capability claim entry.
    CapClaim,
    /// A capability grant entry.
    CapGrant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn entry_type_round_trips_both_forms() {
        for entry_type in [
            EntryType::Agent,
            EntryType::App(AppEntryDef::new(3, 1, EntryVisibility::Private)),
            EntryType::CapClaim,
            EntryType::CapGrant,
        ] {
            let bytes = codec::encode(&entry_type).unwrap();
            let back: EntryType = codec::decode(&bytes).unwrap();
            assert_eq!(entry_type, back);
        }
    }
}
