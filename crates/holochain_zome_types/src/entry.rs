//! An Entry is a unit of data in a Holochain Source Chain.
//!
//! This module contains all the necessary definitions for Entry, which
//! broadly speaking refers to any data which will be written into the
//! ContentAddressableStorage, or the EntityAttributeValueStorage. It
//! defines serialization behaviour for entries.

use crate::capability::{CapClaim, ZomeCallCapGrant};
use crate::countersigning::CounterSigningSessionData;
use crate::hash::AgentPubKey;
use holochain_serialized_bytes::prelude::*;

/// The data type written to the source chain when explicitly granting a
/// capability.
pub type CapGrantEntry = ZomeCallCapGrant;

/// The data type written to the source chain to denote a capability claim.
pub type CapClaimEntry = CapClaim;

/// Structure holding the entry portion of a chain record.
///
/// The payload shape is fully determined by the `entry_type` tag; the
/// codec fails with an unknown-variant error for any tag outside this
/// set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
#[serde(tag = "entry_type", content = "entry")]
pub enum Entry {
    /// The `Agent` system entry, the third entry of every source chain,
    /// which grants authoring capability for this agent.
    Agent(AgentPubKey),
    /// The application entry data for entries that aren't system created
    /// entries.
    App(SerializedBytes),
    /// Application entry data for entries that need countersigning to
    /// move forward multiple chains together.
    CounterSign(Box<CounterSigningSessionData>, SerializedBytes),
    /// The capability claim system entry which allows committing a
    /// granted permission for later use.
    CapClaim(CapClaimEntry),
    /// The capability grant system entry which allows granting of
    /// application defined capabilities.
    CapGrant(CapGrantEntry),
}

impl Entry {
    /// If this entry represents a capability grant, return a `CapGrant`.
    pub fn as_cap_grant(&self) -> Option<crate::capability::CapGrant> {
        match self {
            Entry::Agent(key) => Some(crate::capability::CapGrant::ChainAuthor(key.clone())),
            Entry::CapGrant(data) => Some(crate::capability::CapGrant::RemoteAgent(data.clone())),
            _ => None,
        }
    }

    /// If this entry represents a capability claim, return it.
    pub fn as_cap_claim(&self) -> Option<&CapClaim> {
        match self {
            Entry::CapClaim(claim) => Some(claim),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapAccess, CapSecret, CAP_SECRET_BYTES};
    use crate::codec;
    use std::convert::TryFrom;

    fn agent() -> AgentPubKey {
        AgentPubKey::from_raw(vec![1; 39])
    }

    fn app_bytes() -> SerializedBytes {
        SerializedBytes::from(UnsafeBytes::from(vec![1, 2, 3]))
    }

    fn all_variants() -> Vec<Entry> {
        vec![
            Entry::Agent(agent()),
            Entry::App(app_bytes()),
            Entry::CounterSign(
                Box::new(CounterSigningSessionData::from(app_bytes())),
                app_bytes(),
            ),
            Entry::CapClaim(CapClaim::new(
                "tag".to_string(),
                agent(),
                CapSecret::from([5; CAP_SECRET_BYTES]),
            )),
            Entry::CapGrant(ZomeCallCapGrant::new(
                "tag".to_string(),
                CapAccess::Unrestricted,
                Default::default(),
            )),
        ]
    }

    #[test]
    fn every_variant_round_trips() {
        for entry in all_variants() {
            let bytes = codec::encode(&entry).unwrap();
            let back: Entry = codec::decode(&bytes).unwrap();
            assert_eq!(entry, back);
        }
    }

    #[test]
    fn unknown_tag_never_decodes() {
        // Same adjacently tagged layout as Entry, with a tag outside the
        // known set.
        #[derive(serde::Serialize, Debug)]
        #[serde(tag = "entry_type", content = "entry")]
        enum Imposter {
            Bogus(u8),
        }
        let bytes = codec::encode(&Imposter::Bogus(0)).unwrap();
        match codec::decode::<Entry>(&bytes) {
            Err(codec::CodecError::UnknownVariant(_)) => {}
            other => panic!("expected UnknownVariant, got {:?}", other),
        }
    }

    #[test]
    fn cap_grant_accessor_covers_agent_entries() {
        let entry = Entry::Agent(agent());
        match entry.as_cap_grant() {
            Some(crate::capability::CapGrant::ChainAuthor(author)) => assert_eq!(author, agent()),
            other => panic!("expected ChainAuthor, got {:?}", other),
        }
        assert!(Entry::App(app_bytes()).as_cap_grant().is_none());
    }

    #[test]
    fn serialized_bytes_conversion_matches_codec() {
        let entry = Entry::Agent(agent());
        let sb = SerializedBytes::try_from(entry.clone()).unwrap();
        let back: Entry = codec::decode(sb.bytes()).unwrap();
        assert_eq!(entry, back);
    }
}
