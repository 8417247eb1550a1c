//! A cell is an instance of a DNA running for one agent.

use crate::hash::{AgentPubKey, DnaHash};
use holochain_serialized_bytes::prelude::*;

/// The unique identifier for a cell: the DNA it runs and the agent running
/// it. The client treats this as an opaque pair and only ever compares it
/// for equality.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, SerializedBytes,
)]
pub struct CellId(DnaHash, AgentPubKey);

impl CellId {
    /// Construct a cell id from its parts.
    pub fn new(dna_hash: DnaHash, agent_pubkey: AgentPubKey) -> Self {
        CellId(dna_hash, agent_pubkey)
    }

    /// The DNA half of this cell id.
    pub fn dna_hash(&self) -> &DnaHash {
        &self.0
    }

    /// The agent half of this cell id.
    pub fn agent_pubkey(&self) -> &AgentPubKey {
        &self.1
    }

    /// Consume into the inner pair.
    pub fn into_dna_and_agent(self) -> (DnaHash, AgentPubKey) {
        (self.0, self.1)
    }
}
