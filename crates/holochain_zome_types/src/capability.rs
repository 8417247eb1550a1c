//! Capability claims and grants.
//!
//! A grant lives on the callee's chain and names which functions may be
//! called, by whom, and with which secret. A claim is the counterpart a
//! caller holds and presents alongside a zome call.
//!
//! Enforcement happens entirely inside the conductor that owns the grant.
//! The client transports these values verbatim and never pre-validates a
//! call against them: a local check would have no correctness value and
//! would only create a false sense of safety. [`CapGrant::is_valid`]
//! exists so that tests and tooling can model the conductor's decision.

mod secret;
pub use secret::*;

use crate::hash::AgentPubKey;
use crate::zome::{FunctionName, ZomeName};
use holochain_serialized_bytes::prelude::*;
use std::collections::BTreeSet;

/// A zome/function pair a grant can name.
pub type GrantedFunction = (ZomeName, FunctionName);

/// The set of functions covered by a grant.
pub type GrantedFunctions = BTreeSet<GrantedFunction>;

/// System entry to allow committing a capability claim to a source chain.
/// Stored by the claimant so the secret can be presented with later calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
pub struct CapClaim {
    /// A string by which the claimant can look this claim up again.
    pub tag: String,
    /// The agent that granted the capability.
    pub grantor: AgentPubKey,
    /// The secret to present when calling the granted functions.
    pub secret: CapSecret,
}

impl CapClaim {
    /// Constructor.
    pub fn new(tag: String, grantor: AgentPubKey, secret: CapSecret) -> Self {
        CapClaim {
            tag,
            grantor,
            secret,
        }
    }
}

/// System entry granting access to zome functions, committed to the
/// grantor's source chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
pub struct ZomeCallCapGrant {
    /// A string by which the grantor can look this grant up again.
    pub tag: String,
    /// How callers gain access to the granted functions.
    pub access: CapAccess,
    /// The functions this grant covers.
    pub functions: GrantedFunctions,
}

impl ZomeCallCapGrant {
    /// Constructor.
    pub fn new(tag: String, access: CapAccess, functions: GrantedFunctions) -> Self {
        Self {
            tag,
            access,
            functions,
        }
    }
}

/// The conditions under which a [`ZomeCallCapGrant`] authorizes a call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
pub enum CapAccess {
    /// Anyone can call, no secret required.
    Unrestricted,
    /// Anyone presenting the secret can call.
    Transferable {
        /// The secret callers must present.
        secret: CapSecret,
    },
    /// Only the named agents, presenting the secret, can call.
    Assigned {
        /// The secret callers must present.
        secret: CapSecret,
        /// The agents allowed to present the secret.
        assignees: BTreeSet<AgentPubKey>,
    },
}

/// Every authorization a conductor can recognise for a zome call: either
/// the chain author calling into its own cell, or a committed grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SerializedBytes)]
pub enum CapGrant {
    /// The author of a source chain may always call its own functions.
    ChainAuthor(AgentPubKey),
    /// A grant committed to the chain covering some remote agent.
    RemoteAgent(ZomeCallCapGrant),
}

impl From<ZomeCallCapGrant> for CapGrant {
    fn from(zome_call_cap_grant: ZomeCallCapGrant) -> Self {
        CapGrant::RemoteAgent(zome_call_cap_grant)
    }
}

impl CapGrant {
    /// The conductor's authorization rule, modelled client side.
    ///
    /// A call is authorized by this grant when the grant covers the
    /// function being called, the provenance is acceptable, and any
    /// required secret matches. A missing or wrong secret against a
    /// gated function must never authorize.
    pub fn is_valid(
        &self,
        given_function: &GrantedFunction,
        given_provenance: &AgentPubKey,
        given_secret: Option<&CapSecret>,
    ) -> bool {
        match self {
            // The author can do anything in its own cell.
            CapGrant::ChainAuthor(author) => author == given_provenance,
            CapGrant::RemoteAgent(ZomeCallCapGrant {
                access, functions, ..
            }) => {
                functions.contains(given_function)
                    && match access {
                        CapAccess::Unrestricted => true,
                        CapAccess::Transferable { secret } => {
                            given_secret.map(|given| given == secret).unwrap_or(false)
                        }
                        CapAccess::Assigned { secret, assignees } => {
                            given_secret.map(|given| given == secret).unwrap_or(false)
                                && assignees.contains(given_provenance)
                        }
                    }
            }
        }
    }
}
