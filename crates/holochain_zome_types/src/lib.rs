#![deny(missing_docs)]
//! Data types shared between a Holochain conductor and its clients.
//!
//! Everything in this crate is a pure data contract: tagged unions for
//! entries and capabilities, opaque hash and payload wrappers, and the
//! codec that maps them to and from the conductor's msgpack wire format.
//! None of these types carry behavior beyond construction, access and the
//! capability validity check that models the conductor's authorization
//! rules.

pub mod capability;
pub mod cell;
pub mod codec;
pub mod countersigning;
pub mod entry;
pub mod entry_def;
pub mod hash;
pub mod zome;
pub mod zome_io;

pub mod prelude;

pub use entry::Entry;
pub use entry_def::{AppEntryDef, EntryType, EntryVisibility};
