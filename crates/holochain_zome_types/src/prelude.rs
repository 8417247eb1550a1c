//! Common use re-exports.

pub use crate::capability::*;
pub use crate::cell::*;
pub use crate::codec::{self, CodecError};
pub use crate::countersigning::*;
pub use crate::entry::*;
pub use crate::entry_def::*;
pub use crate::hash::*;
pub use crate::zome::*;
pub use crate::zome_io::*;
