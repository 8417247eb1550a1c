//! Types describing apps as the conductor installs and reports them.

use std::path::PathBuf;

use holochain_serialized_bytes::prelude::*;
use holochain_zome_types::prelude::*;

/// The unique identifier an app was installed under.
pub type InstalledAppId = String;

/// A friendly, app-local handle for one of the app's cells.
pub type CellNick = String;

/// One dna to install as part of an app: where to load it from and the
/// nick the app will refer to the resulting cell by.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, SerializedBytes)]
pub struct InstallAppDnaPayload {
    /// Path to the dna file on the conductor's filesystem.
    pub path: PathBuf,

    /// The nick for the cell this dna will run in.
    pub nick: CellNick,
}

impl InstallAppDnaPayload {
    /// Construct a payload from a path, deriving the nick from it.
    pub fn path_only(path: PathBuf) -> Self {
        let nick = path.to_string_lossy().to_string();
        Self { path, nick }
    }
}

/// The arguments to [`AdminRequest::InstallApp`](crate::AdminRequest).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, SerializedBytes)]
pub struct InstallAppPayload {
    /// The id to install the app under. Must not collide with an already
    /// installed app.
    pub app_id: InstalledAppId,

    /// The agent the app's cells will run as.
    pub agent_key: AgentPubKey,

    /// The dnas to create cells from. May be empty: an app with no cells
    /// is valid and simply has nothing to call into.
    pub dnas: Vec<InstallAppDnaPayload>,
}

/// An app as the conductor reports it after installation: its id plus one
/// `(cell id, nick)` pair per dna it was installed with, in installation
/// order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, SerializedBytes, PartialEq, Eq)]
pub struct InstalledApp {
    /// The id the app was installed under.
    pub app_id: InstalledAppId,

    /// The app's cells and their nicks.
    pub cell_data: Vec<(CellId, CellNick)>,
}
