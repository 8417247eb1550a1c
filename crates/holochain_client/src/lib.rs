#![deny(missing_docs)]
//! A client for the Holochain conductor's websocket interfaces.
//!
//! [`AdminWebsocket`] talks to the admin interface: generating agent
//! keys, installing, activating and deactivating apps, attaching app
//! interfaces, and inspecting conductor state. [`AppWebsocket`] talks to
//! an attached app interface: app info lookups, zome calls, and signal
//! subscriptions.
//!
//! Both clients multiplex concurrent calls over a single websocket
//! connection and surface three distinct failure classes: the conductor
//! was unreachable, the connection died underneath a call, or the
//! conductor handled the call and rejected it. See
//! [`ConductorApiError`].
//!
//! ```no_run
//! use holochain_client::*;
//! use url2::url2;
//!
//! # async fn doc_test() -> ConductorApiResult<()> {
//! let admin = AdminWebsocket::connect(url2!("ws://localhost:33001")).await?;
//! let agent_key = admin.generate_agent_pub_key().await?;
//! # let _ = agent_key;
//! # Ok(())
//! # }
//! ```

mod admin_websocket;
mod app_websocket;
mod error;
mod util;

pub use admin_websocket::AdminWebsocket;
pub use app_websocket::AppWebsocket;
pub use error::{ConductorApiError, ConductorApiResult};

pub use holochain_conductor_api::*;
pub use holochain_zome_types::prelude::*;
