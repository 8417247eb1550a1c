#![deny(missing_docs)]
//! Message types for the two websocket interfaces a conductor exposes.
//!
//! The admin interface ([`AdminRequest`] / [`AdminResponse`]) manages the
//! conductor itself: generating agent keys, installing and (de)activating
//! apps, attaching app interfaces. The app interface ([`AppRequest`] /
//! [`AppResponse`]) is what installed apps are driven through: app info
//! lookups and zome calls.
//!
//! Both interfaces share one convention: every request enum variant has a
//! matching response variant, plus one `Error` variant carrying an
//! [`ExternalApiWireError`]. On the wire the enums are tagged unions with
//! the variant name under `type` and the payload under `data`, serialized
//! as msgpack.

mod admin_interface;
mod app_interface;
pub mod app;

pub use admin_interface::*;
pub use app_interface::*;
pub use app::*;
