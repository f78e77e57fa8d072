//! # airfresh-core
//!
//! Talks to Xiaomi Air Fresh A1 units over miIO and exposes them the way a home
//! automation host does: as fan entities with state attributes, plus named
//! services that act on those entities.
//!
//! * **[`network`]**: the async UDP client, the [`network::MiioChannel`] seam and LAN discovery.
//! * **[`airfresh`]**: the device wrapper, the fan entity and the service table.
//! * **[`hub`]**: platform setup from config, service dispatch and polling.

pub mod airfresh;
pub mod error;
pub mod hub;
pub mod network;

pub use error::{DeviceError, ServiceError};
