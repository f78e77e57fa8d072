//! # miIO wire protocol
//!
//! Codec for Xiaomi's local UDP protocol (port `54321`):
//!
//! * [`packet`]: the 32 byte header, hello packets and checksums.
//! * [`crypto`]: the AES-128-CBC payload cipher derived from the device token.
//! * [`message`]: the JSON request/response envelope carried in the payload.
//!
//! Nothing in here touches a socket.

pub mod crypto;
pub mod error;
pub mod message;
pub mod packet;

pub use error::CodecError;
pub use message::{Request, Response};
pub use packet::{Header, MIIO_PORT};
