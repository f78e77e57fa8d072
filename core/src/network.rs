pub mod channel;
pub mod client;
pub mod discovery;
pub mod info;

pub use channel::MiioChannel;
pub use client::{ClientOptions, MiioClient};
