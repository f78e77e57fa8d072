use async_trait::async_trait;
use serde_json::Value;

use crate::error::DeviceError;

/// Something that can deliver a miIO command and return the `result` of the reply.
///
/// Implemented by [`super::MiioClient`]; device wrappers only depend on this trait.
#[async_trait]
pub trait MiioChannel: Send + Sync {
    async fn send(&self, method: &str, params: Value) -> Result<Value, DeviceError>;
}
