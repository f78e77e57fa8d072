use airfresh_protocols::CodecError;
use thiserror::Error;

/// Failures while talking to a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("could not resolve host '{host}'")]
    Resolve { host: String },
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no response from device to '{method}'")]
    Timeout { method: String },
    #[error("malformed packet: {0}")]
    Codec(#[from] CodecError),
    #[error("device returned error {code}: {message}")]
    Device { code: i64, message: String },
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Failures of a service call before or while it reaches the entities.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown service '{0}'")]
    UnknownService(String),
    #[error("invalid service data: {0}")]
    Schema(String),
    #[error("favourite speed {0} is outside 1..=200")]
    OutOfRange(i64),
    #[error("unknown speed '{0}', expected one of Off, Auto, Sleep, Favourite")]
    InvalidSpeed(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}
