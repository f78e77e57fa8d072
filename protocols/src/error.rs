use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("packet too short: {0} bytes")]
    Truncated(usize),
    #[error("bad magic 0x{0:04x}")]
    Magic(u16),
    #[error("length field says {declared} bytes but packet has {actual}")]
    Length { declared: usize, actual: usize },
    #[error("payload too large: {0} bytes")]
    Oversized(usize),
    #[error("checksum mismatch")]
    Checksum,
    #[error("failed to decrypt payload")]
    Decrypt,
    #[error("invalid message: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err.to_string())
    }
}
