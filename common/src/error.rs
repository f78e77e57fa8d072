use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token must be 32 hex characters, got {0}")]
    Length(usize),
    #[error("token contains non-hex characters")]
    NotHex,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("device #{index}: missing required field '{field}'")]
    Missing { index: usize, field: &'static str },
    #[error("device #{index}: invalid token: {source}")]
    Token {
        index: usize,
        #[source]
        source: TokenError,
    },
    #[error("device #{index}: unsupported model '{model}', only dmaker.airfresh.a1 is supported")]
    Model { index: usize, model: String },
    #[error("'{field}' must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("no xiaomi_airfresh devices configured")]
    NoDevices,
}
