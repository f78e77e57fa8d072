use std::fmt;
use std::str::FromStr;

use crate::error::TokenError;

pub const TOKEN_LEN: usize = 16;
pub const TOKEN_HEX_LEN: usize = TOKEN_LEN * 2;

/// Number of hex characters shown when a token is logged.
const VISIBLE_PREFIX: usize = 5;

/// A miIO device token.
///
/// The token is both the shared secret for the payload encryption and part of
/// every packet checksum. Formatting never prints more than the first five hex
/// characters.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    pub fn new(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Full lowercase hex form. Only meant for showing a token the device handed out.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Tokens reported by provisioned devices are all `0x00` or all `0xFF`.
    pub fn is_placeholder(&self) -> bool {
        self.0.iter().all(|b| *b == 0x00) || self.0.iter().all(|b| *b == 0xFF)
    }

    fn redacted(&self) -> String {
        let mut shown: String = self.to_hex();
        shown.truncate(VISIBLE_PREFIX);
        format!("{shown}...")
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.len() != TOKEN_HEX_LEN {
            return Err(TokenError::Length(trimmed.len()));
        }

        let mut bytes: [u8; TOKEN_LEN] = [0u8; TOKEN_LEN];
        hex::decode_to_slice(trimmed, &mut bytes).map_err(|_| TokenError::NotHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.redacted())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
