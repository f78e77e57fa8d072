//! # miIO Packet
//!
//! Every datagram starts with a 32 byte big endian header:
//!
//! ```text
//!  0      2      4            8            12           16                  32
//!  | 2131 | len  |  unknown   | device id  |   stamp    |     checksum      |
//! ```
//!
//! The checksum is `md5(header[0..16] ++ token ++ ciphertext)`. A hello packet
//! has no payload and carries `0xFF` in every field after the length.

use tracing::trace;

use airfresh_common::token::{TOKEN_LEN, Token};

use crate::crypto::{self, Cipher};
use crate::error::CodecError;

pub const MIIO_PORT: u16 = 54321;
pub const MAGIC: u16 = 0x2131;
pub const HEADER_LEN: usize = 32;

const CHECKSUM_OFFSET: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub length: u16,
    pub unknown: u32,
    pub device_id: u32,
    pub stamp: u32,
    pub checksum: [u8; 16],
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::Truncated(bytes.len()));
        }

        let magic: u16 = u16::from_be_bytes([bytes[0], bytes[1]]);
        if magic != MAGIC {
            return Err(CodecError::Magic(magic));
        }

        let length: u16 = u16::from_be_bytes([bytes[2], bytes[3]]);
        if length as usize != bytes.len() {
            return Err(CodecError::Length {
                declared: length as usize,
                actual: bytes.len(),
            });
        }

        let mut checksum: [u8; 16] = [0u8; 16];
        checksum.copy_from_slice(&bytes[CHECKSUM_OFFSET..HEADER_LEN]);

        Ok(Self {
            length,
            unknown: read_u32(bytes, 4),
            device_id: read_u32(bytes, 8),
            stamp: read_u32(bytes, 12),
            checksum,
        })
    }

    pub fn is_hello(&self) -> bool {
        self.length as usize == HEADER_LEN
    }

    /// The token a not yet provisioned device reveals in its hello reply.
    pub fn exposed_token(&self) -> Option<Token> {
        let token: Token = Token::new(self.checksum);
        (!token.is_placeholder()).then_some(token)
    }

    fn write_prefix(&self, buffer: &mut [u8]) {
        buffer[0..2].copy_from_slice(&MAGIC.to_be_bytes());
        buffer[2..4].copy_from_slice(&self.length.to_be_bytes());
        buffer[4..8].copy_from_slice(&self.unknown.to_be_bytes());
        buffer[8..12].copy_from_slice(&self.device_id.to_be_bytes());
        buffer[12..16].copy_from_slice(&self.stamp.to_be_bytes());
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// The hello packet that opens every session.
pub fn hello() -> [u8; HEADER_LEN] {
    let mut buffer: [u8; HEADER_LEN] = [0xFF; HEADER_LEN];
    buffer[0..2].copy_from_slice(&MAGIC.to_be_bytes());
    buffer[2..4].copy_from_slice(&(HEADER_LEN as u16).to_be_bytes());
    buffer
}

/// Builds a hello reply. Devices answer with their id, stamp and either their
/// token or a placeholder in the checksum field.
pub fn hello_reply(device_id: u32, stamp: u32, token_field: [u8; TOKEN_LEN]) -> [u8; HEADER_LEN] {
    let header = Header {
        length: HEADER_LEN as u16,
        unknown: 0,
        device_id,
        stamp,
        checksum: token_field,
    };
    let mut buffer: [u8; HEADER_LEN] = [0u8; HEADER_LEN];
    header.write_prefix(&mut buffer);
    buffer[CHECKSUM_OFFSET..].copy_from_slice(&header.checksum);
    buffer
}

/// Encrypts `plaintext` and frames it for `device_id` at `stamp`.
pub fn encode(
    token: &Token,
    device_id: u32,
    stamp: u32,
    plaintext: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let ciphertext: Vec<u8> = Cipher::new(token).encrypt(plaintext);
    let total: usize = HEADER_LEN + ciphertext.len();
    let length: u16 = u16::try_from(total).map_err(|_| CodecError::Oversized(total))?;

    let header = Header {
        length,
        unknown: 0,
        device_id,
        stamp,
        checksum: *token.as_bytes(),
    };

    let mut buffer: Vec<u8> = vec![0u8; total];
    header.write_prefix(&mut buffer);
    buffer[HEADER_LEN..].copy_from_slice(&ciphertext);

    let checksum: [u8; 16] = checksum(&buffer[..CHECKSUM_OFFSET], token, &ciphertext);
    buffer[CHECKSUM_OFFSET..HEADER_LEN].copy_from_slice(&checksum);

    Ok(buffer)
}

/// Parses, verifies and decrypts a packet. Hello packets yield an empty payload.
pub fn decode(token: &Token, bytes: &[u8]) -> Result<(Header, Vec<u8>), CodecError> {
    let header: Header = Header::parse(bytes)?;
    if header.is_hello() {
        return Ok((header, Vec::new()));
    }

    let ciphertext: &[u8] = &bytes[HEADER_LEN..];
    let expected: [u8; 16] = checksum(&bytes[..CHECKSUM_OFFSET], token, ciphertext);
    if expected != header.checksum {
        trace!(
            "checksum mismatch from device {:#010x}: expected {:02x?}, got {:02x?}",
            header.device_id, expected, header.checksum
        );
        return Err(CodecError::Checksum);
    }

    let plaintext: Vec<u8> = Cipher::new(token).decrypt(ciphertext)?;
    Ok((header, plaintext))
}

fn checksum(prefix: &[u8], token: &Token, ciphertext: &[u8]) -> [u8; 16] {
    let mut data: Vec<u8> = Vec::with_capacity(prefix.len() + TOKEN_LEN + ciphertext.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(token.as_bytes());
    data.extend_from_slice(ciphertext);
    crypto::md5(&data)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
