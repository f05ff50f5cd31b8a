use thiserror::Error;

use crate::cartridge_header::{HEADER_LEN, MAGIC};

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a byte source could not be turned into a [`CartridgeHeader`](crate::CartridgeHeader).
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The source ended before the whole header was read.
    #[error(
        "truncated header: expected {} bytes but only {observed} were available",
        HEADER_LEN
    )]
    TruncatedInput { observed: usize },

    /// The first four bytes are not `NES\x1A`.
    #[error(
        "invalid magic: expected {} but found {}",
        hex_bytes(.expected),
        hex_bytes(.found)
    )]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },

    /// The source itself failed, independently of its content.
    #[error("failed to read header: {0}")]
    SourceReadFailure(#[from] std::io::Error),
}

impl DecodeError {
    pub(crate) const fn invalid_magic(found: [u8; 4]) -> Self {
        Self::InvalidMagic {
            expected: MAGIC,
            found,
        }
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
