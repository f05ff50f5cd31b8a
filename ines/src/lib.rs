//! Decoder for the 16-byte iNES cartridge header.
//!
//! [`CartridgeHeader::decode`] is the entry point, everything else is
//! derived from the decoded value.

mod bitwise;

#[allow(clippy::cast_lossless)]
#[allow(clippy::must_use_candidate)]
pub mod cartridge_header;
pub mod error;
pub mod flags;
pub mod mapper;

pub use cartridge_header::{CartridgeHeader, CartridgeHeaderBuilder, HEADER_LEN, MAGIC};
pub use error::DecodeError;
pub use flags::{ConsoleType, HeaderFormat, Mirroring, TvSystem};
