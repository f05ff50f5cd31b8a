//! # Header flag interpretations
//!
//! Bytes 6, 7, 9 and 10 of the header pack several small fields each.
//!
//! ```text
//! Flags 6                         Flags 7
//!  7  6  5  4  3  2  1  0          7  6  5  4  3  2  1  0
//! ┌──────────┬──┬──┬──┬──┐        ┌──────────┬─────┬──┬──┐
//! │Mapper lo │4S│Tr│Ba│Mi│        │Mapper hi │Vers.│PC│VS│
//! └──────────┴──┴──┴──┴──┘        └──────────┴─────┴──┴──┘
//! ```
//!
//! - **Mi**: nametable mirroring (0 horizontal, 1 vertical)
//! - **Ba**: battery-backed PRG RAM at $6000-$7FFF
//! - **Tr**: 512-byte trainer before PRG data
//! - **4S**: four-screen VRAM, overrides **Mi**
//! - **VS** / **PC**: VS Unisystem / PlayChoice-10 hardware
//! - **Vers.**: `10` marks a NES 2.0 header
//!
//! Flags 9 bit 0 and Flags 10 bits 0-1 are TV system hints. Most dumps leave
//! them zero whatever the real target, so they are informational only.

/// How the PPU nametables are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

impl std::fmt::Display for Mirroring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("Horizontal"),
            Self::Vertical => f.write_str("Vertical"),
            Self::FourScreen => f.write_str("Four-screen"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvSystem {
    Ntsc,
    Pal,
    /// Only expressible through Flags 10.
    Dual,
}

impl TvSystem {
    /// Flags 9 bit 0.
    #[must_use]
    pub const fn from_flags9_bit(pal: bool) -> Self {
        if pal { Self::Pal } else { Self::Ntsc }
    }

    /// Flags 10 bits 0-1: 0 is NTSC, 2 is PAL, 1 and 3 are dual compatible.
    #[must_use]
    pub const fn from_flags10_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Ntsc,
            2 => Self::Pal,
            _ => Self::Dual,
        }
    }
}

impl std::fmt::Display for TvSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ntsc => f.write_str("NTSC"),
            Self::Pal => f.write_str("PAL"),
            Self::Dual => f.write_str("Dual (NTSC/PAL)"),
        }
    }
}

/// Header generation, read from Flags 7 bits 2-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Bits are `00`: a plain iNES header.
    INes,
    /// Bits are `10`: bytes 8-15 follow the NES 2.0 layout.
    Nes2,
    /// Bits are `01` or `11`: an old or hand-edited header, bytes 7-15
    /// are unreliable.
    Archaic,
}

impl HeaderFormat {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::INes,
            0b10 => Self::Nes2,
            _ => Self::Archaic,
        }
    }
}

impl std::fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::INes => f.write_str("iNES"),
            Self::Nes2 => f.write_str("NES 2.0"),
            Self::Archaic => f.write_str("Archaic iNES"),
        }
    }
}

/// Console family, read from Flags 7 bits 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleType {
    Nes,
    VsUnisystem,
    PlayChoice10,
    /// Both bits set, only meaningful in NES 2.0 headers.
    Extended,
}

impl ConsoleType {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Nes,
            1 => Self::VsUnisystem,
            2 => Self::PlayChoice10,
            _ => Self::Extended,
        }
    }
}

impl std::fmt::Display for ConsoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nes => f.write_str("NES / Famicom"),
            Self::VsUnisystem => f.write_str("VS Unisystem"),
            Self::PlayChoice10 => f.write_str("PlayChoice-10"),
            Self::Extended => f.write_str("Extended console type"),
        }
    }
}
