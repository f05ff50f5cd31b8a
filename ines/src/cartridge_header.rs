//! # iNES cartridge header
//!
//! Every `.nes` image starts with a fixed 16-byte header:
//!
//! ```text
//! Offset  Size  Field
//! 0x00    4     Magic "NES" 0x1A
//! 0x04    1     PRG ROM size, 16 KB units
//! 0x05    1     CHR ROM size, 8 KB units (0 = board uses CHR RAM)
//! 0x06    1     Flags 6 (mirroring, battery, trainer, four-screen, mapper lo)
//! 0x07    1     Flags 7 (VS/PlayChoice, format, mapper hi)
//! 0x08    1     PRG RAM size, 8 KB units
//! 0x09    1     Flags 9 (TV system)
//! 0x0A    1     Flags 10 (TV system, PRG RAM presence, bus conflicts)
//! 0x0B    5     Padding, should be zero
//! ```
//!
//! All fields are single bytes, so there is no byte order to care about.
//! Derived quantities are computed from the raw fields on each call and
//! never cached.

use std::io::{ErrorKind, Read};

use serde::Serialize;

use crate::bitwise::Bits;
use crate::error::{DecodeError, Result};
use crate::flags::{ConsoleType, HeaderFormat, Mirroring, TvSystem};

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 16;

/// `NES` followed by MS-DOS end-of-file.
pub const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

const PRG_ROM_UNIT_KB: u32 = 16;
const CHR_ROM_UNIT_KB: u32 = 8;
const PRG_RAM_UNIT_KB: u32 = 8;

/// Decoded header. Only [`CartridgeHeader::decode`], [`CartridgeHeader::from_bytes`]
/// and [`CartridgeHeaderBuilder`] can create one, so the magic is always valid.
///
/// # Example
///
/// ```
/// use ines::CartridgeHeader;
///
/// let raw = [0x4E, 0x45, 0x53, 0x1A, 2, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
/// let header = CartridgeHeader::from_bytes(&raw).unwrap();
///
/// assert_eq!(header.program_rom_size_kb(), 32);
/// assert_eq!(header.graphics_rom_size_kb(), 8);
/// assert_eq!(header.mapper_number(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartridgeHeader {
    magic: [u8; 4],
    prg_rom_units: u8,
    chr_rom_units: u8,
    flags6: u8,
    flags7: u8,
    prg_ram_units: u8,
    flags9: u8,
    flags10: u8,
    padding: [u8; 5],
}

impl CartridgeHeader {
    /// Reads exactly [`HEADER_LEN`] bytes from `source` and decodes them.
    ///
    /// `source` must be positioned at the start of the image. It is only
    /// borrowed: it is not closed and nothing after the header is consumed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TruncatedInput`] when the source ends early.
    /// - [`DecodeError::InvalidMagic`] when the format tag does not match.
    /// - [`DecodeError::SourceReadFailure`] when the source reports an I/O error.
    pub fn decode<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        let raw = read_header(source)?;
        Self::from_raw(&raw)
    }

    /// Decodes the header from the start of an in-memory image.
    /// Bytes after the first [`HEADER_LEN`] are ignored.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedInput`] or [`DecodeError::InvalidMagic`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let raw: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(DecodeError::TruncatedInput {
                observed: data.len(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: &[u8; HEADER_LEN]) -> Result<Self> {
        let [
            m0,
            m1,
            m2,
            m3,
            prg_rom_units,
            chr_rom_units,
            flags6,
            flags7,
            prg_ram_units,
            flags9,
            flags10,
            p0,
            p1,
            p2,
            p3,
            p4,
        ] = *raw;

        let magic = [m0, m1, m2, m3];
        if magic != MAGIC {
            return Err(DecodeError::invalid_magic(magic));
        }

        Ok(Self {
            magic,
            prg_rom_units,
            chr_rom_units,
            flags6,
            flags7,
            prg_ram_units,
            flags9,
            flags10,
            padding: [p0, p1, p2, p3, p4],
        })
    }

    /// Encodes the header back into its 16-byte layout.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let [m0, m1, m2, m3] = self.magic;
        let [p0, p1, p2, p3, p4] = self.padding;
        [
            m0,
            m1,
            m2,
            m3,
            self.prg_rom_units,
            self.chr_rom_units,
            self.flags6,
            self.flags7,
            self.prg_ram_units,
            self.flags9,
            self.flags10,
            p0,
            p1,
            p2,
            p3,
            p4,
        ]
    }

    pub const fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// Number of 16 KB PRG ROM banks.
    pub const fn prg_rom_units(&self) -> u8 {
        self.prg_rom_units
    }

    /// Number of 8 KB CHR ROM banks.
    pub const fn chr_rom_units(&self) -> u8 {
        self.chr_rom_units
    }

    pub const fn flags6(&self) -> u8 {
        self.flags6
    }

    pub const fn flags7(&self) -> u8 {
        self.flags7
    }

    /// Number of 8 KB PRG RAM banks, as written in the header.
    pub const fn prg_ram_units(&self) -> u8 {
        self.prg_ram_units
    }

    pub const fn flags9(&self) -> u8 {
        self.flags9
    }

    pub const fn flags10(&self) -> u8 {
        self.flags10
    }

    /// Should be zero filled
    pub const fn padding(&self) -> [u8; 5] {
        self.padding
    }

    pub const fn program_rom_size_kb(&self) -> u32 {
        self.prg_rom_units as u32 * PRG_ROM_UNIT_KB
    }

    pub const fn graphics_rom_size_kb(&self) -> u32 {
        self.chr_rom_units as u32 * CHR_ROM_UNIT_KB
    }

    /// A zero unit count is reported as 0 KB, not as the one bank some
    /// emulators assume.
    pub const fn program_ram_size_kb(&self) -> u32 {
        self.prg_ram_units as u32 * PRG_RAM_UNIT_KB
    }

    /// The board has CHR RAM instead of CHR ROM.
    pub const fn uses_chr_ram(&self) -> bool {
        self.chr_rom_units == 0
    }

    /// Mapper identifier: high nibble from Flags 7, low nibble from the
    /// high nibble of Flags 6.
    pub fn mapper_number(&self) -> u8 {
        let low = self.flags6.get_bits(4..=7);
        let high = self.flags7.get_bits(4..=7);
        (high << 4) | low
    }

    /// Flags 7 as-is. Older tooling printed this byte as "the mapper",
    /// which only carries the upper nibble of [`Self::mapper_number`].
    pub const fn legacy_mapper_byte(&self) -> u8 {
        self.flags7
    }

    /// Flags 6 bit 0, 1 for vertical arrangement.
    pub fn mirroring_bit(&self) -> bool {
        self.flags6.is_bit_on(0)
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.four_screen_vram() {
            Mirroring::FourScreen
        } else if self.mirroring_bit() {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn has_battery_backed_ram(&self) -> bool {
        self.flags6.is_bit_on(1)
    }

    /// A 512-byte trainer sits between the header and PRG ROM.
    pub fn has_trainer(&self) -> bool {
        self.flags6.is_bit_on(2)
    }

    pub fn four_screen_vram(&self) -> bool {
        self.flags6.is_bit_on(3)
    }

    pub fn is_vs_unisystem(&self) -> bool {
        self.flags7.is_bit_on(0)
    }

    pub fn is_playchoice_10(&self) -> bool {
        self.flags7.is_bit_on(1)
    }

    pub fn console_type(&self) -> ConsoleType {
        ConsoleType::from_bits(self.flags7.get_bits(0..=1))
    }

    pub fn format(&self) -> HeaderFormat {
        HeaderFormat::from_bits(self.flags7.get_bits(2..=3))
    }

    /// Flags 9 bit 0. Informational: plenty of PAL dumps leave it clear.
    pub fn tv_system(&self) -> TvSystem {
        TvSystem::from_flags9_bit(self.flags9.is_bit_on(0))
    }

    /// The unofficial Flags 10 TV system field.
    pub fn flags10_tv_system(&self) -> TvSystem {
        TvSystem::from_flags10_bits(self.flags10.get_bits(0..=1))
    }

    /// Flags 10 bit 4, set when the board has no PRG RAM at $6000-$7FFF.
    pub fn prg_ram_absent_hint(&self) -> bool {
        self.flags10.is_bit_on(4)
    }

    /// Flags 10 bit 5.
    pub fn has_bus_conflicts_hint(&self) -> bool {
        self.flags10.is_bit_on(5)
    }

    /// The reserved bytes are all zero. Dirty padding is common in dumps
    /// tagged by old tools and is never a decode error.
    pub fn has_clean_padding(&self) -> bool {
        self.padding.iter().all(|&b| b == 0)
    }
}

/// Fills a header buffer, accumulating short reads.
fn read_header<R: Read + ?Sized>(source: &mut R) -> Result<[u8; HEADER_LEN]> {
    let mut raw = [0; HEADER_LEN];
    let mut observed = 0;

    while observed < HEADER_LEN {
        match source.read(&mut raw[observed..]) {
            Ok(0) => return Err(DecodeError::TruncatedInput { observed }),
            Ok(n) => observed += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(DecodeError::SourceReadFailure(e)),
        }
    }

    Ok(raw)
}

/// Builds synthetic headers. The magic is always the valid one.
///
/// ```
/// use ines::{CartridgeHeaderBuilder, Mirroring};
///
/// let header = CartridgeHeaderBuilder::new()
///     .prg_rom_units(8)
///     .mapper(4)
///     .mirroring(Mirroring::Vertical)
///     .build();
///
/// assert_eq!(header.mapper_number(), 4);
/// assert_eq!(header.mirroring(), Mirroring::Vertical);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CartridgeHeaderBuilder {
    prg_rom_units: u8,
    chr_rom_units: u8,
    flags6: u8,
    flags7: u8,
    prg_ram_units: u8,
    flags9: u8,
    flags10: u8,
    padding: [u8; 5],
}

impl CartridgeHeaderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn prg_rom_units(mut self, units: u8) -> Self {
        self.prg_rom_units = units;
        self
    }

    #[must_use]
    pub const fn chr_rom_units(mut self, units: u8) -> Self {
        self.chr_rom_units = units;
        self
    }

    #[must_use]
    pub const fn prg_ram_units(mut self, units: u8) -> Self {
        self.prg_ram_units = units;
        self
    }

    /// Raw Flags 6, overwrites anything set through the typed setters.
    #[must_use]
    pub const fn flags6(mut self, value: u8) -> Self {
        self.flags6 = value;
        self
    }

    /// Raw Flags 7, overwrites anything set through the typed setters.
    #[must_use]
    pub const fn flags7(mut self, value: u8) -> Self {
        self.flags7 = value;
        self
    }

    #[must_use]
    pub const fn flags9(mut self, value: u8) -> Self {
        self.flags9 = value;
        self
    }

    #[must_use]
    pub const fn flags10(mut self, value: u8) -> Self {
        self.flags10 = value;
        self
    }

    #[must_use]
    pub const fn padding(mut self, padding: [u8; 5]) -> Self {
        self.padding = padding;
        self
    }

    /// Splits `number` across the Flags 6 and Flags 7 nibbles.
    #[must_use]
    pub fn mapper(mut self, number: u8) -> Self {
        self.flags6 = self.flags6.with_bits(4..=7, number.get_bits(0..=3));
        self.flags7 = self.flags7.with_bits(4..=7, number.get_bits(4..=7));
        self
    }

    #[must_use]
    pub fn mirroring(mut self, mirroring: Mirroring) -> Self {
        let (vertical, four_screen) = match mirroring {
            Mirroring::Horizontal => (false, false),
            Mirroring::Vertical => (true, false),
            Mirroring::FourScreen => (false, true),
        };
        self.flags6 = self.flags6.with_bit(0, vertical).with_bit(3, four_screen);
        self
    }

    #[must_use]
    pub fn battery(mut self, present: bool) -> Self {
        self.flags6 = self.flags6.with_bit(1, present);
        self
    }

    #[must_use]
    pub fn trainer(mut self, present: bool) -> Self {
        self.flags6 = self.flags6.with_bit(2, present);
        self
    }

    #[must_use]
    pub fn tv_system(mut self, tv_system: TvSystem) -> Self {
        self.flags9 = self.flags9.with_bit(0, tv_system == TvSystem::Pal);
        self
    }

    #[must_use]
    pub const fn build(self) -> CartridgeHeader {
        CartridgeHeader {
            magic: MAGIC,
            prg_rom_units: self.prg_rom_units,
            chr_rom_units: self.chr_rom_units,
            flags6: self.flags6,
            flags7: self.flags7,
            prg_ram_units: self.prg_ram_units,
            flags9: self.flags9,
            flags10: self.flags10,
            padding: self.padding,
        }
    }
}
