//! Text rendering of a decoded header.

use std::fmt::{self, Display};

use ines::CartridgeHeader;
use ines::mapper::mapper_name;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Four spaces per level, as the field dump has always been indented.
const DUMP_INDENT: &[u8] = b"    ";

/// The field listing, one line per header byte, as `nes-header-decoder`
/// has always printed it.
pub struct FieldReport<'a>(pub &'a CartridgeHeader);

impl Display for FieldReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.0;
        let [m0, m1, m2, m3] = h.magic();

        writeln!(
            f,
            "Magic:    {}{}{} x{m3:02x}",
            char::from(m0),
            char::from(m1),
            char::from(m2)
        )?;
        writeln!(f, "PRG ROM:  {} KB", h.program_rom_size_kb())?;
        writeln!(f, "CHR ROM:  {} KB", h.graphics_rom_size_kb())?;
        writeln!(f, "Flags 6:  {:08b}", h.flags6())?;
        writeln!(f, "Flags 7:  {:08b} - (Mapper)", h.legacy_mapper_byte())?;
        writeln!(f, "Flags 8:  {} KB - (PRG RAM Size)", h.program_ram_size_kb())?;
        writeln!(f, "Flags 9:  {:08b}", h.flags9())?;
        writeln!(f, "Flags 10: {:08b}", h.flags10())
    }
}

/// What the flag bits mean.
pub struct InterpretationReport<'a>(pub &'a CartridgeHeader);

impl Display for InterpretationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.0;
        let mapper = h.mapper_number();

        writeln!(
            f,
            "Mapper:       {mapper} ({})",
            mapper_name(mapper).unwrap_or("Unknown")
        )?;
        writeln!(f, "Mirroring:    {}", h.mirroring())?;
        writeln!(f, "Battery:      {}", yes_no(h.has_battery_backed_ram()))?;
        writeln!(f, "Trainer:      {}", yes_no(h.has_trainer()))?;
        writeln!(f, "Four-screen:  {}", yes_no(h.four_screen_vram()))?;
        writeln!(f, "CHR RAM:      {}", yes_no(h.uses_chr_ram()))?;
        writeln!(f, "Format:       {}", h.format())?;
        writeln!(f, "Console:      {}", h.console_type())?;
        writeln!(f, "TV system:    {}", h.tv_system())?;
        writeln!(
            f,
            "Padding:      {}",
            if h.has_clean_padding() {
                "Clean"
            } else {
                "Dirty"
            }
        )
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Pretty JSON of the raw fields, every line starting with `*`.
///
/// # Errors
///
/// Serialization errors from `serde_json`.
pub fn raw_dump(header: &CartridgeHeader) -> serde_json::Result<String> {
    let mut json = Vec::new();
    let formatter = PrettyFormatter::with_indent(DUMP_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
    header.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&json)
        .lines()
        .map(|line| format!("*{line}\n"))
        .collect())
}
