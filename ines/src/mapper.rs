//! Names of the mapper boards most dumps use.

/// Returns the common board name for `number`, `None` when not catalogued.
#[must_use]
pub const fn mapper_name(number: u8) -> Option<&'static str> {
    let name = match number {
        0 => "NROM",
        1 => "MMC1 (SxROM)",
        2 => "UxROM",
        3 => "CNROM",
        4 => "MMC3 (TxROM)",
        5 => "MMC5 (ExROM)",
        7 => "AxROM",
        9 => "MMC2 (PxROM)",
        10 => "MMC4 (FxROM)",
        11 => "Color Dreams",
        13 => "CPROM",
        15 => "100-in-1 Contra Function 16",
        16 => "Bandai FCG",
        18 => "Jaleco SS8806",
        19 => "Namco 163",
        21 | 23 | 25 => "Konami VRC4",
        22 => "Konami VRC2a",
        24 | 26 => "Konami VRC6",
        34 => "BNROM / NINA-001",
        64 => "Tengen RAMBO-1",
        66 => "GxROM",
        69 => "Sunsoft FME-7",
        71 => "Camerica / Codemasters",
        79 => "NINA-03/06",
        85 => "Konami VRC7",
        94 => "UN1ROM",
        105 => "NES-EVENT",
        118 => "TxSROM",
        119 => "TQROM",
        180 => "UNROM (Crazy Climber)",
        185 => "CNROM with protection",
        206 => "DxROM / Namco 118",
        210 => "Namco 175/340",
        228 => "Action 52",
        232 => "Camerica Quattro",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_boards() {
        assert_eq!(mapper_name(0), Some("NROM"));
        assert_eq!(mapper_name(1), Some("MMC1 (SxROM)"));
        assert_eq!(mapper_name(4), Some("MMC3 (TxROM)"));
        assert_eq!(mapper_name(23), Some("Konami VRC4"));
    }

    #[test]
    fn unknown_boards() {
        assert_eq!(mapper_name(6), None);
        assert_eq!(mapper_name(255), None);
    }
}
