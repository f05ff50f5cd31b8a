use std::ops::RangeInclusive;

/// Bit helpers for the packed header bytes.
/// Indices go from lsb to msb (right to left), so bit 0 is `0b0000_0001`.
pub trait Bits: Copy {
    fn is_bit_on(self, bit_idx: u8) -> bool;

    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self;

    #[must_use]
    fn with_bit(self, bit_idx: u8, value: bool) -> Self;

    /// Replaces the bits in `bits_range` with the low bits of `value`.
    #[must_use]
    fn with_bits(self, bits_range: RangeInclusive<u8>, value: Self) -> Self;
}

/// Mask with `length` ones starting at bit 0.
const fn ones(length: u32) -> u8 {
    if length >= 8 {
        u8::MAX
    } else {
        (1 << length) - 1
    }
}

impl Bits for u8 {
    fn is_bit_on(self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < 8);
        self & (1 << bit_idx) != 0
    }

    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
        let start = *bits_range.start();
        debug_assert!(*bits_range.end() < 8);
        let length = u32::from(bits_range.end() - start + 1);

        (self >> start) & ones(length)
    }

    fn with_bit(self, bit_idx: u8, value: bool) -> Self {
        debug_assert!(bit_idx < 8);
        let mask = 1 << bit_idx;
        if value { self | mask } else { self & !mask }
    }

    fn with_bits(self, bits_range: RangeInclusive<u8>, value: Self) -> Self {
        let start = *bits_range.start();
        debug_assert!(*bits_range.end() < 8);
        let length = u32::from(bits_range.end() - start + 1);

        // Clear the field first, then OR the value shifted into place.
        let mask = ones(length) << start;
        (self & !mask) | ((value << start) & mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_is_on() {
        let b = 0b1001_1101_u8;
        assert!(b.is_bit_on(0));
        assert!(!b.is_bit_on(1));
        assert!(b.is_bit_on(2));
        assert!(b.is_bit_on(3));
        assert!(!b.is_bit_on(6));
        assert!(b.is_bit_on(7));
    }

    #[test]
    fn get_bits() {
        let b = 0b1100_1110_u8;
        assert_eq!(b.get_bits(0..=3), 0b1110);
        assert_eq!(b.get_bits(4..=7), 0b1100);
        assert_eq!(b.get_bits(1..=1), 0b1);
        assert_eq!(b.get_bits(2..=3), 0b11);
        assert_eq!(b.get_bits(0..=7), b);
    }

    #[test]
    fn with_bit() {
        let b = 0b0110_0110_u8;
        assert_eq!(b.with_bit(0, true), 0b0110_0111);
        assert_eq!(b.with_bit(1, false), 0b0110_0100);
        assert_eq!(b.with_bit(7, true), 0b1110_0110);
        assert_eq!(b.with_bit(2, true), b);
    }

    #[test]
    fn with_bits() {
        let b = 0b1010_1010_u8;
        assert_eq!(b.with_bits(4..=7, 0b0101), 0b0101_1010);
        assert_eq!(b.with_bits(0..=3, 0b1111), 0b1010_1111);
        assert_eq!(b.with_bits(2..=3, 0b10), 0b1010_1010);
        // Values wider than the field are cut to the field.
        assert_eq!(0u8.with_bits(0..=1, 0b111), 0b11);
    }

    #[test]
    fn with_then_get_bits() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let original: u8 = rng.r#gen();
            let nibble: u8 = rng.gen_range(0..16);
            let b = original.with_bits(4..=7, nibble);
            assert_eq!(b.get_bits(4..=7), nibble);
            assert_eq!(b.get_bits(0..=3), original.get_bits(0..=3));
        }
    }

    #[test]
    #[should_panic]
    fn invalid_index() {
        let b = 0u8;
        b.is_bit_on(8);
    }
}
