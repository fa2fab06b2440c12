use crate::types::{COUNTER_LEN, Passcode};

#[inline]
#[must_use]
pub const fn be64(x: u64) -> [u8; COUNTER_LEN] {
    x.to_be_bytes()
}

/// Read a big-endian `u32` from exactly four bytes.
#[inline]
#[must_use]
pub const fn be32(b: [u8; 4]) -> u32 {
    u32::from_be_bytes(b)
}

/// Decimal rendering, left-padded with zeros to `digits` characters.
#[must_use]
pub fn render_code(value: u32, digits: u32) -> Passcode {
    let width = digits as usize;
    Passcode::new_unchecked(format!("{value:0>width$}"))
}

/// True when `s` is exactly `digits` ASCII decimal digits.
#[must_use]
pub fn is_well_formed_code(s: &str, digits: u32) -> bool {
    s.len() == digits as usize && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_big_endian() {
        assert_eq!(be64(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(be64(0x0102_0304_0506_0708), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(render_code(42, 6).as_str(), "000042");
        assert_eq!(render_code(0, 6).as_str(), "000000");
        assert_eq!(render_code(999_999, 6).as_str(), "999999");
    }

    #[test]
    fn well_formed_codes() {
        assert!(is_well_formed_code("012345", 6));
        assert!(!is_well_formed_code("12345", 6));
        assert!(!is_well_formed_code("12345a", 6));
        assert!(!is_well_formed_code("１２３４５６", 6));
        assert!(!is_well_formed_code("", 6));
    }
}
