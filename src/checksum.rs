use once_cell::sync::Lazy;

/// Reflected form of the standard CRC-32 (IEEE 802.3) polynomial.
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Lookup table, built on first use and read-only afterwards.
static CRC32_TABLE: Lazy<[u32; 256]> = Lazy::new(build_table);

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];

    for (n, entry) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                CRC32_POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *entry = c;
    }

    table
}

/// Computes the CRC32 of `bytes`.
///
/// Used for corruption detection only. It offers no protection against a
/// deliberate forger, who can simply recompute it.
///
/// # Example
/// ```rust
/// use fleetwire::checksum::crc32;
/// assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
/// ```
pub fn crc32(bytes: &[u8]) -> u32 {
    let table = &*CRC32_TABLE;

    let crc = bytes.iter().fold(0xFFFF_FFFFu32, |crc, &byte| {
        table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
    });

    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_known_entries() {
        let table = build_table();
        assert_eq!(table[0], 0x0000_0000);
        assert_eq!(table[1], 0x7707_3096);
        assert_eq!(table[255], 0x2D02_EF8D);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(crc32(&[]), 0);
    }
}
