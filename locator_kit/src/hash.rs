//! Bounded-length digest for the name-fallback rule
//!
//! The scanner shortens over-long report names with a CRC-32 of the
//! workload/container pair. The rendering below (zero-pad to 10, keep
//! the last 10 characters) must match that convention bit-for-bit.

/// Reflected CRC-32 polynomial.
const POLY: u32 = 0xEDB8_8320;

/// Compute a 10-character lowercase hex digest of `input`.
///
/// Deterministic and pure; the empty string is valid input. The
/// underlying checksum is the standard reflected CRC-32 (seed
/// 0xFFFFFFFF, final XOR 0xFFFFFFFF), computed byte-at-a-time without
/// a lookup table.
pub fn digest(input: &str) -> String {
    let hex = format!("{:010x}", crc32(input.as_bytes()));
    // Trailing slice mirrors the reference renderer; with the pad above
    // it only matters when the hex form is shorter than 10 chars.
    hex[hex.len() - 10..].to_string()
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_reference_vectors() {
        // Pinned against the reference implementation.
        assert_eq!(digest("deployment/nginx-frontend"), "0096b52a19");
        assert_eq!(digest("a"), "00e8b7be43");
    }

    #[test]
    fn test_digest_empty_input() {
        assert_eq!(digest(""), "0000000000");
    }

    #[test]
    fn test_digest_is_deterministic() {
        let s = "replicaset/myapp-7d4b8c9f9b";
        assert_eq!(digest(s), digest(s));
        assert_eq!(digest(s), "007b4996b3");
    }

    #[test]
    fn test_digest_shape() {
        for input in ["", "x", "some/considerably-longer-workload-name"] {
            let d = digest(input);
            assert_eq!(d.len(), 10);
            assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
