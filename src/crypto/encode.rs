//! Digest permutation and crypt base-64 encoding.
//!
//! The final digest is not encoded in byte order. Each algorithm reorders
//! it through a fixed table of byte groups; every group packs up to three
//! bytes into a 24-bit word which is written low 6 bits first.

/// The crypt(3) base-64 alphabet.
pub const CRYPT_ALPHABET: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// One output group: digest byte indices (high, middle, low) and the
/// number of characters emitted. Missing indices contribute zero bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    bytes: [Option<u8>; 3],
    chars: usize,
}

impl Group {
    pub fn chars(&self) -> usize {
        self.chars
    }
}

const fn g(b2: u8, b1: u8, b0: u8) -> Group {
    Group {
        bytes: [Some(b2), Some(b1), Some(b0)],
        chars: 4,
    }
}

const fn tail(b2: Option<u8>, b1: Option<u8>, b0: u8, chars: usize) -> Group {
    Group {
        bytes: [b2, b1, Some(b0)],
        chars,
    }
}

pub const MD5_PERMUTATION: &[Group] = &[
    g(0, 6, 12),
    g(1, 7, 13),
    g(2, 8, 14),
    g(3, 9, 15),
    g(4, 10, 5),
    tail(None, None, 11, 2),
];

pub const SHA256_PERMUTATION: &[Group] = &[
    g(0, 10, 20),
    g(21, 1, 11),
    g(12, 22, 2),
    g(3, 13, 23),
    g(24, 4, 14),
    g(15, 25, 5),
    g(6, 16, 26),
    g(27, 7, 17),
    g(18, 28, 8),
    g(9, 19, 29),
    tail(None, Some(31), 30, 3),
];

pub const SHA512_PERMUTATION: &[Group] = &[
    g(0, 21, 42),
    g(22, 43, 1),
    g(44, 2, 23),
    g(3, 24, 45),
    g(25, 46, 4),
    g(47, 5, 26),
    g(6, 27, 48),
    g(28, 49, 7),
    g(50, 8, 29),
    g(9, 30, 51),
    g(31, 52, 10),
    g(53, 11, 32),
    g(12, 33, 54),
    g(34, 55, 13),
    g(56, 14, 35),
    g(15, 36, 57),
    g(37, 58, 16),
    g(59, 17, 38),
    g(18, 39, 60),
    g(40, 61, 19),
    g(62, 20, 41),
    tail(None, None, 63, 2),
];

/// Number of characters `table` produces.
pub fn encoded_len(table: &[Group]) -> usize {
    table.iter().map(Group::chars).sum()
}

/// Encodes a 24-bit word as `n` characters, least significant bits first.
pub fn encode_word(b2: u8, b1: u8, b0: u8, n: usize, out: &mut String) {
    let mut w = (u32::from(b2) << 16) | (u32::from(b1) << 8) | u32::from(b0);
    for _ in 0..n {
        out.push(char::from(CRYPT_ALPHABET[(w & 0x3f) as usize]));
        w >>= 6;
    }
}

/// Permutes `digest` through `table` and encodes it.
///
/// `digest` must be at least as long as the highest index in `table`;
/// the registry pairs every table with its digest width.
pub fn encode(digest: &[u8], table: &[Group]) -> String {
    let mut out = String::with_capacity(encoded_len(table));
    for group in table {
        let [b2, b1, b0] = group.bytes.map(|i| i.map_or(0, |i| digest[usize::from(i)]));
        encode_word(b2, b1, b0, group.chars, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_every_byte_once(table: &[Group], len: usize) -> bool {
        let mut seen = vec![0u8; len];
        for i in table.iter().flat_map(|g| g.bytes.iter().flatten()) {
            seen[usize::from(*i)] += 1;
        }
        seen.iter().all(|&n| n == 1)
    }

    #[test]
    fn tables_are_permutations() {
        assert!(covers_every_byte_once(MD5_PERMUTATION, 16));
        assert!(covers_every_byte_once(SHA256_PERMUTATION, 32));
        assert!(covers_every_byte_once(SHA512_PERMUTATION, 64));
    }

    #[test]
    fn encoded_lengths() {
        assert_eq!(MD5_PERMUTATION.len(), 6);
        assert_eq!(SHA256_PERMUTATION.len(), 11);
        assert_eq!(SHA512_PERMUTATION.len(), 22);
        assert_eq!(encoded_len(MD5_PERMUTATION), 22);
        assert_eq!(encoded_len(SHA256_PERMUTATION), 43);
        assert_eq!(encoded_len(SHA512_PERMUTATION), 86);
    }

    #[test]
    fn word_is_written_low_bits_first() {
        let mut out = String::new();
        encode_word(0, 0, 0, 4, &mut out);
        assert_eq!(out, "....");

        out.clear();
        encode_word(0, 0, 1, 4, &mut out);
        assert_eq!(out, "/...");

        out.clear();
        encode_word(0xff, 0xff, 0xff, 4, &mut out);
        assert_eq!(out, "zzzz");

        // high bits are dropped when fewer characters are requested
        out.clear();
        encode_word(0xff, 0xff, 0xff, 2, &mut out);
        assert_eq!(out, "zz");
    }

    #[test]
    fn encode_follows_table_order() {
        let mut digest = [0u8; 16];
        digest[11] = 0x3f;
        let encoded = encode(&digest, MD5_PERMUTATION);
        assert_eq!(encoded, format!("{}z.", ".".repeat(20)));
    }
}
