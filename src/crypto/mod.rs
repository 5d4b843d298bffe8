//! Digest engines for the crypt(3) family.
//!
//! Provides the MD5 and SHA-2 mixing engines, the output permutation and
//! salt generation.

use sha2::digest::Digest;
use zeroize::Zeroizing;

pub mod encode;
pub mod md5_crypt;
pub mod random;
pub mod sha2_crypt;

pub use encode::{CRYPT_ALPHABET, Group, encode};
pub use random::gen_salt;

/// Feeds `len` bytes into `digest`: a full copy of `sum` for every
/// complete block of `sum.len()` bytes, then the leading remainder.
pub(crate) fn feed_cycled<D: Digest>(digest: &mut D, sum: &[u8], len: usize) {
    for _ in 0..len / sum.len() {
        digest.update(sum);
    }
    digest.update(&sum[..len % sum.len()]);
}

/// Builds a byte sequence of exactly `len` bytes out of repeated `sum`.
pub(crate) fn repeat_to_len(sum: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut seq = Zeroizing::new(Vec::with_capacity(len));
    for _ in 0..len / sum.len() {
        seq.extend_from_slice(sum);
    }
    seq.extend_from_slice(&sum[..len % sum.len()]);
    seq
}
