//! MD5-crypt digest derivation (`$1$`).
//!
//! Fixed 1000 rounds, salt of at most 8 characters, 16-byte digest.

use md5::{Digest, Md5};

use super::feed_cycled;

/// Literal salt-type prefix mixed into the first digest.
pub const MAGIC: &str = "$1$";
/// Number of mixing rounds. Not configurable.
pub const ROUNDS: u32 = 1000;
/// Maximum salt length in characters.
pub const MAX_SALT_LEN: usize = 8;
/// Digest length in bytes.
pub const DIGEST_LEN: usize = 16;

/// Derives the final 16-byte MD5-crypt digest.
///
/// `salt` must already be truncated to [`MAX_SALT_LEN`] characters.
pub fn digest(password: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut a = Md5::new();
    a.update(password);
    // the salt text may come without its prefix, so add it separately
    a.update(MAGIC.as_bytes());
    a.update(salt);

    let mut b = Md5::new();
    b.update(password);
    b.update(salt);
    b.update(password);
    let sum_b = b.finalize();

    feed_cycled(&mut a, &sum_b, password.len());

    // One byte per bit of the length: a zero byte for a 1 bit, the first
    // password byte for a 0 bit. Not what was intended, but every
    // conforming implementation does it.
    let mut len = password.len();
    while len != 0 {
        if len & 1 != 0 {
            a.update([0u8]);
        } else {
            a.update(&password[..1]);
        }
        len >>= 1;
    }

    let mut running = a.finalize();

    for i in 0..ROUNDS {
        let mut c = Md5::new();

        if i % 2 != 0 {
            c.update(password);
        } else {
            c.update(&running);
        }

        if i % 3 != 0 {
            c.update(salt);
        }

        if i % 7 != 0 {
            c.update(password);
        }

        if i % 2 != 0 {
            c.update(&running);
        } else {
            c.update(password);
        }

        running = c.finalize();
    }

    running.to_vec()
}
