//! SHA-256-crypt (`$5$`) and SHA-512-crypt (`$6$`) digest derivation.
//!
//! Both widths share one algorithm, generic over the digest. Step numbers
//! in the comments below follow the published SHA-crypt description.

use sha2::Digest;

use super::{feed_cycled, repeat_to_len};

/// Rounds used when the salt does not request any.
pub const DEFAULT_ROUNDS: u32 = 5000;
pub const MIN_ROUNDS: u32 = 1000;
pub const MAX_ROUNDS: u32 = 999_999_999;
/// Maximum salt length in characters.
pub const MAX_SALT_LEN: usize = 16;

/// Derives the final SHA-2-crypt digest (32 or 64 bytes).
///
/// `salt` must already be truncated to [`MAX_SALT_LEN`] characters and
/// `rounds` already clamped.
pub fn digest<D: Digest>(password: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
    // 1-3. digest A: password, salt
    let mut a = D::new();
    a.update(password);
    a.update(salt);

    // 4-8. digest B: password, salt, password
    let mut b = D::new();
    b.update(password);
    b.update(salt);
    b.update(password);
    let sum_b = b.finalize();

    // 9-10. one byte of B per byte of password
    feed_cycled(&mut a, &sum_b, password.len());

    // 11. up to the highest set bit of the length: B for a 1, password for a 0
    let mut len = password.len();
    while len > 0 {
        if len & 1 != 0 {
            a.update(&sum_b);
        } else {
            a.update(password);
        }
        len >>= 1;
    }

    // 12.
    let sum_a = a.finalize();

    // 13-15. digest DP: the password once per password byte
    let mut dp = D::new();
    for _ in 0..password.len() {
        dp.update(password);
    }
    let sum_dp = dp.finalize();

    // 16. sequence P
    let seq_p = repeat_to_len(&sum_dp, password.len());

    // 17-19. digest DS: the salt 16 + A[0] times
    let mut ds = D::new();
    for _ in 0..16 + usize::from(sum_a[0]) {
        ds.update(salt);
    }
    let sum_ds = ds.finalize();

    // 20. sequence S
    let seq_s = repeat_to_len(&sum_ds, salt.len());

    // 21. rounds
    let mut running = sum_a;
    for i in 0..rounds {
        let mut c = D::new();

        if i % 2 != 0 {
            c.update(&*seq_p);
        } else {
            c.update(&running);
        }

        if i % 3 != 0 {
            c.update(&*seq_s);
        }

        if i % 7 != 0 {
            c.update(&*seq_p);
        }

        if i % 2 != 0 {
            c.update(&running);
        } else {
            c.update(&*seq_p);
        }

        running = c.finalize();
    }

    running.to_vec()
}

#[cfg(test)]
mod tests {
    use sha2::{Sha256, Sha512};

    use super::*;
    use crate::crypto::encode::{SHA256_PERMUTATION, SHA512_PERMUTATION, encode};

    #[test]
    fn sha256_reference_vector() {
        let raw = digest::<Sha256>(b"Hello world!", b"saltstringsaltst", 10_000);
        assert_eq!(raw.len(), 32);
        assert_eq!(
            encode(&raw, SHA256_PERMUTATION),
            "3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA"
        );
    }

    #[test]
    fn sha512_reference_vector() {
        let raw = digest::<Sha512>(b"Hello world!", b"saltstring", DEFAULT_ROUNDS);
        assert_eq!(raw.len(), 64);
        assert_eq!(
            encode(&raw, SHA512_PERMUTATION),
            "svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
        );
    }

    #[test]
    fn rounds_change_digest() {
        let a = digest::<Sha256>(b"pw", b"salt", MIN_ROUNDS);
        let b = digest::<Sha256>(b"pw", b"salt", MIN_ROUNDS + 1);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_and_salt() {
        let raw = digest::<Sha512>(b"", b"", MIN_ROUNDS);
        assert_eq!(raw.len(), 64);
    }

    #[test]
    fn password_longer_than_digest() {
        let password =
            b"a very much longer text to encrypt.  This one even stretches over morethan one line.";

        let raw = digest::<Sha256>(password, b"anotherlongsalts", 1400);
        assert_eq!(raw.len(), 32);
        assert_eq!(
            encode(&raw, SHA256_PERMUTATION),
            "Rx.j8H.h8HjEDGomFU8bDkXm3XIUnzyxf12oP84Bnq1"
        );

        let raw = digest::<Sha512>(password, b"anotherlongsalts", 1400);
        assert_eq!(raw.len(), 64);
        assert_eq!(
            encode(&raw, SHA512_PERMUTATION),
            "POfYwTEok97VWcjxIiSOjiykti.o/pQs.wPvMxQ6Fm7I6IoYN3CmLs66x9t0oSwbtEW7o7UmJEiDwGqd8p4ur1"
        );
    }
}
