//! Registry of supported crypt(3) algorithms.

use sha2::{Sha256, Sha512};
use tracing::warn;

use crate::crypto::encode::{Group, MD5_PERMUTATION, SHA256_PERMUTATION, SHA512_PERMUTATION};
use crate::crypto::{md5_crypt, sha2_crypt};
use crate::error::CryptError;
use crate::salt::SaltSpec;

/// Static description of one algorithm.
#[derive(Debug)]
pub struct AlgorithmDescriptor {
    pub id: u32,
    pub digest_name: &'static str,
    pub digest_len: usize,
    pub default_rounds: u32,
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub max_salt_len: usize,
    pub permutation: &'static [Group],
}

impl AlgorithmDescriptor {
    /// Whether the salt may choose the number of rounds.
    pub fn tunable_rounds(&self) -> bool {
        self.min_rounds != self.max_rounds
    }
}

static MD5: AlgorithmDescriptor = AlgorithmDescriptor {
    id: 1,
    digest_name: "MD5",
    digest_len: md5_crypt::DIGEST_LEN,
    default_rounds: md5_crypt::ROUNDS,
    min_rounds: md5_crypt::ROUNDS,
    max_rounds: md5_crypt::ROUNDS,
    max_salt_len: md5_crypt::MAX_SALT_LEN,
    permutation: MD5_PERMUTATION,
};

static SHA256: AlgorithmDescriptor = AlgorithmDescriptor {
    id: 5,
    digest_name: "SHA-256",
    digest_len: 32,
    default_rounds: sha2_crypt::DEFAULT_ROUNDS,
    min_rounds: sha2_crypt::MIN_ROUNDS,
    max_rounds: sha2_crypt::MAX_ROUNDS,
    max_salt_len: sha2_crypt::MAX_SALT_LEN,
    permutation: SHA256_PERMUTATION,
};

static SHA512: AlgorithmDescriptor = AlgorithmDescriptor {
    id: 6,
    digest_name: "SHA-512",
    digest_len: 64,
    default_rounds: sha2_crypt::DEFAULT_ROUNDS,
    min_rounds: sha2_crypt::MIN_ROUNDS,
    max_rounds: sha2_crypt::MAX_ROUNDS,
    max_salt_len: sha2_crypt::MAX_SALT_LEN,
    permutation: SHA512_PERMUTATION,
};

/// A supported algorithm. Dispatch is a plain `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Md5, Algorithm::Sha256, Algorithm::Sha512];

    /// Looks up the algorithm for a salt id.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::UnsupportedAlgorithm`] for unknown ids,
    /// including the untyped id 0.
    pub fn resolve(id: u32) -> Result<Self, CryptError> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == id)
            .ok_or(CryptError::UnsupportedAlgorithm { id })
    }

    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        match self {
            Algorithm::Md5 => &MD5,
            Algorithm::Sha256 => &SHA256,
            Algorithm::Sha512 => &SHA512,
        }
    }

    pub fn id(self) -> u32 {
        self.descriptor().id
    }

    /// Clamps a rounds value into the algorithm's bounds.
    pub fn clamp_rounds(self, requested: u64) -> u32 {
        let d = self.descriptor();
        let effective = requested.clamp(u64::from(d.min_rounds), u64::from(d.max_rounds));
        if effective != requested {
            warn!(
                algorithm = d.digest_name,
                requested, effective, "rounds out of range, clamped"
            );
        }
        // within u32 bounds after the clamp
        effective as u32
    }

    /// Returns the effective rounds explicitly requested by `salt`, or
    /// `None` when the salt names none or the algorithm has fixed rounds.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::InvalidSaltFormat`] for a malformed rounds value.
    pub fn requested_rounds(self, salt: &SaltSpec) -> Result<Option<u32>, CryptError> {
        if !self.descriptor().tunable_rounds() {
            return Ok(None);
        }
        Ok(salt.rounds()?.map(|r| self.clamp_rounds(r)))
    }

    /// Runs the mixing engine and returns the raw final digest.
    pub fn digest(self, password: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
        match self {
            Algorithm::Md5 => md5_crypt::digest(password, salt),
            Algorithm::Sha256 => sha2_crypt::digest::<Sha256>(password, salt, rounds),
            Algorithm::Sha512 => sha2_crypt::digest::<Sha512>(password, salt, rounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_ids() {
        assert_eq!(Algorithm::resolve(1).unwrap(), Algorithm::Md5);
        assert_eq!(Algorithm::resolve(5).unwrap(), Algorithm::Sha256);
        assert_eq!(Algorithm::resolve(6).unwrap(), Algorithm::Sha512);
    }

    #[test]
    fn resolve_unknown_ids_fails() {
        for id in [0, 2, 3, 4, 7, 99] {
            assert_eq!(
                Algorithm::resolve(id),
                Err(CryptError::UnsupportedAlgorithm { id })
            );
        }
    }

    #[test]
    fn descriptors_match_engines() {
        for algorithm in Algorithm::ALL {
            let d = algorithm.descriptor();
            assert_eq!(algorithm.digest(b"pw", b"salt", d.min_rounds).len(), d.digest_len);
            assert_eq!(
                crate::crypto::encode::encoded_len(d.permutation),
                (d.digest_len * 8).div_ceil(6)
            );
        }
    }

    #[test]
    fn rounds_are_clamped() {
        assert_eq!(Algorithm::Sha256.clamp_rounds(500), 1000);
        assert_eq!(Algorithm::Sha512.clamp_rounds(2_000_000_000), 999_999_999);
        assert_eq!(Algorithm::Sha512.clamp_rounds(u64::MAX), 999_999_999);
        assert_eq!(Algorithm::Sha512.clamp_rounds(10_000), 10_000);
    }

    #[test]
    fn md5_ignores_rounds_parameter() {
        let salt = SaltSpec::parse("$1$rounds=5000$salt").unwrap();
        assert_eq!(Algorithm::Md5.requested_rounds(&salt).unwrap(), None);

        let salt = SaltSpec::parse("$5$rounds=5000$salt").unwrap();
        assert_eq!(Algorithm::Sha256.requested_rounds(&salt).unwrap(), Some(5000));
    }
}
