//! Seam for the legacy DES-based crypt (untyped salts).
//!
//! The DES variant is not implemented here. Callers that need it supply a
//! delegate; without one, untyped salts fail with
//! [`CryptError::DigestUnavailable`].

use crate::error::CryptError;

/// Number of salt characters handed to the delegate.
pub const LEGACY_SALT_LEN: usize = 2;

/// Name reported when no delegate is configured.
pub const LEGACY_NAME: &str = "legacy DES crypt";

/// A provider of the traditional DES-based `crypt(3)`.
pub trait LegacyCrypt: Send + Sync {
    /// Hashes `password` with the first two characters of the salt text.
    fn crypt(&self, password: &[u8], salt: &str) -> Result<String, CryptError>;
}

impl<F> LegacyCrypt for F
where
    F: Fn(&[u8], &str) -> Result<String, CryptError> + Send + Sync,
{
    fn crypt(&self, password: &[u8], salt: &str) -> Result<String, CryptError> {
        self(password, salt)
    }
}
