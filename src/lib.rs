//! `crypt(3)` compatible password hashing: MD5-crypt (`$1$`),
//! SHA-256-crypt (`$5$`) and SHA-512-crypt (`$6$`).
//!
//! ```
//! let hash = crypt3::crypt("password", "$1$5pZSV9va").unwrap();
//! assert_eq!(hash, "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
//! ```

pub mod algorithm;
pub mod crypto;
mod error;
pub mod format;
mod legacy;
mod password;
pub mod salt;

use std::fmt;

use tracing::{debug, trace};

pub use crate::algorithm::{Algorithm, AlgorithmDescriptor};
pub use crate::crypto::gen_salt;
pub use crate::error::CryptError;
pub use crate::legacy::LegacyCrypt;
pub use crate::password::Password;
pub use crate::salt::SaltSpec;
use crate::legacy::{LEGACY_NAME, LEGACY_SALT_LEN};
use crate::salt::UNTYPED_ID;

/// Hashes passwords for any supported salt, optionally delegating
/// untyped salts to a legacy DES implementation.
///
/// Holds no mutable state; one instance can serve many threads.
#[derive(Default)]
pub struct Crypter {
    legacy: Option<Box<dyn LegacyCrypt>>,
}

impl fmt::Debug for Crypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crypter")
            .field("legacy", &self.legacy.is_some())
            .finish()
    }
}

impl Crypter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `delegate` for untyped (DES) salts.
    pub fn with_legacy(delegate: impl LegacyCrypt + 'static) -> Self {
        Self {
            legacy: Some(Box::new(delegate)),
        }
    }

    /// Computes the crypt(3) string for `password` under `salt`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the salt is malformed ([`CryptError::InvalidSaltFormat`])
    /// - the salt names an unknown algorithm ([`CryptError::UnsupportedAlgorithm`])
    /// - the salt is untyped and no legacy delegate is configured
    ///   ([`CryptError::DigestUnavailable`])
    pub fn crypt(&self, password: &Password, salt: &str) -> Result<String, CryptError> {
        let spec = SaltSpec::parse(salt)?;

        if spec.id() == UNTYPED_ID {
            return self.legacy_crypt(password, &spec);
        }

        let algorithm = Algorithm::resolve(spec.id())?;
        let d = algorithm.descriptor();

        let requested = algorithm.requested_rounds(&spec)?;
        let rounds = requested.unwrap_or(d.default_rounds);
        let salt_text = spec.text_truncated(d.max_salt_len);

        debug!(
            id = d.id,
            algorithm = d.digest_name,
            rounds,
            salt_len = salt_text.len(),
            "computing crypt hash"
        );

        let digest = algorithm.digest(password.as_bytes(), salt_text.as_bytes(), rounds);
        let hash = crypto::encode(&digest, d.permutation);

        Ok(format::render(d.id, requested, salt_text, &hash))
    }

    fn legacy_crypt(&self, password: &Password, spec: &SaltSpec) -> Result<String, CryptError> {
        let Some(legacy) = &self.legacy else {
            return Err(CryptError::DigestUnavailable {
                algorithm: LEGACY_NAME.to_string(),
            });
        };

        trace!("delegating untyped salt to legacy crypt");
        let hash = legacy.crypt(password.as_bytes(), spec.text_truncated(LEGACY_SALT_LEN))?;
        Ok(format::render(UNTYPED_ID, None, spec.text(), &hash))
    }
}

/// Computes the crypt(3) string for `password` under `salt`.
///
/// The password is copied into a [`Password`] that is wiped before
/// returning. Untyped salts fail; use [`Crypter::with_legacy`] for those.
///
/// # Errors
///
/// See [`Crypter::crypt`].
pub fn crypt(password: impl AsRef<[u8]>, salt: &str) -> Result<String, CryptError> {
    crypt_password(&Password::new(password.as_ref()), salt)
}

/// Like [`crypt`], for a password the caller already holds in a [`Password`].
///
/// # Errors
///
/// See [`Crypter::crypt`].
pub fn crypt_password(password: &Password, salt: &str) -> Result<String, CryptError> {
    Crypter::new().crypt(password, salt)
}
