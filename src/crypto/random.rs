use getrandom::fill;

use super::encode::CRYPT_ALPHABET;
use crate::algorithm::Algorithm;
use crate::error::CryptError;
use crate::format::salt_prefix;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), CryptError> {
    fill(buf).map_err(|_| CryptError::RandomUnavailable)
}

/// Generate salt text of `len` characters from the crypt alphabet
pub fn generate_salt_text(len: usize) -> Result<String, CryptError> {
    let mut raw = vec![0u8; len];
    secure_random(&mut raw)?;
    // 64 divides 256, so masking keeps the distribution uniform
    Ok(raw
        .iter()
        .map(|b| char::from(CRYPT_ALPHABET[usize::from(b & 0x3f)]))
        .collect())
}

/// Generate a complete salt specification for `algorithm`.
///
/// `rounds` is clamped and emitted only for algorithms with tunable rounds.
pub fn gen_salt(algorithm: Algorithm, rounds: Option<u32>) -> Result<String, CryptError> {
    let d = algorithm.descriptor();
    let rounds = rounds
        .filter(|_| d.tunable_rounds())
        .map(|r| algorithm.clamp_rounds(u64::from(r)));
    let text = generate_salt_text(d.max_salt_len)?;
    Ok(salt_prefix(d.id, rounds, &text))
}
