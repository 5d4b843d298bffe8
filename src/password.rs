use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptError;

/// A password held in a buffer that is overwritten with zeros when it is
/// dropped, on success and error paths alike.
///
/// The bytes are the UTF-8 encoding for textual passwords; arbitrary byte
/// strings are accepted as-is.
pub struct Password {
    bytes: Zeroizing<Vec<u8>>,
}

impl Password {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Encodes a UTF-16 password as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::EncodingUnavailable`] on an unpaired surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self, CryptError> {
        // sized up front so the buffer never reallocates and leaves copies behind
        let mut text = Zeroizing::new(String::with_capacity(units.len() * 3));
        for (i, c) in char::decode_utf16(units.iter().copied()).enumerate() {
            let c = c.map_err(|e| CryptError::EncodingUnavailable {
                reason: format!(
                    "unpaired surrogate {:#06x} near code unit {i}",
                    e.unpaired_surrogate()
                ),
            })?;
            text.push(c);
        }
        Ok(Self {
            bytes: Zeroizing::new(std::mem::take(&mut *text).into_bytes()),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Overwrites the buffer with zeros now instead of on drop.
    pub fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Password {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<Zeroizing<String>> for Password {
    fn from(mut s: Zeroizing<String>) -> Self {
        Self::new(std::mem::take(&mut *s).into_bytes())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
