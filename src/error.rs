use thiserror::Error;

/// Errors produced while computing a crypt(3) hash string.
///
/// No error is retried internally and no partial output is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CryptError {
    /// The salt string does not follow `[$<id>$[<params>$]]<text>`.
    #[error("invalid salt format at position {position}: {reason}")]
    InvalidSaltFormat {
        position: usize,
        reason: &'static str,
    },

    /// The salt names an algorithm id that is not registered.
    #[error("unsupported crypt algorithm id {id}")]
    UnsupportedAlgorithm { id: u32 },

    /// A required digest primitive or legacy delegate is not available.
    #[error("{algorithm} unavailable on this host")]
    DigestUnavailable { algorithm: String },

    /// The password cannot be represented in the byte encoding.
    #[error("password encoding unavailable: {reason}")]
    EncodingUnavailable { reason: String },

    #[error("OS random generator unavailable")]
    RandomUnavailable,
}

impl CryptError {
    pub(crate) fn salt(position: usize, reason: &'static str) -> Self {
        CryptError::InvalidSaltFormat { position, reason }
    }
}
