//! Salt specification parsing.
//!
//! Salt string grammar:
//! ```text
//! [$<id>$[<params>$]]<text>
//! ```
//! A string without a leading `$` is an untyped (legacy) salt.

use std::str::FromStr;

use crate::error::CryptError;

/// Prefix of the only recognized parameter.
pub const ROUNDS_PARAM: &str = "rounds=";

/// Algorithm id used by untyped salts.
pub const UNTYPED_ID: u32 = 0;

/// A parsed salt specification. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltSpec {
    id: u32,
    params: Option<String>,
    text: String,
    // byte offset of `params` within the raw salt, for diagnostics
    params_at: usize,
}

impl SaltSpec {
    /// Parses a raw salt string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::InvalidSaltFormat`] if:
    /// - the string is empty
    /// - the algorithm id is not terminated by `$`
    /// - the algorithm id is empty or not a decimal number
    pub fn parse(salt: &str) -> Result<Self, CryptError> {
        let Some(rest) = salt.strip_prefix('$') else {
            if salt.is_empty() {
                return Err(CryptError::salt(0, "empty salt"));
            }
            return Ok(Self {
                id: UNTYPED_ID,
                params: None,
                text: salt.to_string(),
                params_at: 0,
            });
        };

        let extent = rest
            .find('$')
            .ok_or_else(|| CryptError::salt(salt.len(), "missing '$' after algorithm id"))?;

        let digits = &rest[..extent];
        if digits.is_empty() {
            return Err(CryptError::salt(1, "empty algorithm id"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptError::salt(1, "algorithm id is not a decimal number"));
        }
        let id = digits
            .parse::<u32>()
            .map_err(|_| CryptError::salt(1, "algorithm id out of range"))?;

        let params_at = 1 + extent + 1;
        let rest = &rest[extent + 1..];

        let (params, text) = match rest.find('$') {
            Some(extent) => (Some(rest[..extent].to_string()), &rest[extent + 1..]),
            None => (None, rest),
        };

        Ok(Self {
            id,
            params,
            text: text.to_string(),
            params_at,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the first `max` characters of the salt text.
    pub fn text_truncated(&self, max: usize) -> &str {
        match self.text.char_indices().nth(max) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Returns the value of an explicit `rounds=<n>` parameter, if any.
    ///
    /// Values too large for `u64` saturate; callers clamp anyway.
    /// Parameters that do not start with `rounds=` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::InvalidSaltFormat`] if the value is not a decimal number.
    pub fn rounds(&self) -> Result<Option<u64>, CryptError> {
        let Some(value) = self.params().and_then(|p| p.strip_prefix(ROUNDS_PARAM)) else {
            return Ok(None);
        };

        let position = self.params_at + ROUNDS_PARAM.len();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptError::salt(position, "rounds is not a decimal number"));
        }

        Ok(Some(value.parse::<u64>().unwrap_or(u64::MAX)))
    }
}

impl FromStr for SaltSpec {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_salt() {
        let salt = SaltSpec::parse("aSalt").unwrap();
        assert_eq!(salt.text(), "aSalt");
        assert_eq!(salt.id(), 0);
        assert_eq!(salt.params(), None);
    }

    #[test]
    fn typed_without_params() {
        let salt = SaltSpec::parse("$1$aSalt").unwrap();
        assert_eq!(salt.text(), "aSalt");
        assert_eq!(salt.id(), 1);
        assert_eq!(salt.params(), None);
    }

    #[test]
    fn typed_with_params() {
        let salt: SaltSpec = "$1$params$aSalt".parse().unwrap();
        assert_eq!(salt.text(), "aSalt");
        assert_eq!(salt.id(), 1);
        assert_eq!(salt.params(), Some("params"));
    }

    #[test]
    fn typed_with_empty_text() {
        let salt = SaltSpec::parse("$5$").unwrap();
        assert_eq!(salt.id(), 5);
        assert_eq!(salt.text(), "");

        let salt = SaltSpec::parse("$5$rounds=1000$").unwrap();
        assert_eq!(salt.params(), Some("rounds=1000"));
        assert_eq!(salt.text(), "");
    }

    #[test]
    fn text_after_second_delimiter_is_not_reparsed() {
        let salt = SaltSpec::parse("$6$rounds=10$salt$with$dollars").unwrap();
        assert_eq!(salt.params(), Some("rounds=10"));
        assert_eq!(salt.text(), "salt$with$dollars");
    }

    #[test]
    fn missing_id_terminator_fails() {
        let err = SaltSpec::parse("$5noDollar").unwrap_err();
        assert!(matches!(err, CryptError::InvalidSaltFormat { position: 10, .. }));
    }

    #[test]
    fn lone_dollar_fails() {
        assert!(matches!(
            SaltSpec::parse("$"),
            Err(CryptError::InvalidSaltFormat { .. })
        ));
    }

    #[test]
    fn empty_or_non_numeric_id_fails() {
        assert!(SaltSpec::parse("$$abc").is_err());
        assert!(SaltSpec::parse("$x1$abc").is_err());
        assert!(SaltSpec::parse("$-1$abc").is_err());
        assert!(SaltSpec::parse("$99999999999$abc").is_err());
        assert!(SaltSpec::parse("").is_err());
    }

    #[test]
    fn truncation_counts_characters() {
        let salt = SaltSpec::parse("$1$saltstringsaltstring").unwrap();
        assert_eq!(salt.text_truncated(8), "saltstri");
        assert_eq!(salt.text_truncated(64), "saltstringsaltstring");

        let salt = SaltSpec::parse("$1$ääääääääää").unwrap();
        assert_eq!(salt.text_truncated(8).chars().count(), 8);
    }

    #[test]
    fn rounds_parameter() {
        let salt = SaltSpec::parse("$6$rounds=10000$saltstring").unwrap();
        assert_eq!(salt.rounds().unwrap(), Some(10000));

        let salt = SaltSpec::parse("$6$saltstring").unwrap();
        assert_eq!(salt.rounds().unwrap(), None);

        let salt = SaltSpec::parse("$6$other=1$saltstring").unwrap();
        assert_eq!(salt.rounds().unwrap(), None);

        let salt = SaltSpec::parse("$6$rounds=99999999999999999999999$x").unwrap();
        assert_eq!(salt.rounds().unwrap(), Some(u64::MAX));
    }

    #[test]
    fn malformed_rounds_reports_position() {
        let salt = SaltSpec::parse("$6$rounds=ten$saltstring").unwrap();
        let err = salt.rounds().unwrap_err();
        assert_eq!(
            err,
            CryptError::InvalidSaltFormat {
                position: 10,
                reason: "rounds is not a decimal number"
            }
        );
    }

    #[test]
    fn signed_rounds_are_rejected() {
        for salt in ["$6$rounds=+2000$saltstring", "$6$rounds=-5$saltstring"] {
            let err = SaltSpec::parse(salt).unwrap().rounds().unwrap_err();
            assert_eq!(
                err,
                CryptError::InvalidSaltFormat {
                    position: 10,
                    reason: "rounds is not a decimal number"
                }
            );
        }
    }
}
