//! Output string assembly.
//!
//! ```text
//! $<id>$[rounds=<n>$]<salt-text>$<encoded-hash>
//! ```

use crate::salt::{ROUNDS_PARAM, UNTYPED_ID};

/// Builds the salt prefix `$<id>$[rounds=<n>$]<salt-text>`.
///
/// `rounds` is only emitted when the caller explicitly requested it.
pub fn salt_prefix(id: u32, rounds: Option<u32>, salt_text: &str) -> String {
    let mut out = format!("${id}$");
    if let Some(rounds) = rounds {
        out.push_str(ROUNDS_PARAM);
        out.push_str(&rounds.to_string());
        out.push('$');
    }
    out.push_str(salt_text);
    out
}

/// Builds the complete crypt output string.
///
/// Untyped (id 0) output is the encoded hash alone.
pub fn render(id: u32, rounds: Option<u32>, salt_text: &str, hash: &str) -> String {
    if id == UNTYPED_ID {
        return hash.to_string();
    }
    let mut out = salt_prefix(id, rounds, salt_text);
    out.push('$');
    out.push_str(hash);
    out
}
