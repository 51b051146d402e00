//! Cache key generation.
//!
//! A fingerprint is a pure function of the normalized request fields: the same
//! fields always produce the same key, across process restarts. No randomness
//! and no time component may enter the digest.

use sha2::{Digest, Sha256};

/// Unit separator — cannot appear in trimmed user text, so field boundaries
/// stay unambiguous ("ab" + "c" never collides with "a" + "bc").
const FIELD_DELIMITER: &str = "\u{1f}";

/// Derives a cache key for a request kind from its semantically relevant
/// fields. Fields are trimmed (case-preserved), joined, and hashed; the kind
/// namespaces the digest so the two endpoints never share entries.
pub fn fingerprint(kind: &str, fields: &[&str]) -> String {
    let joined = fields
        .iter()
        .map(|f| f.trim())
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER);

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    format!("{kind}:{:x}", hasher.finalize())
}
