//! Credential fingerprinting.
//!
//! Pure functions only. Zero imports from `crate::infra`,
//! `crate::application`, `std::fs`, or `std::net`.

use sha2::{Digest, Sha256};

/// Number of lowercase hex characters in a credential fingerprint.
pub const FINGERPRINT_LEN: usize = 12;

/// Derive the short fingerprint for an ordered sequence of credential values.
///
/// Values are concatenated in the order given and digested with SHA-256; the
/// fingerprint is the first [`FINGERPRINT_LEN`] hex characters. Order is
/// significant: swapping two values produces a different fingerprint. An
/// empty sequence is legal and yields the digest of empty input.
///
/// Stored keynames embed this fingerprint, so the algorithm and length must
/// not change once keys exist on disk.
#[must_use]
pub fn credential_fingerprint<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for value in values {
        hasher.update(value.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    hex_encode(&digest[..FINGERPRINT_LEN / 2])
}

/// Encode bytes as lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
