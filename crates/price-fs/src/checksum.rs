//! SHA-256 digest utilities
//!
//! Digests are rendered as 64 lowercase hex characters with no prefix, which
//! is the format stored in the hash file next to the synchronized output.

use sha2::{Digest, Sha256};

/// Length of a rendered digest in characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the SHA-256 digest of raw bytes as lowercase hex.
pub fn compute_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Returns true if `value` looks like a rendered SHA-256 digest.
pub fn is_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = compute_digest(b"test");
        let b = compute_digest(b"test");
        assert_eq!(a, b);
    }

    #[test]
    fn different_content_different_digest() {
        let a = compute_digest(b"aaa");
        let b = compute_digest(b"bbb");
        assert_ne!(a, b);
    }

    #[test]
    fn digest_known_value() {
        assert_eq!(
            compute_digest(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn digest_has_fixed_length_and_is_recognized() {
        let digest = compute_digest(b"");
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(is_digest(&digest));
        assert!(!is_digest("sha256:abc"));
        assert!(!is_digest(&digest.to_uppercase()));
    }
}
