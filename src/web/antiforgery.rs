//! Anti-forgery tokens for POST forms.
//!
//! One token is minted per process and embedded in every form as the
//! `__RequestVerificationToken` hidden field. POSTs carrying anything else are
//! rejected before the store is touched.

use crate::error::{Result, TrackingError};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Mint a fresh token: hex SHA-256 of 32 bytes from the thread-local CSPRNG.
#[must_use]
pub fn generate_token() -> String {
    let mut seed = [0u8; 32];
    rand::rng().fill(&mut seed);
    format!("{:x}", Sha256::digest(seed))
}

/// Check a submitted token against the expected one.
///
/// # Errors
///
/// Returns `AntiForgery` if the token is missing or does not match.
pub fn verify_token(expected: &str, submitted: Option<&str>) -> Result<()> {
    match submitted {
        Some(submitted) if tokens_equal(expected.as_bytes(), submitted.as_bytes()) => Ok(()),
        _ => Err(TrackingError::AntiForgery),
    }
}

fn tokens_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_lowercase_hex() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn tokens_differ_between_calls() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn tokens_share_no_common_prefix() {
        let tokens: HashSet<String> = (0..64).map(|_| generate_token()[..8].to_string()).collect();
        assert_eq!(tokens.len(), 64);
    }

    #[test]
    fn verify_accepts_matching_token() {
        let token = generate_token();
        assert!(verify_token(&token, Some(&token)).is_ok());
    }

    #[test]
    fn verify_rejects_missing_or_wrong_token() {
        let token = generate_token();
        assert!(matches!(
            verify_token(&token, None),
            Err(TrackingError::AntiForgery)
        ));
        assert!(verify_token(&token, Some("")).is_err());
        assert!(verify_token(&token, Some(&generate_token())).is_err());
        assert!(verify_token(&token, Some(&token[..10])).is_err());
    }
}
