use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hex-encoded SHA-256 digest of a password. Unsalted, matching the stored user rows.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compare a password against a stored hex digest
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(stored_digest)
}

/// Mint an opaque session token
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify() {
        let password = "test_password_123";

        let digest = hash_password(password);
        assert_eq!(digest.len(), 64);
        assert!(verify_password(password, &digest));
        assert!(!verify_password("wrong_password", &digest));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
