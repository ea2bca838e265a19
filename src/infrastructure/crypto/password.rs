use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, Salt, SaltString},
};
use password_hash::rand_core::{OsRng, RngCore};

use crate::application::ports::password_hasher::{
    HashingError, MalformedHashError, PasswordHasher,
};

const SALT_LEN: usize = Salt::RECOMMENDED_LENGTH;

// Same algorithm and cost as `Params::DEFAULT`, so verifying against it costs
// as much as verifying a real account hash.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Argon2id hasher with a fixed work factor (19 MiB, 2 passes, 1 lane).
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| HashingError(format!("random source unavailable: {e}")))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| HashingError(e.to_string()))?;
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| HashingError(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, MalformedHashError> {
        let parsed = PasswordHash::new(stored).map_err(|e| MalformedHashError(e.to_string()))?;
        // The output comparison inside `verify_password` is constant-time.
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(MalformedHashError(e.to_string())),
        }
    }

    fn verify_dummy(&self, plaintext: &str) {
        if let Err(e) = self.verify(plaintext, DECOY_HASH) {
            tracing::warn!(error = %e, "decoy_hash_verification_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_password_it_hashed() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "secret123");
        assert!(hasher.verify("secret123", &hash).unwrap());
    }

    #[test]
    fn rejects_a_different_password() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret123").unwrap();
        assert!(!hasher.verify("secret124", &hash).unwrap());
        assert!(!hasher.verify("", &hash).unwrap());
    }

    #[test]
    fn salts_every_hash() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("same password", &a).unwrap());
        assert!(hasher.verify("same password", &b).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("secret123", "not-a-phc-string").is_err());
        assert!(hasher.verify("secret123", "").is_err());
    }

    #[test]
    fn decoy_hash_parses() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("anything", DECOY_HASH).unwrap());
    }
}
