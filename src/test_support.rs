use crate::application::ports::password_hasher::{
    HashingError, MalformedHashError, PasswordHasher,
};

/// Cheap reversible stand-in for the Argon2 hasher, for workflow tests only.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        Ok(format!("plain${plaintext}"))
    }

    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, MalformedHashError> {
        let inner = stored
            .strip_prefix("plain$")
            .ok_or_else(|| MalformedHashError(stored.to_string()))?;
        Ok(inner == plaintext)
    }
}
