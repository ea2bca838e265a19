#[derive(thiserror::Error, Debug)]
#[error("failed to hash password: {0}")]
pub struct HashingError(pub String);

#[derive(thiserror::Error, Debug)]
#[error("stored password hash is malformed: {0}")]
pub struct MalformedHashError(pub String);

/// One-way, salted password hashing.
///
/// `hash` must produce a different output for every call, even for the same
/// plaintext. `verify` returns `Ok(false)` on a mismatch and only errors when
/// the stored hash cannot be parsed.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, HashingError>;

    fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, MalformedHashError>;

    /// Spend roughly the cost of one `verify` without a stored hash to compare
    /// against, so a lookup miss is not observable through response timing.
    fn verify_dummy(&self, _plaintext: &str) {}
}
