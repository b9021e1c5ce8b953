//! Password hashing utilities
//!
//! bcrypt generates a fresh random salt for every hash. Both functions are
//! CPU-bound; async callers run them on the blocking pool.

use bcrypt::{hash, verify};

/// Cost used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}
