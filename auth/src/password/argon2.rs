use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fixed work factor chosen at construction. Hashes are
/// self-describing PHC strings, so hashes produced under an older work factor
/// keep verifying after the parameters change.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the argon2 crate's recommended defaults.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `memory_cost_kib` - Memory size in KiB
    /// * `iterations` - Number of passes over memory
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_cost_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_cost_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`. Only a hash that cannot be read as an
    /// Argon2 PHC string is reported as an error.
    ///
    /// # Errors
    /// * `InvalidHash` - Stored hash is structurally invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8 * 1024, 1, 1).expect("valid params")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = fast_hasher();

        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password", &first).unwrap());
        assert!(hasher.verify("password", &second).unwrap());
    }

    #[test]
    fn test_work_factor_is_embedded_in_hash() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.contains("m=8192,t=1,p=1"));

        // A hasher with another work factor still verifies the old hash.
        let other = PasswordHasher::with_params(16 * 1024, 2, 1).unwrap();
        assert!(other.verify("password", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PasswordHasher::with_params(1, 1, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hasher = fast_hasher();
        let hash = hasher.hash("").unwrap();

        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify(" ", &hash).unwrap());
    }
}
