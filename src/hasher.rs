use argon2::password_hash::{PasswordHashString, SaltString};
use argon2::{Algorithm, Argon2, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::StdRng;

use crate::rng::SyncRng;

pub trait Hasher: Send + Sync {
    fn generate_hash(
        &self,
        password: &str,
    ) -> Result<String, argon2::password_hash::Error>;

    fn check_hash(&self, hash: &PasswordHashString, password: &str) -> bool;
}

pub struct ProductionHasher {
    params: argon2::Params,
    rng: SyncRng<StdRng>,
}

impl ProductionHasher {
    pub fn new(params: argon2::Params, rng: SyncRng<StdRng>) -> Self {
        ProductionHasher {
            params,
            rng,
        }
    }

    fn get_hasher(&self) -> Argon2<'_> {
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }

    fn make_salt(&self) -> SaltString {
        SaltString::generate(&mut *self.rng.get_rng())
    }
}

impl Hasher for ProductionHasher {
    fn generate_hash(
        &self,
        password: &str,
    ) -> Result<String, argon2::password_hash::Error> {
        let salt = self.make_salt();
        Ok(
            self.get_hasher()
                .hash_password(password.as_bytes(), &salt)?
                .serialize()
                .to_string()
        )
    }

    fn check_hash(&self, hash: &PasswordHashString, password: &str) -> bool {
        self.get_hasher()
            .verify_password(password.as_bytes(), &hash.password_hash())
            .is_ok()
    }
}

#[cfg(test)]
pub mod testing {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::ProductionHasher;
    use crate::rng::SyncRng;

    /// Cheap parameters so tests do not pay the production hashing cost.
    pub fn make_test_hasher() -> ProductionHasher {
        ProductionHasher::new(
            argon2::Params::new(8, 1, 1, Some(32))
                .expect("test params rejected"),
            SyncRng::new(StdRng::seed_from_u64(42)),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use argon2::password_hash::PasswordHashString;

    use super::testing::make_test_hasher;
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = make_test_hasher();
        let hash = hasher.generate_hash("123").unwrap();
        let hash = PasswordHashString::from_str(&hash).unwrap();
        assert!(hasher.check_hash(&hash, "123"));
        assert!(!hasher.check_hash(&hash, "1234"));
    }

    #[test]
    fn hashes_use_fresh_salts() {
        let hasher = make_test_hasher();
        let a = hasher.generate_hash("123").unwrap();
        let b = hasher.generate_hash("123").unwrap();
        assert_ne!(a, b);
    }
}
