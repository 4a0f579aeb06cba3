use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::{Uuid, Variant, Version};

/// Shareable RNG handle. Hashing and token generation run on whatever
/// worker thread the request lands on, so the generator sits behind a lock.
pub struct SyncRng<R>(Arc<Mutex<R>>);

impl<R> Clone for SyncRng<R> {
    fn clone(&self) -> Self {
        SyncRng(self.0.clone())
    }
}

impl<R> SyncRng<R> {
    pub fn new(rng: R) -> Self {
        SyncRng(Arc::new(Mutex::new(rng)))
    }

    pub fn get_rng(&self) -> MutexGuard<'_, R> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SyncRng<StdRng> {
    pub fn from_entropy() -> Self {
        SyncRng::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SyncRng<R> {
    pub fn make_uuid(&self) -> Uuid {
        make_uuid(&mut *self.get_rng())
    }
}

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = SyncRng::new(StdRng::seed_from_u64(7)).make_uuid();
        let b = SyncRng::new(StdRng::seed_from_u64(7)).make_uuid();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_uuids_are_v4() {
        let rng = SyncRng::new(StdRng::seed_from_u64(0));
        let id = rng.make_uuid();
        assert_eq!(id.get_version(), Some(Version::Random));
        assert_ne!(rng.make_uuid(), id);
    }
}
