use std::sync::Mutex;

use rand::{rngs::StdRng, SeedableRng};

/// Shared source for every synthesized figure (token metrics, join dates,
/// calendar data). A fixed seed makes those figures reproducible.
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Runs `f` with exclusive access to the generator. Never hold this
    /// across an await point.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *rng)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(None)
    }
}
