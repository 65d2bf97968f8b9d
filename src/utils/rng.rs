use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hands out deterministic, independent RNG streams per subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    /// Uses the configured seed, or draws one when none is given.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    // Hash the subsystem name with the master seed
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_manager_consistency() {
        let rng_manager = RngManager::new(42);

        let first: Vec<f64> = {
            let mut rng = rng_manager.get_rng("blades");
            (0..5).map(|_| rng.gen::<f64>()).collect()
        };
        let second: Vec<f64> = {
            let mut rng = rng_manager.get_rng("blades");
            (0..5).map(|_| rng.gen::<f64>()).collect()
        };

        assert_eq!(
            first, second,
            "RNG sequences should be identical for same seed and subsystem"
        );
    }

    #[test]
    fn test_rng_manager_different_subsystems() {
        let rng_manager = RngManager::new(42);
        let mut blades = rng_manager.get_rng("blades");
        let mut sensors = rng_manager.get_rng("sensors");

        let sequence1: Vec<f64> = (0..5).map(|_| blades.gen()).collect();
        let sequence2: Vec<f64> = (0..5).map(|_| sensors.gen()).collect();

        assert_ne!(
            sequence1, sequence2,
            "Different subsystems should get different RNG sequences"
        );
    }

    #[test]
    fn test_optional_seed_is_kept() {
        assert_eq!(RngManager::from_optional_seed(Some(7)).master_seed(), 7);
    }
}
