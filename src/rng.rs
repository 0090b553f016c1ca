//! Seeded random streams
//!
//! Each engine draws physical decisions (tie-breaks, decay rolls, placement)
//! and cosmetic decisions (palette picks) from separate PCG streams.

use rand_pcg::Pcg32;

const PHYSICS_STREAM: u64 = 0x5eed_0001;
const COSMETIC_STREAM: u64 = 0x5eed_0002;

/// Physics and cosmetic RNG streams derived from one seed
#[derive(Debug, Clone)]
pub struct RngStreams {
    pub physics: Pcg32,
    pub cosmetic: Pcg32,
}

impl RngStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            physics: Pcg32::new(seed, PHYSICS_STREAM),
            cosmetic: Pcg32::new(seed, COSMETIC_STREAM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_streams() {
        let mut a = RngStreams::new(7);
        let mut b = RngStreams::new(7);
        for _ in 0..16 {
            assert_eq!(a.physics.random::<u32>(), b.physics.random::<u32>());
            assert_eq!(a.cosmetic.random::<u32>(), b.cosmetic.random::<u32>());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut s = RngStreams::new(7);
        let physics: Vec<u32> = (0..8).map(|_| s.physics.random()).collect();
        let cosmetic: Vec<u32> = (0..8).map(|_| s.cosmetic.random()).collect();
        assert_ne!(physics, cosmetic);
    }
}
