//! A simple pseudorandom number generator.
//!
//! A translation of the minimal C implementation of PCG32 from <https://www.pcg-random.org/>, implementing [RngCore] so the methods of [rand::Rng] are available.
//!
//! Each [oracle](crate::oracle) owns an instance, seeded from [random_seed](crate::config::Config::random_seed), to shuffle the order in which atoms are decided and to choose random phases.
//! So, for a fixed seed, builds are deterministic.

use rand_core::{impls, RngCore, SeedableRng};

/// State and increment
#[derive(Clone, Debug, Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let previous = self.state;

        self.state = previous
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = (((previous >> 18) ^ previous) >> 27) as u32;
        let rotation = (previous >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Odd, as required of the increment.
        const INCREMENT: u64 = 1442695040888963407;
        let mut rng = Self {
            state: 0,
            inc: INCREMENT,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(u64::from_le_bytes(seed));
        rng.next_u32();
        rng
    }
}
