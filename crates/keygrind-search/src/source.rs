//! Where candidate keypairs come from.

use keygrind_identity::Keypair;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

/// Supplies one fresh keypair per call.
pub trait KeySource {
    /// Produces the next candidate.
    fn next_keypair(&mut self) -> Keypair;
}

/// Draws every keypair from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeySource;

impl KeySource for OsKeySource {
    fn next_keypair(&mut self) -> Keypair {
        Keypair::from_rng(&mut OsRng)
    }
}

/// Reproducible keypairs from a seeded generator.
///
/// Anyone who knows the seed can recreate every key, so this is only for
/// tests and reproducible benchmarks.
#[derive(Debug, Clone)]
pub struct SeededKeySource {
    rng: StdRng,
}

impl SeededKeySource {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an independent source for one worker of a parallel search.
    #[must_use]
    pub fn for_worker(seed: u64, worker: usize) -> Self {
        Self::new(seed.wrapping_add((worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}

impl KeySource for SeededKeySource {
    fn next_keypair(&mut self) -> Keypair {
        Keypair::from_rng(&mut self.rng)
    }
}

impl<F> KeySource for F
where
    F: FnMut() -> Keypair,
{
    fn next_keypair(&mut self) -> Keypair {
        self()
    }
}
