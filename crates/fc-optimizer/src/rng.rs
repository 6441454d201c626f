//! Owned, seedable random sources for the optimizers.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draw a fresh base seed from thread-local entropy.
pub(crate) fn entropy_seed() -> u64 {
    rand::rng().random()
}

pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Independent stream for one hill-climbing restart.
///
/// Every restart gets its own ChaCha stream under the shared base seed, so
/// the draws a restart sees do not depend on how many draws earlier
/// restarts made or on which thread it runs.
pub(crate) fn restart_rng(seed: u64, restart: usize) -> ChaCha8Rng {
    let mut rng = seeded_rng(seed);
    rng.set_stream(restart as u64);
    rng
}
