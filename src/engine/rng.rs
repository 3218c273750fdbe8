//! Seeded random streams.
//!
//! Game mechanics and narrative flavor draw from separate ChaCha streams
//! derived from one seed. Flavor draws never shift the mechanics sequence,
//! so narrative changes cannot alter outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha stream id of the mechanics generator.
const MECHANICS_STREAM: u64 = 0;

/// ChaCha stream id of the flavor generator.
const FLAVOR_STREAM: u64 = 1;

/// The two random streams of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngStreams {
    /// Act chances, success and windfall draws, tension rolls, crisis and
    /// action selection.
    pub mechanics: ChaCha8Rng,
    /// Flavor events, reflections, reactions and briefings.
    pub flavor: ChaCha8Rng,
}

impl RngStreams {
    /// Derive both streams from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut mechanics = ChaCha8Rng::seed_from_u64(seed);
        mechanics.set_stream(MECHANICS_STREAM);
        let mut flavor = ChaCha8Rng::seed_from_u64(seed);
        flavor.set_stream(FLAVOR_STREAM);
        Self { mechanics, flavor }
    }
}

/// Bernoulli trial that tolerates out-of-range probabilities.
///
/// `p` is clamped into `[0, 1]`; NaN never succeeds.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}
