//! Random sources used to sample fault checkpoints.
//!
//! Sampling follows a 63-bit integer model: every source yields values uniform
//! over `[0, MAX_RANGE]`, and a checkpoint triggers when the sample falls
//! strictly below its configured [`Probability`](crate::Probability).
//!
//! A process-wide default source is created lazily on first use. It is seeded
//! from the wall clock unless `MOONPOOL_CHECK_SEED` is set, in which case that
//! seed is used so a failing run can be replayed. Individual configurations
//! may carry their own [`SeededSource`] for reproducible sampling.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound (inclusive) of every sample drawn from a [`RandomSource`].
pub const MAX_RANGE: i64 = i64::MAX;

/// Environment variable overriding the seed of the process default source.
pub const SEED_ENV_VAR: &str = "MOONPOOL_CHECK_SEED";

/// A stream of non-negative 63-bit integers.
///
/// Implementations must be safe to sample from several threads at once; the
/// process default is shared by every checkpoint that does not override it.
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Draw the next value, uniform over `[0, MAX_RANGE]`.
    fn next_i63(&self) -> i64;
}

/// Seeded ChaCha8 stream guarded by a mutex.
///
/// The same seed always produces the same sequence when sampled from a single
/// caller.
pub struct SeededSource {
    seed: u64,
    rng: Mutex<ChaCha8Rng>,
}

impl SeededSource {
    /// Create a source with an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Create a source seeded from the current time in whole seconds.
    ///
    /// Not suitable for anything security related.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Debug for SeededSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededSource")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl RandomSource for SeededSource {
    fn next_i63(&self) -> i64 {
        let raw = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_u64();
        // Dropping the low bit keeps the value in [0, i64::MAX].
        (raw >> 1) as i64
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Seed override from the raw value of `MOONPOOL_CHECK_SEED`.
///
/// Surrounding whitespace is ignored. Unparsable values are logged and
/// treated as absent.
fn parse_seed(value: Option<&str>) -> Option<u64> {
    let value = value?;
    match value.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(err) => {
            tracing::warn!(
                value = %value,
                error = %err,
                "ignoring unparsable {}, seeding from time",
                SEED_ENV_VAR
            );
            None
        }
    }
}

fn default_seed() -> u64 {
    let value = std::env::var(SEED_ENV_VAR).ok();
    parse_seed(value.as_deref()).unwrap_or_else(time_seed)
}

static DEFAULT_SOURCE: LazyLock<Arc<SeededSource>> = LazyLock::new(|| {
    let seed = default_seed();
    tracing::info!(seed, "default fault source initialized");
    Arc::new(SeededSource::new(seed))
});

/// The process-wide default source, created on first call.
pub fn default_source() -> Arc<dyn RandomSource> {
    DEFAULT_SOURCE.clone()
}

/// Seed of the process-wide default source.
///
/// Handy for reporting alongside a failing test so the run can be replayed
/// with `MOONPOOL_CHECK_SEED`.
pub fn default_seed_value() -> u64 {
    DEFAULT_SOURCE.seed()
}
