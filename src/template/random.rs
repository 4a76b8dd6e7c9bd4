//! Randomness providers
//!
//! Rendering needs three primitives: a uniform integer in a range, a uniform
//! pick from a sequence and an in-place shuffle. [`Randomness`] expresses
//! them over indices so the trait stays object safe and a generator can own
//! its provider as a `Box<dyn Randomness>`.
//!
//! Every [`rand::RngCore`] is a provider through a blanket impl, so any rng
//! from the `rand` ecosystem plugs in directly:
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use strgen::{GeneratorConfig, StringGenerator};
//!
//! let rng = StdRng::seed_from_u64(7);
//! let mut generator =
//!     StringGenerator::with_randomness(r"[\d]{4}", GeneratorConfig::default(), rng).unwrap();
//! assert_eq!(generator.render().len(), 4);
//! ```

use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::hash::{BuildHasher, Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed hasher keys for [`seed_from`]
const SEED_KEYS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Source of random decisions for rendering
pub trait Randomness {
    /// Uniform index in `0..bound`
    ///
    /// Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Uniform integer in `low..=high`
    fn int_in(&mut self, low: usize, high: usize) -> usize {
        match (high - low).checked_add(1) {
            Some(bound) => low + self.next_index(bound),
            // Full `usize` range: pick the top bit and the rest separately
            None => {
                let half = 1usize << (usize::BITS - 1);
                self.next_index(2) * half + self.next_index(half)
            }
        }
    }

    /// Shuffle characters in place
    fn shuffle_chars(&mut self, chars: &mut [char]) {
        for i in (1..chars.len()).rev() {
            let j = self.next_index(i + 1);
            chars.swap(i, j);
        }
    }

    /// Name reported by [`dump`](crate::StringGenerator::dump)
    fn name(&self) -> &str {
        "custom"
    }
}

impl<R: RngCore> Randomness for R {
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }

    #[inline]
    fn int_in(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..=high)
    }

    fn shuffle_chars(&mut self, chars: &mut [char]) {
        chars.shuffle(self);
    }

    fn name(&self) -> &str {
        std::any::type_name::<R>()
    }
}

/// Pick one element uniformly
pub fn choose<'a, T>(randomness: &mut dyn Randomness, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(randomness.next_index(items.len()))
}

/// Seeded, reproducible provider
pub fn seeded(seed: u64) -> Box<dyn Randomness + Send> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Cryptographically strong provider, falling back to a clock-seeded PRNG
///
/// The operating system source is checked once; when it cannot deliver
/// bytes the generator still works, only without cryptographic strength.
pub fn strong() -> Box<dyn Randomness + Send> {
    let mut bytes = [0u8; 8];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => Box::new(OsRng),
        Err(_err) => {
            log_warn!(
                "OS randomness unavailable ({}), falling back to a time-seeded PRNG",
                _err
            );
            Box::new(StdRng::seed_from_u64(clock_seed()))
        }
    }
}

/// Select the provider for a configuration: seeded when a seed is given
pub fn from_seed(seed: Option<u64>) -> Box<dyn Randomness + Send> {
    match seed {
        Some(seed) => seeded(seed),
        None => strong(),
    }
}

/// Hash an arbitrary value into a `u64` seed
///
/// Uses fixed hasher keys, so the same value maps to the same seed on every
/// run of the same build.
pub fn seed_from<S: Hash + ?Sized>(value: &S) -> u64 {
    let [k0, k1, k2, k3] = SEED_KEYS;
    let mut hasher = ahash::RandomState::with_seeds(k0, k1, k2, k3).build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
