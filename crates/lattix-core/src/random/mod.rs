//! Deterministic pseudo-random number generators.
//!
//! Four small-state generators, each a pure state machine: a draw advances
//! the state and derives one output word, and a uniform draw rescales that
//! word into `[0, 1)`.
//!
//! | Generator | State | Word | Deviates |
//! |-----------|-------|------|----------|
//! | [`WyRand`] | 1 x u64 | u64 | `f32`, `f64` |
//! | [`Xoroshiro128Plus`] | 2 x u64 | u64 | `f32`, `f64` |
//! | [`Xoroshiro128PlusPlus`] | 2 x u64 | u64 | `f32`, `f64` |
//! | [`Xoshiro128Plus`] | 4 x u32 | u32 | `f32` |
//!
//! # Seeding
//!
//! A seed fully determines the output sequence. When no seed is given the
//! caller passes an [`EntropySource`]; there is no hidden global state.
//! With the `os-entropy` feature, [`OsEntropy`] reads the platform source.
//!
//! ```
//! use lattix_core::random::{Prng, Uniform, WyRand};
//! use rand::rngs::mock::StepRng;
//!
//! let mut a = WyRand::new(42);
//! let mut b = WyRand::with_seed(None, &mut StepRng::new(42, 0));
//! assert_eq!(a.next_word(), b.next_word());
//!
//! let x: f64 = a.next_uniform();
//! assert!((0.0..1.0).contains(&x));
//! ```
//!
//! Every generator also implements [`rand::RngCore`].

mod wyrand;
mod xoroshiro;
mod xoshiro;

pub use wyrand::WyRand;
pub use xoroshiro::{Xoroshiro128Plus, Xoroshiro128PlusPlus};
pub use xoshiro::Xoshiro128Plus;

#[cfg(feature = "os-entropy")]
pub use rand::rngs::OsRng as OsEntropy;

use rand::RngCore;

/// A seedable generator producing one raw word per step.
pub trait Prng: Sized {
    /// The raw output word.
    type Word: Copy + core::fmt::Debug;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Deterministically derive the initial state from `seed`.
    fn seeded(seed: u64) -> Self;

    /// Advance the state and return the next output word.
    fn next_word(&mut self) -> Self::Word;

    /// Seed from one draw of `entropy`.
    fn from_entropy<E: EntropySource + ?Sized>(entropy: &mut E) -> Self {
        let seed = entropy.next_seed();
        log::debug!("seeding {} from entropy source", Self::NAME);
        log::trace!("{} seed: {seed:#018x}", Self::NAME);
        Self::seeded(seed)
    }

    /// Use `seed` when given, otherwise draw one from `entropy`.
    fn with_seed<E: EntropySource + ?Sized>(seed: Option<u64>, entropy: &mut E) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(entropy),
        }
    }

    /// Seed from the platform entropy source.
    #[cfg(feature = "os-entropy")]
    fn from_os_entropy() -> Self {
        Self::from_entropy(&mut OsEntropy)
    }
}

/// Uniform deviates in `[0, 1)`.
pub trait Uniform<F> {
    fn next_uniform(&mut self) -> F;
}

/// Where unseeded generators get their seed.
///
/// Any [`RngCore`] is an entropy source, so tests can inject
/// `rand::rngs::mock::StepRng` and generators can seed one another.
pub trait EntropySource {
    fn next_seed(&mut self) -> u64;
}

impl<R: RngCore + ?Sized> EntropySource for R {
    fn next_seed(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Advance a `SplitMix64` state by one step and return the mixed output.
///
/// Used to expand a single `u64` seed into wider generator state.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

const F64_UNIT: f64 = 1.0 / (1_u64 << 53) as f64;
const F32_UNIT: f32 = 1.0 / (1_u32 << 24) as f32;

/// Top 53 bits scaled by 2^-53.
#[inline]
fn f64_from_u64(word: u64) -> f64 {
    (word >> 11) as f64 * F64_UNIT
}

/// Top 24 bits scaled by 2^-24.
#[inline]
fn f32_from_u64(word: u64) -> f32 {
    (word >> 40) as f32 * F32_UNIT
}

#[inline]
fn f32_from_u32(word: u32) -> f32 {
    (word >> 8) as f32 * F32_UNIT
}

/// Little-endian fill from successive `next_u64` draws.
fn fill_via_u64<R: RngCore + ?Sized>(rng: &mut R, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(8) {
        let bytes = rng.next_u64().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
