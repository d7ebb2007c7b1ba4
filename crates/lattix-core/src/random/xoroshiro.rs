//! The xoroshiro128 family (Blackman & Vigna): two 64-bit words of state,
//! a period of 2^128 - 1.
//!
//! The all-zero state is a fixed point. [`new`](Xoroshiro128Plus::new)
//! expands the seed through `SplitMix64`, which never yields it;
//! `from_state` accepts whatever the caller supplies.

use rand::RngCore;

use super::{Prng, Uniform, f32_from_u64, f64_from_u64, fill_via_u64, splitmix64};

fn expand_seed(seed: u64) -> [u64; 2] {
    let mut sm = seed;
    [splitmix64(&mut sm), splitmix64(&mut sm)]
}

/// Xoroshiro128+: output is the sum of the two state words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoroshiro128Plus {
    s: [u64; 2],
}

/// Xoroshiro128++: a rotate-add scrambler over the same state transition
/// shape, with better low bits than [`Xoroshiro128Plus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoroshiro128PlusPlus {
    s: [u64; 2],
}

impl Prng for Xoroshiro128Plus {
    type Word = u64;
    const NAME: &'static str = "Xoroshiro128+";

    fn seeded(seed: u64) -> Self {
        Self::new(seed)
    }

    #[inline]
    fn next_word(&mut self) -> u64 {
        let [s0, mut s1] = self.s;
        let result = s0.wrapping_add(s1);
        s1 ^= s0;
        self.s = [s0.rotate_left(24) ^ s1 ^ (s1 << 16), s1.rotate_left(37)];
        result
    }
}

impl Prng for Xoroshiro128PlusPlus {
    type Word = u64;
    const NAME: &'static str = "Xoroshiro128++";

    fn seeded(seed: u64) -> Self {
        Self::new(seed)
    }

    #[inline]
    fn next_word(&mut self) -> u64 {
        let [s0, mut s1] = self.s;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);
        s1 ^= s0;
        self.s = [s0.rotate_left(49) ^ s1 ^ (s1 << 21), s1.rotate_left(28)];
        result
    }
}

macro_rules! impl_xoroshiro {
    ($name:ident) => {
        impl $name {
            /// Expand `seed` into the two state words with `SplitMix64`.
            pub fn new(seed: u64) -> Self {
                Self {
                    s: expand_seed(seed),
                }
            }

            pub fn from_state(state: [u64; 2]) -> Self {
                Self { s: state }
            }

            pub fn state(&self) -> [u64; 2] {
                self.s
            }
        }

        impl Uniform<f64> for $name {
            #[inline]
            fn next_uniform(&mut self) -> f64 {
                f64_from_u64(self.next_word())
            }
        }

        impl Uniform<f32> for $name {
            #[inline]
            fn next_uniform(&mut self) -> f32 {
                f32_from_u64(self.next_word())
            }
        }

        impl RngCore for $name {
            fn next_u32(&mut self) -> u32 {
                (self.next_word() >> 32) as u32
            }

            fn next_u64(&mut self) -> u64 {
                self.next_word()
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                fill_via_u64(self, dest);
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

impl_xoroshiro!(Xoroshiro128Plus);
impl_xoroshiro!(Xoroshiro128PlusPlus);
