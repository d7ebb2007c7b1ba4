//! Xoshiro128+ (Blackman & Vigna): four 32-bit words of state, a period of
//! 2^128 - 1.

use rand::RngCore;

use super::{Prng, Uniform, f32_from_u32, fill_via_u64, splitmix64};

/// Xoshiro128+: four 32-bit words of state, single-precision deviates.
///
/// ```
/// use lattix_core::random::{Prng, Xoshiro128Plus};
///
/// let mut rng = Xoshiro128Plus::from_state([1, 2, 3, 4]);
/// assert_eq!(rng.next_word(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro128Plus {
    s: [u32; 4],
}

impl Xoshiro128Plus {
    /// Expand `seed` with `SplitMix64`; each output fills two state words,
    /// low half first.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let x = splitmix64(&mut sm);
        let y = splitmix64(&mut sm);
        Self {
            s: [x as u32, (x >> 32) as u32, y as u32, (y >> 32) as u32],
        }
    }

    pub fn from_state(state: [u32; 4]) -> Self {
        Self { s: state }
    }

    pub fn state(&self) -> [u32; 4] {
        self.s
    }
}

impl Prng for Xoshiro128Plus {
    type Word = u32;
    const NAME: &'static str = "Xoshiro128+";

    fn seeded(seed: u64) -> Self {
        Self::new(seed)
    }

    #[inline]
    fn next_word(&mut self) -> u32 {
        let [a, b, c, d] = &mut self.s;
        let result = a.wrapping_add(*d);
        let t = *b << 9;
        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;
        *c ^= t;
        *d = d.rotate_left(11);
        result
    }
}

impl Uniform<f32> for Xoshiro128Plus {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        f32_from_u32(self.next_word())
    }
}

impl RngCore for Xoshiro128Plus {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_word());
        let hi = u64::from(self.next_word());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_via_u64(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn take(rng: &mut Xoshiro128Plus, n: usize) -> Vec<u32> {
        (0..n).map(|_| rng.next_word()).collect()
    }

    #[test]
    fn test_golden_from_state() {
        let mut rng = Xoshiro128Plus::from_state([1, 2, 3, 4]);
        assert_eq!(
            take(&mut rng, 6),
            vec![0x5, 0x3007, 0x0180_3007, 0x01a0_5c0e, 0x0260_840a, 0x43f8_7e19]
        );
    }

    #[test]
    fn test_golden_seed_42() {
        let mut rng = Xoshiro128Plus::new(42);
        assert_eq!(rng.state(), [0x2feb_6e95, 0xbdd7_3226, 0xb266_f103, 0x28ef_e333]);
        assert_eq!(
            take(&mut rng, 5),
            vec![0x58db_51c8, 0x815c_6c29, 0xec0a_8dcf, 0xa5de_31d4, 0x93b4_5736]
        );
    }

    #[test]
    fn test_first_deviate_from_small_state() {
        let x: f32 = Xoshiro128Plus::from_state([1, 2, 3, 4]).next_uniform();
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_next_u64_packs_two_words() {
        let mut words = Xoshiro128Plus::from_state([1, 2, 3, 4]);
        let mut packed = words.clone();
        assert_eq!(packed.next_u64(), 0x3007_0000_0005);
        assert_eq!(take(&mut words, 2), vec![0x5, 0x3007]);
    }

    #[test]
    fn test_seeds_diverge() {
        let a = take(&mut Xoshiro128Plus::new(10), 16);
        assert_ne!(a, take(&mut Xoshiro128Plus::new(11), 16));
        assert_eq!(a, take(&mut Xoshiro128Plus::new(10), 16));
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = Xoshiro128Plus::new(2024);
        for _ in 0..1_000_000 {
            let x: f32 = rng.next_uniform();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
