//! WyRand (Wang Yi): a 64-bit Weyl counter folded through a 128-bit multiply.

use rand::RngCore;

use super::{Prng, Uniform, f32_from_u64, f64_from_u64, fill_via_u64};

const INCREMENT: u64 = 0x2d35_8dcc_aa6c_78a5;
const MIX: u64 = 0x8bb8_4b93_962e_acc9;

/// WyRand: a 64-bit counter passed through a 128-bit multiply-fold.
///
/// ```
/// use lattix_core::random::{Uniform, WyRand};
///
/// let mut rng = WyRand::new(42);
/// let x: f32 = rng.next_uniform();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WyRand {
    state: u64,
}

impl WyRand {
    /// The seed is used as the state directly.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn from_state(state: u64) -> Self {
        Self { state }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Prng for WyRand {
    type Word = u64;
    const NAME: &'static str = "WyRand";

    fn seeded(seed: u64) -> Self {
        Self::new(seed)
    }

    #[inline]
    fn next_word(&mut self) -> u64 {
        self.state = self.state.wrapping_add(INCREMENT);
        let t = u128::from(self.state) * u128::from(self.state ^ MIX);
        (t as u64) ^ ((t >> 64) as u64)
    }
}

impl Uniform<f64> for WyRand {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        f64_from_u64(self.next_word())
    }
}

impl Uniform<f32> for WyRand {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        f32_from_u64(self.next_word())
    }
}

impl RngCore for WyRand {
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
