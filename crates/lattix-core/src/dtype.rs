//! Element types storable in a container.
//!
//! The trait hierarchy is:
//! ```text
//! Scalar      (i8 .. u64, isize, usize, f32, f64)
//!   └── Float (f32, f64)
//! ```
//!
//! Shape, indexing, equality and display logic is written once against
//! [`Scalar`]; anything that needs transcendental functions asks for
//! [`Float`]. The concrete type is picked at compile time.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

/// Numeric precision of an element type, as seen by a compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 32-bit IEEE-754.
    Single,
    /// 64-bit IEEE-754.
    Double,
    /// Any fixed-width integer.
    Integer,
}

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Base trait for all element types.
///
/// Integer containers are first-class: nothing here requires
/// floating-point operations.
pub trait Scalar:
    Copy
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    /// Precision tag used for backend capability checks.
    const PRECISION: Precision;

    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Convert from `usize`.
    fn from_usize(v: usize) -> Self;

    /// Byte-wise equality.
    ///
    /// For floats this compares bit patterns: a NaN equals itself and
    /// `0.0` differs from `-0.0`.
    fn bit_eq(self, other: Self) -> bool;
}

/// Floating-point element types (`f32`, `f64`).
pub trait Float: Scalar {
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn powf(self, n: Self) -> Self;
}

macro_rules! impl_scalar_float {
    ($ty:ty, $precision:expr) => {
        impl Scalar for $ty {
            const PRECISION: Precision = $precision;

            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
            #[inline]
            fn bit_eq(self, other: Self) -> bool {
                self.to_bits() == other.to_bits()
            }
        }

        impl Float for $ty {
            #[inline]
            fn exp(self) -> Self {
                <$ty>::exp(self)
            }
            #[inline]
            fn ln(self) -> Self {
                <$ty>::ln(self)
            }
            #[inline]
            fn powf(self, n: Self) -> Self {
                <$ty>::powf(self, n)
            }
        }
    };
}

impl_scalar_float!(f32, Precision::Single);
impl_scalar_float!(f64, Precision::Double);

macro_rules! impl_scalar_int {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const PRECISION: Precision = Precision::Integer;

                #[inline]
                fn zero() -> Self {
                    0
                }
                #[inline]
                fn one() -> Self {
                    1
                }
                #[inline]
                #[allow(clippy::cast_possible_wrap)]
                fn from_usize(v: usize) -> Self {
                    v as Self
                }
                #[inline]
                fn bit_eq(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
