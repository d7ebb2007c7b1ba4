//! [`Vector`]: the rank-1 container.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use crate::{Float, Scalar};
use crate::backend::{Backend, BinaryOp, MatmulDims, ReferenceBackend};
use crate::error::{CoreError, Result};
use crate::random::Uniform;
use crate::shape::Shape;
use crate::storage::Storage;

use super::ops::{assert_same_shape, dispatch};
use super::{ShapedArray, elements_bit_eq};

/// A one-dimensional container.
#[derive(Debug, Clone)]
pub struct Vector<T: Scalar> {
    inner: ShapedArray<T>,
}

impl<T: Scalar> Vector<T> {
    /// A zero-filled vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self {
            inner: ShapedArray::zeros([len]),
        }
    }

    /// Take ownership of `data` as the vector's elements.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: ShapedArray::from_parts(Shape::from([data.len()]), Storage::from_vec(data)),
        }
    }

    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Build element `i` as `f(i)`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self::from_vec((0..len).map(f).collect())
    }

    /// `[0, 1, .., len - 1]`.
    ///
    /// ```
    /// use lattix_core::array::Vector;
    ///
    /// assert_eq!(Vector::<u8>::arange(4).to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn arange(len: usize) -> Self {
        Self::from_fn(len, T::from_usize)
    }

    /// Draw `len` uniform deviates in `[0, 1)` from `rng`.
    ///
    /// ```
    /// use lattix_core::array::Vector;
    /// use lattix_core::random::WyRand;
    ///
    /// let mut rng = WyRand::new(7);
    /// let v = Vector::<f64>::uniform(&mut rng, 4);
    /// assert_eq!(v.len(), 4);
    /// assert!(v.to_vec().iter().all(|x| (0.0..1.0).contains(x)));
    /// ```
    pub fn uniform<R: Uniform<T> + ?Sized>(rng: &mut R, len: usize) -> Self {
        Self::from_fn(len, |_| rng.next_uniform())
    }

    /// A zero-filled vector of the same length with its own buffer.
    pub fn like(other: &Self) -> Self {
        Self::zeros(other.len())
    }

    /// A second vector over the same buffer.
    pub fn alias(&self) -> Self {
        Self {
            inner: self.inner.alias(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.numel()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, i: usize) -> Result<T> {
        self.inner.get(&[i])
    }

    pub fn set(&self, i: usize, value: T) -> Result<()> {
        self.inner.set(&[i], value)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.inner.shares_storage_with(&other.inner)
    }

    pub fn as_shaped(&self) -> &ShapedArray<T> {
        &self.inner
    }

    pub fn into_shaped(self) -> ShapedArray<T> {
        self.inner
    }

    /// Inner product, computed by `backend` as a `1 x n` by `n x 1` product.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn dot_with<B: Backend>(&self, backend: &B, other: &Self) -> T {
        assert_same_shape(self.inner.shape(), other.inner.shape());
        let dims = MatmulDims {
            m: 1,
            k: self.len(),
            n: 1,
        };
        let out = dispatch(backend, format_args!("dot"), Shape::from([1]), |out| {
            self.inner.storage().with_slice(|a| {
                other
                    .inner
                    .storage()
                    .with_slice(|b| backend.matmul(a, b, dims, out));
            });
        });
        out.storage().read(0)
    }

    pub fn dot(&self, other: &Self) -> T {
        self.dot_with(&ReferenceBackend, other)
    }
}

impl<T: Float> Vector<T> {
    /// `len` evenly spaced values from `start` to `end` inclusive.
    ///
    /// Returns an error if `len < 2`.
    pub fn linspace(start: T, end: T, len: usize) -> Result<Self> {
        if len < 2 {
            return Err(CoreError::InvalidArgument {
                reason: "linspace requires at least two points",
            });
        }
        let step = (end - start) / T::from_usize(len - 1);
        Ok(Self::from_fn(len, |i| start + step * T::from_usize(i)))
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Scalar> From<Vector<T>> for ShapedArray<T> {
    fn from(v: Vector<T>) -> Self {
        v.inner
    }
}

impl<T: Scalar> TryFrom<ShapedArray<T>> for Vector<T> {
    type Error = CoreError;

    fn try_from(inner: ShapedArray<T>) -> Result<Self> {
        if inner.ndim() != 1 {
            return Err(CoreError::InvalidShape {
                shape: inner.dims().to_vec(),
                reason: "a vector must have exactly one dimension",
            });
        }
        Ok(Self { inner })
    }
}

impl<T: Scalar> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && elements_bit_eq(self.inner.storage(), other.inner.storage())
    }
}

impl<T: Scalar> Eq for Vector<T> {}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

macro_rules! impl_vector_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Scalar> $trait for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                Vector {
                    inner: self.inner.zip_with(&ReferenceBackend, $op, &rhs.inner),
                }
            }
        }

        impl<T: Scalar> $trait<T> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Vector<T> {
                Vector {
                    inner: self.inner.scalar_with(&ReferenceBackend, $op, rhs),
                }
            }
        }
    };
}

impl_vector_binop!(Add, add, BinaryOp::Add);
impl_vector_binop!(Sub, sub, BinaryOp::Sub);
impl_vector_binop!(Mul, mul, BinaryOp::Mul);
impl_vector_binop!(Div, div, BinaryOp::Div);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::random::{WyRand, Xoshiro128Plus};

    #[test]
    fn test_zeros_and_like() {
        let v = Vector::<f32>::zeros(3);
        assert_eq!(v.to_vec(), vec![0.0; 3]);
        let w = Vector::like(&Vector::from_vec(vec![1, 2, 3, 4]));
        assert_eq!(w.len(), 4);
        assert_eq!(w.to_vec(), vec![0; 4]);
    }

    #[test]
    fn test_arange_and_linspace() {
        assert_eq!(Vector::<i64>::arange(3).to_vec(), vec![0, 1, 2]);
        assert_eq!(Vector::<f32>::arange(2).to_vec(), vec![0.0, 1.0]);
        assert!(Vector::<u8>::arange(0).is_empty());

        let v = Vector::linspace(0.0_f64, 1.0, 5).unwrap();
        assert_eq!(v.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(Vector::linspace(0.0_f32, 1.0, 1).is_err());
    }

    #[test]
    fn test_get_set() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        v.set(2, 30).unwrap();
        assert_eq!(v.get(2).unwrap(), 30);
        assert!(v.get(3).is_err());
    }

    #[test]
    fn test_alias_sees_writes() {
        let v = Vector::from_vec(vec![1.0, 2.0]);
        let w = v.alias();
        w.set(0, -1.0).unwrap();
        assert_eq!(v.get(0).unwrap(), -1.0);
        assert!(v.shares_storage_with(&w));
    }

    #[test]
    fn test_equality_compares_length_first() {
        let a = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!(a, Vector::from_fn(3, |i| i as i32 + 1));
        assert_ne!(a, Vector::from_vec(vec![1, 2]));
        assert_ne!(a, Vector::from_vec(vec![1, 2, 4]));
    }

    #[test]
    fn test_uniform_is_reproducible() {
        let a = Vector::<f64>::uniform(&mut WyRand::new(11), 8);
        let b = Vector::<f64>::uniform(&mut WyRand::new(11), 8);
        assert_eq!(a, b);
        let c = Vector::<f32>::uniform(&mut Xoshiro128Plus::new(11), 8);
        assert!(c.to_vec().iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_arithmetic_and_dot() {
        let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
        assert_eq!((&a + &b).to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!((&a * 2.0).to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_dot_length_mismatch_panics() {
        let a = Vector::from_vec(vec![1, 2, 3]);
        let b = Vector::from_vec(vec![1, 2]);
        let _ = a.dot(&b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::from_vec(vec![1, 2, 3]).to_string(), "( 1  2  3 )");
    }

    #[test]
    fn test_shaped_conversions() {
        let v = Vector::from_vec(vec![1, 2]);
        let s: ShapedArray<i32> = v.into();
        assert_eq!(s.dims(), &[2]);
        assert!(Vector::try_from(s).is_ok());
        assert!(Vector::try_from(ShapedArray::<i32>::zeros([1, 2])).is_err());
    }
}
