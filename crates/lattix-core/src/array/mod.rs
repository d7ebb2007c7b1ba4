//! Shape-aware containers over shared storage.
//!
//! [`ShapedArray`] is the general N-dimensional container; [`Vector`] and
//! [`Matrix`] are its rank-1 and rank-2 specialisations. All of them pair a
//! [`Shape`] with a [`Storage`] whose length equals the shape's product.
//!
//! `Clone` performs a deep copy. Use [`ShapedArray::alias`] to obtain a
//! second container over the same buffer; writes through one are then
//! visible through the other.

mod create;
mod display;
mod matrix;
mod ops;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::shape::Shape;
use crate::storage::Storage;

/// An N-dimensional container with dynamic shape.
///
/// Elements are laid out row-major (see [`crate::shape`]).
#[derive(Debug)]
pub struct ShapedArray<T: Scalar> {
    shape: Shape,
    storage: Storage<T>,
}

impl<T: Scalar> ShapedArray<T> {
    /// Pair a shape with a buffer. The caller guarantees the lengths agree.
    pub(crate) fn from_parts(shape: Shape, storage: Storage<T>) -> Self {
        debug_assert_eq!(shape.numel(), storage.len());
        Self { shape, storage }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The dimension sizes as a slice.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// The total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// The underlying buffer handle.
    #[inline]
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// Copy the elements out in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Whether `self` and `other` read and write the same buffer.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// Read the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let flat = self.shape.flat_index(index)?;
        Ok(self.storage.read(flat))
    }

    /// Write the element at a multi-dimensional index.
    ///
    /// Takes `&self`: the buffer may be shared with aliases.
    pub fn set(&self, index: &[usize], value: T) -> Result<()> {
        let flat = self.shape.flat_index(index)?;
        self.storage.write(flat, value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shape changes
    // ------------------------------------------------------------------

    /// Reinterpret the buffer under a new shape with the same element count.
    pub fn reshape(self, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if checked_len(&shape)? != self.numel() {
            return Err(CoreError::InvalidShape {
                shape: shape.dims().to_vec(),
                reason: "new shape has different number of elements",
            });
        }
        Ok(Self {
            shape,
            storage: self.storage,
        })
    }

    /// Apply a function to every element, returning a new array.
    ///
    /// The elements are copied out first, so `f` may write through an
    /// alias of `self`; those writes do not affect the values `f` sees.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        let data = self.to_vec().into_iter().map(f).collect();
        Self::from_parts(self.shape.clone(), Storage::from_vec(data))
    }
}

impl<T: Scalar> Clone for ShapedArray<T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            storage: self.storage.deep_copy(),
        }
    }
}

impl<T: Scalar> PartialEq for ShapedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && elements_bit_eq(&self.storage, &other.storage)
    }
}

impl<T: Scalar> Eq for ShapedArray<T> {}

/// Element count of `shape`, rejecting products that overflow `usize`.
pub(crate) fn checked_len(shape: &Shape) -> Result<usize> {
    shape.checked_numel().ok_or_else(|| CoreError::InvalidShape {
        shape: shape.dims().to_vec(),
        reason: "shape product overflows usize",
    })
}

/// [`checked_len`] for constructors that fail fast.
pub(crate) fn len_or_panic(shape: &Shape) -> usize {
    checked_len(shape).unwrap_or_else(|e| panic!("{e}"))
}

/// Byte-wise comparison of two equally long buffers.
pub(crate) fn elements_bit_eq<T: Scalar>(a: &Storage<T>, b: &Storage<T>) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    a.with_slice(|a| {
        b.with_slice(|b| a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| x.bit_eq(y)))
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let t = ShapedArray::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(t.dims(), &[2, 3]);
        assert_eq!(t.shape().strides(), vec![3, 1]);
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.numel(), 6);
    }

    #[test]
    fn test_get_set() {
        let t = ShapedArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(t.get(&[0, 0]).unwrap(), 1);
        assert_eq!(t.get(&[1, 2]).unwrap(), 6);
        t.set(&[0, 1], 99).unwrap();
        assert_eq!(t.get(&[0, 1]).unwrap(), 99);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t = ShapedArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        assert!(t.get(&[2, 0]).is_err());
        assert!(t.get(&[0]).is_err());
        assert!(t.set(&[0, 0, 0], 1).is_err());
    }

    #[test]
    fn test_reshape_keeps_buffer() {
        let t = ShapedArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let alias = t.alias();
        let r = t.reshape([3, 2]).unwrap();
        assert_eq!(r.get(&[2, 1]).unwrap(), 6);
        assert!(r.shares_storage_with(&alias));
    }

    #[test]
    fn test_reshape_rejects_wrong_count() {
        let t = ShapedArray::<i32>::zeros([2, 3]);
        assert!(t.reshape([4, 2]).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let a = ShapedArray::from_vec([2], vec![1.0_f32, 2.0]).unwrap();
        let b = a.clone();
        b.set(&[0], 5.0).unwrap();
        assert_eq!(a.get(&[0]).unwrap(), 1.0);
        assert!(!a.shares_storage_with(&b));
    }

    #[test]
    fn test_map() {
        let t = ShapedArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let t2 = t.map(|x| x * 10);
        assert_eq!(t2.to_vec(), vec![10, 20, 30, 40]);
        assert_eq!(t2.dims(), &[2, 2]);
    }

    #[test]
    fn test_reshape_rejects_overflowing_shape() {
        let t = ShapedArray::<u8>::zeros([0]);
        assert_eq!(
            t.reshape([1 << 63, 2, 1]).unwrap_err(),
            CoreError::InvalidShape {
                shape: vec![1 << 63, 2, 1],
                reason: "shape product overflows usize",
            }
        );
    }

    #[test]
    fn test_map_closure_may_write_through_alias() {
        let a = ShapedArray::from_vec([2], vec![1, 2]).unwrap();
        let b = a.alias();
        let m = a.map(|x| {
            b.set(&[0], 9).unwrap();
            x * 10
        });
        assert_eq!(m.to_vec(), vec![10, 20]);
        assert_eq!(a.get(&[0]).unwrap(), 9);
    }

    #[test]
    fn test_equality() {
        let a = ShapedArray::from_vec([3], vec![1, 2, 3]).unwrap();
        let b = ShapedArray::from_vec([3], vec![1, 2, 3]).unwrap();
        let c = ShapedArray::from_vec([3], vec![1, 2, 4]).unwrap();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_requires_same_shape() {
        let a = ShapedArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = ShapedArray::from_vec([3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_is_bytewise() {
        let a = ShapedArray::from_vec([2], vec![f64::NAN, 0.0]).unwrap();
        let b = ShapedArray::from_vec([2], vec![f64::NAN, 0.0]).unwrap();
        let c = ShapedArray::from_vec([2], vec![f64::NAN, -0.0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
