//! Construction of [`ShapedArray`] from shapes, flat values, literals and
//! other arrays.

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::literal::{IntoLiteral, ShapedArrayElement};
use crate::shape::Shape;
use crate::storage::Storage;

use super::{ShapedArray, checked_len, len_or_panic};

impl<T: Scalar> ShapedArray<T> {
    /// Create an array of the given shape filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if the shape product overflows `usize`.
    ///
    /// ```
    /// # use lattix_core::array::ShapedArray;
    /// let t = ShapedArray::<f64>::zeros([2, 3]);
    /// assert_eq!(t.dims(), &[2, 3]);
    /// assert!(t.to_vec().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let storage = Storage::zeros(len_or_panic(&shape));
        Self::from_parts(shape, storage)
    }

    /// Create an array filled with a constant value.
    ///
    /// # Panics
    ///
    /// Panics if the shape product overflows `usize`.
    pub fn full(shape: impl Into<Shape>, value: T) -> Self {
        let shape = shape.into();
        let storage = Storage::from_vec(vec![value; len_or_panic(&shape)]);
        Self::from_parts(shape, storage)
    }

    /// Create an array from a shape and flat row-major values.
    ///
    /// Returns an error if the product of `shape` overflows or does not
    /// equal `data.len()`.
    pub fn from_vec(shape: impl Into<Shape>, data: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        if checked_len(&shape)? != data.len() {
            return Err(CoreError::InvalidShape {
                shape: shape.dims().to_vec(),
                reason: "shape product does not match data length",
            });
        }
        Ok(Self::from_parts(shape, Storage::from_vec(data)))
    }

    /// Create an array from a shape and a flat slice (copies the data).
    pub fn from_slice(shape: impl Into<Shape>, data: &[T]) -> Result<Self> {
        Self::from_vec(shape, data.to_vec())
    }

    /// Create an array from a nested literal.
    ///
    /// The shape is inferred from the first child at every level; ragged
    /// literals are rejected with [`CoreError::RaggedLiteral`].
    pub fn from_literal(literal: &ShapedArrayElement<T>) -> Result<Self> {
        let shape = literal.infer_shape();
        literal.validate(&shape)?;
        Self::from_vec(shape, literal.flatten())
    }

    /// Create an array from nested Rust arrays or `Vec`s.
    ///
    /// ```
    /// # use lattix_core::array::ShapedArray;
    /// let t = ShapedArray::<i32>::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(t.dims(), &[2, 3]);
    /// assert_eq!(t.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_nested(literal: impl IntoLiteral<T>) -> Result<Self> {
        Self::from_literal(&literal.into_literal())
    }

    /// A zero-filled array with the same shape as `other` and its own buffer.
    pub fn like(other: &Self) -> Self {
        Self::zeros(other.shape.clone())
    }

    /// A second array over the same buffer and shape as `self`.
    ///
    /// Writes through either array are visible through both.
    pub fn alias(&self) -> Self {
        Self::from_parts(self.shape.clone(), self.storage.share())
    }
}
