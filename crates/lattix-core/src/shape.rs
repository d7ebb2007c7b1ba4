//! Dimension lists and flat-offset arithmetic.
//!
//! Layout is row-major: the last dimension has stride 1 and strides grow
//! towards the first dimension. For shape `[d1, .., dn]` and index
//! `[i1, .., in]` the offset is accumulated from the last dimension to the
//! first:
//!
//! ```text
//! flat = in + i(n-1)*dn + i(n-2)*dn*d(n-1) + ... + i1*(dn*...*d2)
//! ```
//!
//! Literal flattening and display chunking both rely on this order.

use core::fmt;

use crate::error::{CoreError, Result};

/// An ordered list of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// The zero-dimensional shape of a single scalar.
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Product of all dimensions (1 for a scalar shape).
    ///
    /// Assumes the product fits in `usize`; every container shape has been
    /// through [`checked_numel`](Self::checked_numel).
    #[inline]
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Product of all dimensions, or `None` if it overflows `usize`.
    ///
    /// A zero dimension makes the product zero regardless of the others.
    pub fn checked_numel(&self) -> Option<usize> {
        if self.dims.contains(&0) {
            return Some(0);
        }
        self.dims.iter().try_fold(1_usize, |acc, &d| acc.checked_mul(d))
    }

    /// Row-major strides in elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![0; self.dims.len()];
        let mut stride = 1;
        for i in (0..self.dims.len()).rev() {
            strides[i] = stride;
            stride *= self.dims[i];
        }
        strides
    }

    /// Map a multi-dimensional index to a flat offset.
    ///
    /// Fails if the index arity differs from [`ndim`](Self::ndim) or any
    /// component is out of range.
    pub fn flat_index(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.dims.len() || index.iter().zip(&self.dims).any(|(&i, &d)| i >= d) {
            return Err(CoreError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.dims.clone(),
            });
        }
        Ok(flat_index_unchecked(index, &self.dims))
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    pub fn unravel(&self, flat: usize) -> Result<Vec<usize>> {
        if flat >= self.numel() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![flat],
                shape: self.dims.clone(),
            });
        }
        let mut index = vec![0; self.dims.len()];
        let mut rest = flat;
        for i in (0..self.dims.len()).rev() {
            index[i] = rest % self.dims[i];
            rest /= self.dims[i];
        }
        Ok(index)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.dims)
    }
}

/// Offset of `index` in a row-major buffer of shape `dims`, without bounds
/// checks.
pub fn flat_index_unchecked(index: &[usize], dims: &[usize]) -> usize {
    let mut flat = 0;
    let mut stride = 1;
    for i in (0..dims.len()).rev() {
        flat += index[i] * stride;
        stride *= dims[i];
    }
    flat
}
