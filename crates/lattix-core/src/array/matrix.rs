//! [`Matrix`]: the rank-2 container, with row and column access,
//! transposition and backend-routed products.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use crate::Scalar;
use crate::backend::{Backend, BinaryOp, MatmulDims, ReferenceBackend};
use crate::error::{CoreError, Result};
use crate::literal::IntoLiteral;
use crate::random::Uniform;
use crate::shape::Shape;
use crate::storage::Storage;

use super::ops::dispatch;
use super::{ShapedArray, Vector, elements_bit_eq, len_or_panic};

/// A two-dimensional container with row-major storage.
#[derive(Debug, Clone)]
pub struct Matrix<T: Scalar> {
    inner: ShapedArray<T>,
}

impl<T: Scalar> Matrix<T> {
    /// A zero-filled `rows x columns` matrix.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            inner: ShapedArray::zeros([rows, columns]),
        }
    }

    /// A `rows x columns` matrix over row-major `data`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Result<Self> {
        ShapedArray::from_vec([rows, columns], data).map(|inner| Self { inner })
    }

    /// Build a matrix from a nested row literal.
    ///
    /// ```
    /// use lattix_core::array::Matrix;
    ///
    /// let m = Matrix::<i32>::from_rows([[1, 2], [3, 4], [5, 6]]).unwrap();
    /// assert_eq!((m.rows(), m.columns()), (3, 2));
    /// assert_eq!(m.get(2, 0).unwrap(), 5);
    /// ```
    pub fn from_rows(literal: impl IntoLiteral<T>) -> Result<Self> {
        Self::try_from(ShapedArray::from_nested(literal)?)
    }

    /// Build element `(r, c)` as `f(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let shape = Shape::from([rows, columns]);
        let mut data = Vec::with_capacity(len_or_panic(&shape));
        for r in 0..rows {
            for c in 0..columns {
                data.push(f(r, c));
            }
        }
        Self {
            inner: ShapedArray::from_parts(shape, Storage::from_vec(data)),
        }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }

    /// Draw a `rows x columns` matrix of uniform deviates in `[0, 1)`.
    pub fn uniform<R: Uniform<T> + ?Sized>(rng: &mut R, rows: usize, columns: usize) -> Self {
        Self::from_fn(rows, columns, |_, _| rng.next_uniform())
    }

    /// A zero-filled matrix of the same dimensions with its own buffer.
    pub fn like(other: &Self) -> Self {
        Self::zeros(other.rows(), other.columns())
    }

    /// A second matrix over the same buffer.
    pub fn alias(&self) -> Self {
        Self {
            inner: self.inner.alias(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.inner.dims()[0]
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.inner.dims()[1]
    }

    pub fn get(&self, row: usize, column: usize) -> Result<T> {
        self.inner.get(&[row, column])
    }

    pub fn set(&self, row: usize, column: usize, value: T) -> Result<()> {
        self.inner.set(&[row, column], value)
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

    /// Copy row `row` out as a vector.
    pub fn row(&self, row: usize) -> Result<Vector<T>> {
        if row >= self.rows() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![row],
                shape: self.inner.dims().to_vec(),
            });
        }
        let n = self.columns();
        let data = self
            .inner
            .storage()
            .with_slice(|d| d[row * n..(row + 1) * n].to_vec());
        Ok(Vector::from_vec(data))
    }

    /// Copy column `column` out as a vector.
    pub fn column(&self, column: usize) -> Result<Vector<T>> {
        if column >= self.columns() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![column],
                shape: self.inner.dims().to_vec(),
            });
        }
        let n = self.columns();
        let data = self
            .inner
            .storage()
            .with_slice(|d| d.iter().skip(column).step_by(n).copied().collect());
        Ok(Vector::from_vec(data))
    }

    /// A new `columns x rows` matrix.
    pub fn transpose(&self) -> Self {
        let (m, n) = (self.rows(), self.columns());
        self.inner
            .storage()
            .with_slice(|d| Self::from_fn(n, m, |r, c| d[c * n + r]))
    }

    /// `self * rhs`, computed by `backend`.
    ///
    /// # Panics
    ///
    /// Panics if `self.columns() != rhs.rows()` or `backend` does not
    /// support `T`.
    pub fn matmul_with<B: Backend>(&self, backend: &B, rhs: &Self) -> Self {
        assert!(
            self.columns() == rhs.rows(),
            "{}",
            CoreError::DimensionMismatch {
                expected: vec![self.columns(), rhs.columns()],
                got: rhs.inner.dims().to_vec(),
            }
        );
        let dims = MatmulDims {
            m: self.rows(),
            k: self.columns(),
            n: rhs.columns(),
        };
        let inner = dispatch(
            backend,
            format_args!("matmul {}x{}x{}", dims.m, dims.k, dims.n),
            Shape::from([dims.m, dims.n]),
            |out| {
                self.inner.storage().with_slice(|a| {
                    rhs.inner
                        .storage()
                        .with_slice(|b| backend.matmul(a, b, dims, out));
                });
            },
        );
        Self { inner }
    }

    pub fn matmul(&self, rhs: &Self) -> Self {
        self.matmul_with(&ReferenceBackend, rhs)
    }

    /// `self * v` for a vector of length `columns`.
    ///
    /// # Panics
    ///
    /// Panics if the vector length differs from `self.columns()`.
    pub fn matvec(&self, v: &Vector<T>) -> Vector<T> {
        let column = Self {
            inner: ShapedArray::from_parts(Shape::from([v.len(), 1]), v.as_shaped().storage().share()),
        };
        let product = self.matmul(&column);
        Vector::from_vec(product.to_vec())
    }
}

impl<T: Scalar> From<Matrix<T>> for ShapedArray<T> {
    fn from(m: Matrix<T>) -> Self {
        m.inner
    }
}

impl<T: Scalar> TryFrom<ShapedArray<T>> for Matrix<T> {
    type Error = CoreError;

    fn try_from(inner: ShapedArray<T>) -> Result<Self> {
        if inner.ndim() != 2 {
            return Err(CoreError::InvalidShape {
                shape: inner.dims().to_vec(),
                reason: "a matrix must have exactly two dimensions",
            });
        }
        Ok(Self { inner })
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.columns() == other.columns()
            && elements_bit_eq(self.inner.storage(), other.inner.storage())
    }
}

impl<T: Scalar> Eq for Matrix<T> {}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Scalar> $trait for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                Matrix {
                    inner: self.inner.zip_with(&ReferenceBackend, $op, &rhs.inner),
                }
            }
        }

        impl<T: Scalar> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                Matrix {
                    inner: self.inner.scalar_with(&ReferenceBackend, $op, rhs),
                }
            }
        }
    };
}

impl_matrix_binop!(Add, add, BinaryOp::Add);
impl_matrix_binop!(Sub, sub, BinaryOp::Sub);
impl_matrix_binop!(Mul, mul, BinaryOp::Mul);
impl_matrix_binop!(Div, div, BinaryOp::Div);
