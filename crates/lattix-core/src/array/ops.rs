//! Arithmetic on [`ShapedArray`], dispatched to a [`Backend`].
//!
//! Implements `Add`, `Sub`, `Mul`, `Div` for:
//! - `ShapedArray<T> op ShapedArray<T>` (element-wise, same shape)
//! - `ShapedArray<T> op T` (scalar applied to every element)
//!
//! Operators use [`ReferenceBackend`] and panic on shape mismatch. The
//! `*_with` methods take an explicit backend and panic as well, including
//! when the backend does not support the element precision. The
//! `*_checked` methods return the mismatch as an error instead.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use crate::backend::{Backend, BinaryOp, ReferenceBackend, UnaryOp};
use crate::error::{CoreError, Result};
use crate::shape::Shape;
use crate::storage::Storage;
use crate::{Float, Scalar};

use super::{ShapedArray, checked_len};

/// Allocate an output of `shape` and let the backend fill it.
pub(super) fn dispatch<T, B>(
    backend: &B,
    what: fmt::Arguments<'_>,
    shape: Shape,
    fill: impl FnOnce(&mut [T]),
) -> ShapedArray<T>
where
    T: Scalar,
    B: Backend,
{
    assert!(
        backend.supports(T::PRECISION),
        "{}",
        CoreError::UnsupportedPrecision {
            precision: T::PRECISION,
            backend: backend.name(),
        }
    );
    log::trace!("{} backend: {what} into shape {shape}", backend.name());
    let out = Storage::zeros(shape.numel());
    out.with_mut_slice(fill);
    ShapedArray::from_parts(shape, out)
}

pub(super) fn assert_same_shape(expected: &Shape, got: &Shape) {
    assert!(
        expected == got,
        "{}",
        CoreError::DimensionMismatch {
            expected: expected.dims().to_vec(),
            got: got.dims().to_vec(),
        }
    );
}

impl<T: Scalar> ShapedArray<T> {
    /// Element-wise `op` against a same-shaped array.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ or `backend` does not support `T`.
    pub fn zip_with<B: Backend>(&self, backend: &B, op: BinaryOp, other: &Self) -> Self {
        assert_same_shape(&self.shape, &other.shape);
        dispatch(backend, format_args!("{op:?}"), self.shape.clone(), |out| {
            self.storage.with_slice(|a| {
                other
                    .storage
                    .with_slice(|b| backend.binary(op, a, b, out));
            });
        })
    }

    /// `op` applied between every element and `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `backend` does not support `T`.
    pub fn scalar_with<B: Backend>(&self, backend: &B, op: BinaryOp, rhs: T) -> Self {
        dispatch(backend, format_args!("{op:?} scalar"), self.shape.clone(), |out| {
            self.storage
                .with_slice(|a| backend.binary_scalar(op, a, rhs, out));
        })
    }

    /// Constant padding with `before[i]` and `after[i]` extra slots along
    /// dimension `i`.
    pub fn pad_with<B: Backend>(
        &self,
        backend: &B,
        before: &[usize],
        after: &[usize],
        value: T,
    ) -> Result<Self> {
        if before.len() != self.ndim() || after.len() != self.ndim() {
            return Err(CoreError::InvalidArgument {
                reason: "padding widths must have one entry per dimension",
            });
        }
        let dims: Option<Vec<usize>> = self
            .dims()
            .iter()
            .zip(before)
            .zip(after)
            .map(|((&d, &b), &a)| d.checked_add(b)?.checked_add(a))
            .collect();
        let shape = Shape::new(dims.ok_or(CoreError::InvalidArgument {
            reason: "padded dimension overflows usize",
        })?);
        checked_len(&shape)?;
        Ok(dispatch(backend, format_args!("pad"), shape, |out| {
            self.storage
                .with_slice(|input| backend.pad(input, self.dims(), before, after, value, out));
        }))
    }

    /// [`pad_with`](Self::pad_with) on the reference backend.
    pub fn pad(&self, before: &[usize], after: &[usize], value: T) -> Result<Self> {
        self.pad_with(&ReferenceBackend, before, after, value)
    }

    fn zip_checked(&self, op: BinaryOp, other: &Self) -> Result<Self> {
        if self.shape != other.shape {
            return Err(CoreError::DimensionMismatch {
                expected: self.dims().to_vec(),
                got: other.dims().to_vec(),
            });
        }
        Ok(self.zip_with(&ReferenceBackend, op, other))
    }

    /// Element-wise addition, returning `Err` on shape mismatch.
    pub fn add_checked(&self, other: &Self) -> Result<Self> {
        self.zip_checked(BinaryOp::Add, other)
    }

    /// Element-wise subtraction, returning `Err` on shape mismatch.
    pub fn sub_checked(&self, other: &Self) -> Result<Self> {
        self.zip_checked(BinaryOp::Sub, other)
    }

    /// Element-wise multiplication, returning `Err` on shape mismatch.
    pub fn mul_checked(&self, other: &Self) -> Result<Self> {
        self.zip_checked(BinaryOp::Mul, other)
    }

    /// Element-wise division, returning `Err` on shape mismatch.
    pub fn div_checked(&self, other: &Self) -> Result<Self> {
        self.zip_checked(BinaryOp::Div, other)
    }
}

impl<T: Float> ShapedArray<T> {
    pub fn unary_with<B: Backend>(&self, backend: &B, op: UnaryOp) -> Self {
        dispatch(backend, format_args!("{op:?}"), self.shape.clone(), |out| {
            self.storage.with_slice(|a| backend.unary(op, a, out));
        })
    }

    pub fn powf_with<B: Backend>(&self, backend: &B, exponent: T) -> Self {
        dispatch(backend, format_args!("powf"), self.shape.clone(), |out| {
            self.storage.with_slice(|a| backend.powf(a, exponent, out));
        })
    }

    /// Element-wise `e^x`.
    pub fn exp(&self) -> Self {
        self.unary_with(&ReferenceBackend, UnaryOp::Exp)
    }

    /// Element-wise natural logarithm.
    pub fn ln(&self) -> Self {
        self.unary_with(&ReferenceBackend, UnaryOp::Ln)
    }

    /// Element-wise `x^exponent`.
    pub fn powf(&self, exponent: T) -> Self {
        self.powf_with(&ReferenceBackend, exponent)
    }
}

// ======================================================================
// Operators
// ======================================================================

macro_rules! impl_array_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Scalar> $trait for &ShapedArray<T> {
            type Output = ShapedArray<T>;

            fn $method(self, rhs: &ShapedArray<T>) -> ShapedArray<T> {
                self.zip_with(&ReferenceBackend, $op, rhs)
            }
        }

        impl<T: Scalar> $trait for ShapedArray<T> {
            type Output = ShapedArray<T>;

            fn $method(self, rhs: ShapedArray<T>) -> ShapedArray<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<T> for &ShapedArray<T> {
            type Output = ShapedArray<T>;

            fn $method(self, rhs: T) -> ShapedArray<T> {
                self.scalar_with(&ReferenceBackend, $op, rhs)
            }
        }

        impl<T: Scalar> $trait<T> for ShapedArray<T> {
            type Output = ShapedArray<T>;

            fn $method(self, rhs: T) -> ShapedArray<T> {
                (&self).$method(rhs)
            }
        }
    };
}

impl_array_binop!(Add, add, BinaryOp::Add);
impl_array_binop!(Sub, sub, BinaryOp::Sub);
impl_array_binop!(Mul, mul, BinaryOp::Mul);
impl_array_binop!(Div, div, BinaryOp::Div);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::backend::MatmulDims;
    use crate::dtype::Precision;

    /// Accepts single precision only.
    struct SingleOnly;

    impl Backend for SingleOnly {
        fn name(&self) -> &'static str {
            "single-only"
        }
        fn supports(&self, precision: Precision) -> bool {
            precision == Precision::Single
        }
        fn binary<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: &[T], out: &mut [T]) {
            ReferenceBackend.binary(op, lhs, rhs, out);
        }
        fn binary_scalar<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: T, out: &mut [T]) {
            ReferenceBackend.binary_scalar(op, lhs, rhs, out);
        }
        fn unary<T: Float>(&self, op: UnaryOp, input: &[T], out: &mut [T]) {
            ReferenceBackend.unary(op, input, out);
        }
        fn powf<T: Float>(&self, base: &[T], exponent: T, out: &mut [T]) {
            ReferenceBackend.powf(base, exponent, out);
        }
        fn matmul<T: Scalar>(&self, lhs: &[T], rhs: &[T], dims: MatmulDims, out: &mut [T]) {
            ReferenceBackend.matmul(lhs, rhs, dims, out);
        }
        fn pad<T: Scalar>(
            &self,
            input: &[T],
            dims: &[usize],
            before: &[usize],
            after: &[usize],
            value: T,
            out: &mut [T],
        ) {
            ReferenceBackend.pad(input, dims, before, after, value, out);
        }
    }

    fn arr(dims: &[usize], data: Vec<f64>) -> ShapedArray<f64> {
        ShapedArray::from_vec(dims, data).unwrap()
    }

    #[test]
    fn test_add_arrays() {
        let a = arr(&[3], vec![1.0, 2.0, 3.0]);
        let b = arr(&[3], vec![10.0, 20.0, 30.0]);
        assert_eq!((a + b).to_vec(), vec![11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_sub_by_reference() {
        let a = arr(&[2], vec![10.0, 20.0]);
        let b = arr(&[2], vec![1.0, 2.0]);
        let c = &a - &b;
        assert_eq!(c.to_vec(), vec![9.0, 18.0]);
        assert_eq!(a.to_vec(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_result_is_fresh_buffer() {
        let a = arr(&[2], vec![1.0, 2.0]);
        let c = &a * 1.0;
        assert!(!c.shares_storage_with(&a));
        assert_eq!(c, a);
    }

    #[test]
    fn test_aliased_operands() {
        let a = ShapedArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let b = a.alias();
        assert_eq!((&a * &b).to_vec(), vec![1, 4, 9, 16]);
    }

    #[test]
    fn test_scalar_ops() {
        let a = arr(&[3], vec![10.0, 20.0, 30.0]);
        assert_eq!((&a / 10.0).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!((a - 5.0).to_vec(), vec![5.0, 15.0, 25.0]);
    }

    #[test]
    fn test_integer_ops() {
        let a = ShapedArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let b = ShapedArray::full([2, 2], 2);
        assert_eq!((&a * &b).to_vec(), vec![2, 4, 6, 8]);
        assert_eq!((a + 1).to_vec(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_exp_ln_pow() {
        let a = arr(&[2], vec![1.0, 4.0]);
        let round_trip = a.exp().ln();
        for (x, y) in round_trip.to_vec().iter().zip(a.to_vec()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(a.powf(0.5).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_checked_mismatch() {
        let a = arr(&[2], vec![1.0, 2.0]);
        let b = arr(&[3], vec![1.0, 2.0, 3.0]);
        assert_eq!(
            a.add_checked(&b).unwrap_err(),
            CoreError::DimensionMismatch {
                expected: vec![2],
                got: vec![3],
            }
        );
        assert!(a.div_checked(&b).is_err());
        assert_eq!(a.mul_checked(&a).unwrap().to_vec(), vec![1.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_add_panics_on_mismatch() {
        let a = arr(&[2, 1], vec![1.0, 2.0]);
        let b = arr(&[1, 2], vec![1.0, 2.0]);
        let _ = a + b;
    }

    #[test]
    fn test_backend_accepts_supported_precision() {
        let a = ShapedArray::from_vec([2], vec![1.0_f32, 2.0]).unwrap();
        let c = a.zip_with(&SingleOnly, BinaryOp::Add, &a);
        assert_eq!(c.to_vec(), vec![2.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "does not support Double precision")]
    fn test_backend_rejects_unsupported_precision() {
        let a = arr(&[2], vec![1.0, 2.0]);
        let _ = a.unary_with(&SingleOnly, UnaryOp::Exp);
    }

    #[test]
    fn test_pad() {
        let a = ShapedArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let p = a.pad(&[0, 1], &[1, 0], 0).unwrap();
        assert_eq!(p.dims(), &[3, 3]);
        assert_eq!(p.to_vec(), vec![0, 1, 2, 0, 3, 4, 0, 0, 0]);
        assert!(a.pad(&[1], &[1], 0).is_err());
    }

    #[test]
    fn test_pad_rejects_overflowing_widths() {
        let a = ShapedArray::from_vec([1, 2], vec![1, 2]).unwrap();
        assert!(matches!(
            a.pad(&[usize::MAX, 0], &[0, 0], 0),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            a.pad(&[1 << 63, 0], &[0, 0], 0),
            Err(CoreError::InvalidShape { .. })
        ));
    }
}
