//! The compute seam between containers and a math backend.
//!
//! Containers validate shapes and precision, allocate the output buffer
//! and hand flat row-major slices to a [`Backend`]. A backend only has to
//! fill `out`; it never sees a [`Shape`](crate::shape::Shape) mismatch.
//!
//! [`ReferenceBackend`] is a plain scalar implementation. Vectorized
//! backends plug in through the same trait.

use crate::dtype::Precision;
use crate::{Float, Scalar};

/// An element-wise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    #[inline]
    pub fn apply<T: Scalar>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// An element-wise unary operation on floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Exp,
    Ln,
}

impl UnaryOp {
    #[inline]
    pub fn apply<T: Float>(self, x: T) -> T {
        match self {
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
        }
    }
}

/// Dimensions of a matrix product `(m x k) * (k x n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatmulDims {
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

/// A vectorized math backend.
///
/// Every slice is row-major and already sized by the caller:
/// `out.len()` equals the operation's output element count. Results must be
/// deterministic for fixed inputs and follow IEEE-754 rounding for the
/// element precision.
pub trait Backend {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this backend has kernels for `precision`.
    fn supports(&self, precision: Precision) -> bool;

    /// `out[i] = op(lhs[i], rhs[i])`.
    fn binary<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: &[T], out: &mut [T]);

    /// `out[i] = op(lhs[i], rhs)`.
    fn binary_scalar<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: T, out: &mut [T]);

    /// `out[i] = op(input[i])`.
    fn unary<T: Float>(&self, op: UnaryOp, input: &[T], out: &mut [T]);

    /// `out[i] = base[i] ^ exponent`.
    fn powf<T: Float>(&self, base: &[T], exponent: T, out: &mut [T]);

    /// `out = lhs * rhs` for an `m x k` and a `k x n` matrix.
    fn matmul<T: Scalar>(&self, lhs: &[T], rhs: &[T], dims: MatmulDims, out: &mut [T]);

    /// Constant padding: copy `input` of shape `dims` into `out`, whose
    /// shape is `dims[i] + before[i] + after[i]`, filling the border with
    /// `value`.
    fn pad<T: Scalar>(
        &self,
        input: &[T],
        dims: &[usize],
        before: &[usize],
        after: &[usize],
        value: T,
        out: &mut [T],
    );
}

/// Straightforward scalar loops for every precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

impl Backend for ReferenceBackend {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn supports(&self, _precision: Precision) -> bool {
        true
    }

    fn binary<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: &[T], out: &mut [T]) {
        for ((o, &a), &b) in out.iter_mut().zip(lhs).zip(rhs) {
            *o = op.apply(a, b);
        }
    }

    fn binary_scalar<T: Scalar>(&self, op: BinaryOp, lhs: &[T], rhs: T, out: &mut [T]) {
        for (o, &a) in out.iter_mut().zip(lhs) {
            *o = op.apply(a, rhs);
        }
    }

    fn unary<T: Float>(&self, op: UnaryOp, input: &[T], out: &mut [T]) {
        for (o, &x) in out.iter_mut().zip(input) {
            *o = op.apply(x);
        }
    }

    fn powf<T: Float>(&self, base: &[T], exponent: T, out: &mut [T]) {
        for (o, &x) in out.iter_mut().zip(base) {
            *o = x.powf(exponent);
        }
    }

    fn matmul<T: Scalar>(&self, lhs: &[T], rhs: &[T], dims: MatmulDims, out: &mut [T]) {
        let MatmulDims { m, k, n } = dims;
        // ijk loop order (row-major friendly for lhs and out)
        for i in 0..m {
            let row = &lhs[i * k..(i + 1) * k];
            for j in 0..n {
                let mut sum = T::zero();
                for (p, &a) in row.iter().enumerate() {
                    sum = sum + a * rhs[p * n + j];
                }
                out[i * n + j] = sum;
            }
        }
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
        out.fill(value);
        let padded: Vec<usize> = dims
            .iter()
            .zip(before)
            .zip(after)
            .map(|((&d, &b), &a)| d + b + a)
            .collect();
        let mut index = vec![0usize; dims.len()];
        for &x in input {
            let mut flat = 0;
            let mut stride = 1;
            for i in (0..dims.len()).rev() {
                flat += (index[i] + before[i]) * stride;
                stride *= padded[i];
            }
            out[flat] = x;

            // advance the odometer over `dims`
            for i in (0..dims.len()).rev() {
                index[i] += 1;
                if index[i] < dims[i] {
                    break;
                }
                index[i] = 0;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_ops() {
        let mut out = [0.0; 3];
        ReferenceBackend.binary(BinaryOp::Sub, &[5.0, 6.0, 7.0], &[1.0, 2.0, 3.0], &mut out);
        assert_eq!(out, [4.0, 4.0, 4.0]);
        ReferenceBackend.binary_scalar(BinaryOp::Div, &[2.0, 4.0, 8.0], 2.0, &mut out);
        assert_eq!(out, [1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_unary_and_pow() {
        let mut out = [0.0_f64; 2];
        ReferenceBackend.unary(UnaryOp::Exp, &[0.0, 1.0], &mut out);
        assert_eq!(out[0], 1.0);
        assert!((out[1] - std::f64::consts::E).abs() < 1e-15);
        ReferenceBackend.powf(&[2.0, 3.0], 2.0, &mut out);
        assert_eq!(out, [4.0, 9.0]);
    }

    #[test]
    fn test_matmul() {
        // [[1, 2, 3],    [[7,  8],     [[ 58,  64],
        //  [4, 5, 6]]  x  [9, 10],  =   [139, 154]]
        //                 [11, 12]]
        let mut out = [0; 4];
        ReferenceBackend.matmul(
            &[1, 2, 3, 4, 5, 6],
            &[7, 8, 9, 10, 11, 12],
            MatmulDims { m: 2, k: 3, n: 2 },
            &mut out,
        );
        assert_eq!(out, [58, 64, 139, 154]);
    }

    #[test]
    fn test_pad_2d() {
        let mut out = [0; 16];
        ReferenceBackend.pad(&[1, 2, 3, 4], &[2, 2], &[1, 1], &[1, 1], -1, &mut out);
        assert_eq!(
            out,
            [-1, -1, -1, -1, -1, 1, 2, -1, -1, 3, 4, -1, -1, -1, -1, -1]
        );
    }

    #[test]
    fn test_pad_asymmetric() {
        let mut out = [9; 5];
        ReferenceBackend.pad(&[1, 2], &[2], &[0], &[3], 0, &mut out);
        assert_eq!(out, [1, 2, 0, 0, 0]);
    }
}
