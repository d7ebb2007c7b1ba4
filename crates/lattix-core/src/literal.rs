//! Nested array literals, before they are flattened into a buffer.
//!
//! A [`ShapedArrayElement`] tree is turned into a container in two passes:
//! [`infer_shape`](ShapedArrayElement::infer_shape) follows the first child
//! at every level, and [`flatten`](ShapedArrayElement::flatten) emits the
//! leaves depth-first, left to right. Both passes agree on row-major order.
//!
//! Neither pass checks that siblings have equal length. Container
//! construction calls [`validate`](ShapedArrayElement::validate) between
//! the two, so a ragged tree is rejected instead of yielding a buffer whose
//! length disagrees with its shape.

use crate::Scalar;
use crate::error::{CoreError, Result};

/// A nested array literal: a scalar leaf or a list of sub-literals.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedArrayElement<T> {
    Element(T),
    Array(Vec<ShapedArrayElement<T>>),
}

impl<T: Scalar> ShapedArrayElement<T> {
    /// Shape implied by the first child at every nesting level.
    ///
    /// A bare leaf has the scalar shape `[]`; an empty list has shape `[0]`.
    pub fn infer_shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        let mut node = self;
        while let Self::Array(children) = node {
            shape.push(children.len());
            match children.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        shape
    }

    /// Leaf values in depth-first, left-to-right order.
    pub fn flatten(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<T>) {
        match self {
            Self::Element(v) => out.push(*v),
            Self::Array(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }

    /// Check that every subtree agrees with `shape`.
    pub fn validate(&self, shape: &[usize]) -> Result<()> {
        let mut path = Vec::with_capacity(shape.len());
        self.validate_at(shape, &mut path)
    }

    fn validate_at(&self, shape: &[usize], path: &mut Vec<usize>) -> Result<()> {
        match (self, shape.split_first()) {
            (Self::Element(_), None) => Ok(()),
            (Self::Element(_), Some((&len, _))) => {
                Err(ragged(path, format!("{len} elements"), "a leaf".into()))
            }
            (Self::Array(children), None) => Err(ragged(
                path,
                "a leaf".into(),
                format!("{} elements", children.len()),
            )),
            (Self::Array(children), Some((&len, rest))) => {
                if children.len() != len {
                    return Err(ragged(
                        path,
                        format!("{len} elements"),
                        format!("{} elements", children.len()),
                    ));
                }
                for (i, child) in children.iter().enumerate() {
                    path.push(i);
                    child.validate_at(rest, path)?;
                    path.pop();
                }
                Ok(())
            }
        }
    }
}

fn ragged(path: &[usize], expected: String, got: String) -> CoreError {
    log::debug!("rejecting ragged literal at {path:?}: expected {expected}, found {got}");
    CoreError::RaggedLiteral {
        path: path.to_vec(),
        expected,
        got,
    }
}

/// Conversion of nested Rust arrays and `Vec`s into a literal tree.
///
/// ```
/// use lattix_core::literal::{IntoLiteral, ShapedArrayElement};
///
/// let tree: ShapedArrayElement<i32> = [[1, 2, 3], [4, 5, 6]].into_literal();
/// assert_eq!(tree.infer_shape(), vec![2, 3]);
/// ```
pub trait IntoLiteral<T> {
    fn into_literal(self) -> ShapedArrayElement<T>;
}

impl<T> IntoLiteral<T> for ShapedArrayElement<T> {
    fn into_literal(self) -> ShapedArrayElement<T> {
        self
    }
}

impl<T, U: IntoLiteral<T>> IntoLiteral<T> for Vec<U> {
    fn into_literal(self) -> ShapedArrayElement<T> {
        ShapedArrayElement::Array(self.into_iter().map(IntoLiteral::into_literal).collect())
    }
}

impl<T, U: IntoLiteral<T>, const N: usize> IntoLiteral<T> for [U; N] {
    fn into_literal(self) -> ShapedArrayElement<T> {
        ShapedArrayElement::Array(self.into_iter().map(IntoLiteral::into_literal).collect())
    }
}

macro_rules! impl_into_literal_leaf {
    ($($ty:ty),*) => {
        $(
            impl IntoLiteral<$ty> for $ty {
                #[inline]
                fn into_literal(self) -> ShapedArrayElement<$ty> {
                    ShapedArrayElement::Element(self)
                }
            }
        )*
    };
}

impl_into_literal_leaf!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
