//! `lattix-core`: shape-aware numeric containers and deterministic PRNGs.
//!
//! Provides [`ShapedArray`] (N-dimensional), [`Vector`] and [`Matrix`] over
//! shared row-major storage, nested-literal construction, bracketed text
//! rendering, a pluggable compute [`Backend`](backend::Backend) and four
//! small-state pseudo-random generators.
//!
//! # Design
//!
//! - Generic over element types via the [`Scalar`] / [`Float`] traits.
//! - Storage is a single-threaded shared handle: containers may alias one
//!   buffer, and `Clone` always deep-copies.
//! - Constructors and accessors return [`Result`]; operators panic on shape
//!   mismatch with the [`CoreError`] message.
//! - Unseeded generators take an injected [`EntropySource`](random::EntropySource);
//!   there is no global random state.
//!
//! ```
//! use lattix_core::prelude::*;
//!
//! let m = Matrix::<i32>::from_rows([[1, 2], [3, 4]]).unwrap();
//! assert_eq!(m.to_string(), "⎛ 1  2 ⎞\n⎝ 3  4 ⎠");
//!
//! let mut rng = WyRand::new(42);
//! let v = Vector::<f64>::uniform(&mut rng, 3);
//! assert_eq!(v.len(), 3);
//! ```

pub mod array;
pub mod backend;
pub mod dtype;
pub mod error;
pub mod literal;
pub mod random;
pub mod shape;
pub mod storage;

// Re-export key types at crate root for convenience.
pub use array::{Matrix, ShapedArray, Vector};
pub use dtype::{Float, Precision, Scalar};
pub use error::{CoreError, Result};
pub use literal::{IntoLiteral, ShapedArrayElement};
pub use shape::Shape;
pub use storage::Storage;

/// Items intended for glob-import: `use lattix_core::prelude::*;`
pub mod prelude {
    pub use crate::array::{Matrix, ShapedArray, Vector};
    pub use crate::backend::{Backend, ReferenceBackend};
    pub use crate::dtype::{Float, Precision, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::literal::{IntoLiteral, ShapedArrayElement};
    pub use crate::random::{
        EntropySource, Prng, Uniform, WyRand, Xoroshiro128Plus, Xoroshiro128PlusPlus,
        Xoshiro128Plus,
    };
    pub use crate::shape::Shape;

    #[cfg(feature = "os-entropy")]
    pub use crate::random::OsEntropy;
}
