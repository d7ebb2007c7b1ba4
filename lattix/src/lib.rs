//! # Lattix
//!
//! Typed, shape-aware numeric containers and deterministic pseudo-random
//! generators.
//!
//! One `use lattix::prelude::*;` gives you vectors, matrices, N-dimensional
//! arrays and the generator suite.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Containers, display, backend seam, generators |
//! | `os-entropy` *(default)* | `OsEntropy` for seeding from the platform |

pub use lattix_core as core;

/// Glob-import convenience: `use lattix::prelude::*;`
pub mod prelude {
    pub use lattix_core::prelude::*;
}
