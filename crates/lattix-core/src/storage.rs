//! Fixed-length element buffers shared between containers.
//!
//! A [`Storage`] is a handle. Cloning the handle (via [`Storage::share`])
//! aliases the same elements; [`Storage::deep_copy`] allocates a new
//! buffer. The length never changes after allocation.
//!
//! Handles are reference counted without atomics, so a buffer can never
//! cross a thread boundary. Within one thread, writes through any alias
//! are visible through all of them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Scalar;

/// A contiguous, fixed-length, mutable block of `T`.
#[derive(Debug)]
pub struct Storage<T: Scalar> {
    cells: Rc<RefCell<Vec<T>>>,
    len: usize,
}

impl<T: Scalar> Storage<T> {
    /// Allocate `len` zero-initialized elements.
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![T::zero(); len])
    }

    /// Take ownership of an existing flat sequence.
    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            cells: Rc::new(RefCell::new(data)),
            len,
        }
    }

    /// Copy a flat slice into a new buffer.
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the element at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn read(&self, offset: usize) -> T {
        self.cells.borrow()[offset]
    }

    /// Overwrite the element at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn write(&self, offset: usize, value: T) {
        self.cells.borrow_mut()[offset] = value;
    }

    /// Run `f` with a borrowed view of every element in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this buffer through any alias; the view
    /// stays borrowed while `f` runs.
    pub fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.cells.borrow())
    }

    /// Run `f` with a mutable view of every element in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `f` reads or writes this buffer through any alias.
    pub fn with_mut_slice<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.cells.borrow_mut())
    }

    /// Copy the elements out into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.borrow().clone()
    }

    /// A second handle to the same elements.
    pub fn share(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
            len: self.len,
        }
    }

    /// A new buffer holding a copy of the elements.
    pub fn deep_copy(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    /// Whether both handles refer to the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}
