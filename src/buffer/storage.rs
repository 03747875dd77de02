//! Shared backing storage for buffer views.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A fixed-size byte region shared by every view derived from one buffer.
///
/// Cloning the handle is O(1) and never copies bytes: `slice`, `duplicate`
/// and `as_read_only` all hand out clones of the same handle, so a write
/// through one view is visible through every other.
///
/// # Implementation
///
/// Uses `Rc<RefCell<Box<[u8]>>>` rather than raw pointers. The handle is
/// neither `Send` nor `Sync`; buffers are single-threaded values and callers
/// that need concurrency must hand disjoint copies to each thread.
#[derive(Clone)]
pub struct SharedStorage {
    inner: Rc<RefCell<Box<[u8]>>>,
}

impl SharedStorage {
    /// Allocate a zero-filled region of `len` bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self::from(vec![0u8; len])
    }

    /// Returns the length of the region in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns true if the region is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both handles refer to the same region.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this region.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Run `f` with shared access to the bytes.
    pub fn with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let bytes = self.inner.borrow();
        f(&bytes[..])
    }

    /// Run `f` with exclusive access to the bytes.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside another `with`/`with_mut`
    /// closure on the same region.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut bytes = self.inner.borrow_mut();
        f(&mut bytes[..])
    }

    /// Copy the whole region into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.borrow().to_vec()
    }
}

impl From<Vec<u8>> for SharedStorage {
    fn from(vec: Vec<u8>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(vec.into_boxed_slice())),
        }
    }
}

impl From<&[u8]> for SharedStorage {
    fn from(slice: &[u8]) -> Self {
        Self::from(slice.to_vec())
    }
}

impl fmt::Debug for SharedStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStorage")
            .field("len", &self.len())
            .field("handles", &self.handle_count())
            .finish()
    }
}
