//! Foreign byte-range descriptors
//!
//! A [`ListRef`] is how callers on the other side of the C ABI hand us a
//! buffer: a pointer and a length. The buffer stays owned by the caller; the
//! adapter reads it during the call and never frees, mutates or retains it.

use std::{ptr, slice};

/// Borrowed `(pointer, length)` view of caller-owned bytes
///
/// A zero `len` is the "absent" marker. In that case `data` may be null or
/// dangling and is never read.
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct ListRef {
    data: *const u8,
    len: usize,
}

impl ListRef {
    pub const fn empty() -> Self {
        ListRef { data: ptr::null(), len: 0 }
    }

    /// # Safety
    ///
    /// When `len > 0`, `data` must point to `len` readable bytes that stay
    /// valid and unmodified for as long as the returned value is used.
    pub const unsafe fn from_raw_parts(data: *const u8, len: usize) -> Self {
        ListRef { data, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrows the referenced bytes.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `data` must point to `len` readable bytes that outlive
    /// `'a` and are not mutated during `'a`. Nothing else is validated.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        // The length is checked before the pointer: a zero-length reference
        // may carry a null pointer.
        if self.len == 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.data, self.len) }
    }

    /// Copies the referenced bytes into an owned buffer.
    ///
    /// # Safety
    ///
    /// Same contract as [`ListRef::as_slice`].
    pub unsafe fn to_vec(&self) -> Vec<u8> {
        unsafe { self.as_slice() }.to_vec()
    }
}

impl Default for ListRef {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&[u8]> for ListRef {
    fn from(v: &[u8]) -> Self {
        ListRef { data: v.as_ptr(), len: v.len() }
    }
}

impl From<&Vec<u8>> for ListRef {
    fn from(v: &Vec<u8>) -> Self {
        Self::from(v.as_slice())
    }
}
