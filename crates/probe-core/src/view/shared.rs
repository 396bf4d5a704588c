use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, Range};
use core::ptr;
use core::slice;

use super::{Extent, ViewError, subview_len};

/// Copyable, read-only view of `len` contiguous `T` values starting at `ptr`.
///
/// The view never owns, copies or frees the elements. Copying it duplicates
/// the `(address, count)` pair only.
pub struct ArrayView<'a, T> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<'a, T> ArrayView<'a, T> {
    /// Create an empty view with a null address.
    pub const fn new() -> Self {
        Self {
            ptr: ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Create a view from a raw address and element count, stored verbatim.
    ///
    /// # Safety
    ///
    /// Any `ptr` and `len` may be stored, including a null `ptr` with a
    /// non-zero `len`. Every element access through the view, its copies or
    /// its subviews, checked or not, requires that `ptr` is non-null, aligned
    /// and valid for reads of `len` consecutive `T` values for all of `'a`,
    /// with that memory left unmutated. A zero `len` never touches memory.
    pub const unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// View a whole fixed-size array. The count is `N`.
    pub const fn from_array<const N: usize>(array: &'a [T; N]) -> Self {
        Self {
            ptr: array.as_ptr(),
            len: N,
            _marker: PhantomData,
        }
    }

    /// View a whole slice.
    pub const fn from_slice(slice: &'a [T]) -> Self {
        Self {
            ptr: slice.as_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Raw starting address. Null for a default-constructed view.
    pub const fn data(&self) -> *const T {
        self.ptr
    }

    /// Number of elements.
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Alias of [`size`](Self::size).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of bytes covered by the view.
    pub const fn size_bytes(&self) -> usize {
        self.len * size_of::<T>()
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the viewed elements as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        if self.len == 0 {
            return &[];
        }
        // Safety: non-empty views uphold the `from_raw_parts` contract.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Element at `index`, or [`ViewError::OutOfRange`].
    pub fn at(&self, index: usize) -> Result<&'a T, ViewError> {
        self.get(index).ok_or(ViewError::OutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn front(&self) -> Option<&'a T> {
        self.as_slice().first()
    }

    pub fn back(&self) -> Option<&'a T> {
        self.as_slice().last()
    }

    /// Element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`size`](Self::size).
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        unsafe { &*self.ptr.add(index) }
    }

    /// # Safety
    ///
    /// The view must not be empty.
    pub unsafe fn front_unchecked(&self) -> &'a T {
        unsafe { self.get_unchecked(0) }
    }

    /// # Safety
    ///
    /// The view must not be empty.
    pub unsafe fn back_unchecked(&self) -> &'a T {
        unsafe { self.get_unchecked(self.len - 1) }
    }

    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Address of the first element.
    pub fn begin(&self) -> *const T {
        self.ptr
    }

    /// Address one past the last element.
    pub fn end(&self) -> *const T {
        self.ptr.wrapping_add(self.len)
    }

    /// Same as [`begin`](Self::begin); a shared view is already read-only.
    pub fn cbegin(&self) -> *const T {
        self.begin()
    }

    /// Same as [`end`](Self::end).
    pub fn cend(&self) -> *const T {
        self.end()
    }

    /// `begin()..end()`.
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.begin()..self.end()
    }

    /// View of the first `count` elements, starting at the same address.
    pub fn first(&self, count: usize) -> Result<Self, ViewError> {
        let count = subview_len(self.len, 0, Extent::Count(count))?;
        // Safety: `count <= self.len` was just checked.
        Ok(unsafe { self.first_unchecked(count) })
    }

    /// View of the last `count` elements.
    pub fn last(&self, count: usize) -> Result<Self, ViewError> {
        let count = subview_len(self.len, 0, Extent::Count(count))?;
        // Safety: `count <= self.len` was just checked.
        Ok(unsafe { self.last_unchecked(count) })
    }

    /// View starting `offset` elements in, spanning `extent` elements.
    pub fn subspan(&self, offset: usize, extent: Extent) -> Result<Self, ViewError> {
        let count = subview_len(self.len, offset, extent)?;
        // Safety: `offset + count <= self.len` was just checked.
        Ok(unsafe { self.subspan_unchecked(offset, Extent::Count(count)) })
    }

    /// # Safety
    ///
    /// `count` must not exceed [`size`](Self::size).
    pub unsafe fn first_unchecked(&self, count: usize) -> Self {
        unsafe { Self::from_raw_parts(self.ptr, count) }
    }

    /// # Safety
    ///
    /// `count` must not exceed [`size`](Self::size).
    pub unsafe fn last_unchecked(&self, count: usize) -> Self {
        unsafe { Self::from_raw_parts(self.ptr.add(self.len - count), count) }
    }

    /// # Safety
    ///
    /// `offset` must not exceed [`size`](Self::size), and with
    /// [`Extent::Count`] `offset + count` must not either.
    pub unsafe fn subspan_unchecked(&self, offset: usize, extent: Extent) -> Self {
        let count = match extent {
            Extent::Count(count) => count,
            Extent::Remaining => self.len - offset,
        };
        unsafe { Self::from_raw_parts(self.ptr.add(offset), count) }
    }
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<T> Default for ArrayView<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for ArrayView<'_, T> {
    type Output = T;

    /// Panics when `index` is out of range, like slice indexing.
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T> IntoIterator for ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ArrayView<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ArrayView<'a, T> {
    fn from(array: &'a mut [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T> From<&'a [T]> for ArrayView<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

// Safety: an `ArrayView<'a, T>` grants exactly the access of a `&'a [T]`.
unsafe impl<T: Sync> Send for ArrayView<'_, T> {}
unsafe impl<T: Sync> Sync for ArrayView<'_, T> {}
