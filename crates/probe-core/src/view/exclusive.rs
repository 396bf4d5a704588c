use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut, Range};
use core::ptr;
use core::slice;

use super::{ArrayView, Extent, ViewError, subview_len};

/// Exclusive, writable view of `len` contiguous `T` values starting at `ptr`.
///
/// Unlike [`ArrayView`] this is not `Copy`: two live mutable views of the same
/// memory would alias. Use [`reborrow`](Self::reborrow) for a shorter-lived
/// copy and [`as_view`](Self::as_view) for a read-only one. There is no way
/// back from a read-only view to a mutable one.
pub struct ArrayViewMut<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Create an empty view with a null address.
    pub const fn new() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Create a view from a raw address and element count, stored verbatim.
    ///
    /// # Safety
    ///
    /// Any `ptr` and `len` may be stored. Every element access through the
    /// view or its subviews requires that `ptr` is non-null, aligned and valid
    /// for reads and writes of `len` consecutive `T` values for all of `'a`,
    /// with nothing else accessing that memory. A zero `len` never touches
    /// memory.
    pub const unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    pub fn from_array<const N: usize>(array: &'a mut [T; N]) -> Self {
        Self {
            ptr: array.as_mut_ptr(),
            len: N,
            _marker: PhantomData,
        }
    }

    pub fn from_slice(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Shorter-lived mutable view of the same elements.
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        // Safety: `self` is mutably borrowed for as long as the result lives.
        unsafe { ArrayViewMut::from_raw_parts(self.ptr, self.len) }
    }

    /// Read-only view of the same elements, borrowing `self`.
    pub fn as_view(&self) -> ArrayView<'_, T> {
        // Safety: `self` is borrowed shared for as long as the result lives.
        unsafe { ArrayView::from_raw_parts(self.ptr, self.len) }
    }

    /// Give up write access for the full lifetime `'a`.
    pub fn into_view(self) -> ArrayView<'a, T> {
        // Safety: `self` is consumed, so no writer is left.
        unsafe { ArrayView::from_raw_parts(self.ptr, self.len) }
    }

    pub const fn data(&self) -> *const T {
        self.ptr
    }

    pub fn data_mut(&mut self) -> *mut T {
        self.ptr
    }

    pub const fn size(&self) -> usize {
        self.len
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn size_bytes(&self) -> usize {
        self.len * size_of::<T>()
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        self.as_view().as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.reborrow().into_slice()
    }

    /// Turn the view into the slice it covers, keeping the full lifetime.
    pub fn into_slice(self) -> &'a mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        // Safety: non-empty views uphold the `from_raw_parts` contract.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn at(&self, index: usize) -> Result<&T, ViewError> {
        let len = self.len;
        self.get(index).ok_or(ViewError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ViewError> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(ViewError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// # Safety
    ///
    /// `index` must be less than [`size`](Self::size).
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        unsafe { &*self.ptr.add(index) }
    }

    /// # Safety
    ///
    /// `index` must be less than [`size`](Self::size).
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        unsafe { &mut *self.ptr.add(index) }
    }

    /// # Safety
    ///
    /// The view must not be empty.
    pub unsafe fn front_unchecked(&self) -> &T {
        unsafe { self.get_unchecked(0) }
    }

    /// # Safety
    ///
    /// The view must not be empty.
    pub unsafe fn back_unchecked(&self) -> &T {
        unsafe { self.get_unchecked(self.len - 1) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn begin(&mut self) -> *mut T {
        self.ptr
    }

    pub fn end(&mut self) -> *mut T {
        self.ptr.wrapping_add(self.len)
    }

    /// Read-only address of the first element.
    pub fn cbegin(&self) -> *const T {
        self.ptr
    }

    /// Read-only address one past the last element.
    pub fn cend(&self) -> *const T {
        self.ptr.wrapping_add(self.len)
    }

    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.cbegin()..self.cend()
    }

    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        self.begin()..self.end()
    }

    /// Read-only view of the first `count` elements.
    pub fn first(&self, count: usize) -> Result<ArrayView<'_, T>, ViewError> {
        self.as_view().first(count)
    }

    /// Read-only view of the last `count` elements.
    pub fn last(&self, count: usize) -> Result<ArrayView<'_, T>, ViewError> {
        self.as_view().last(count)
    }

    /// Read-only view starting `offset` elements in.
    pub fn subspan(&self, offset: usize, extent: Extent) -> Result<ArrayView<'_, T>, ViewError> {
        self.as_view().subspan(offset, extent)
    }

    /// Mutable view of the first `count` elements. Call on
    /// [`reborrow`](Self::reborrow) to keep using the parent afterwards.
    pub fn first_mut(self, count: usize) -> Result<Self, ViewError> {
        let count = subview_len(self.len, 0, Extent::Count(count))?;
        // Safety: `count <= self.len` was just checked.
        Ok(unsafe { self.first_unchecked_mut(count) })
    }

    pub fn last_mut(self, count: usize) -> Result<Self, ViewError> {
        let count = subview_len(self.len, 0, Extent::Count(count))?;
        // Safety: `count <= self.len` was just checked.
        Ok(unsafe { self.last_unchecked_mut(count) })
    }

    pub fn subspan_mut(self, offset: usize, extent: Extent) -> Result<Self, ViewError> {
        let count = subview_len(self.len, offset, extent)?;
        // Safety: `offset + count <= self.len` was just checked.
        Ok(unsafe { self.subspan_unchecked_mut(offset, Extent::Count(count)) })
    }

    /// # Safety
    ///
    /// `count` must not exceed [`size`](Self::size).
    pub unsafe fn first_unchecked_mut(self, count: usize) -> Self {
        unsafe { Self::from_raw_parts(self.ptr, count) }
    }

    /// # Safety
    ///
    /// `count` must not exceed [`size`](Self::size).
    pub unsafe fn last_unchecked_mut(self, count: usize) -> Self {
        unsafe { Self::from_raw_parts(self.ptr.add(self.len - count), count) }
    }

    /// # Safety
    ///
    /// `offset` must not exceed [`size`](Self::size), and with
    /// [`Extent::Count`] `offset + count` must not either.
    pub unsafe fn subspan_unchecked_mut(self, offset: usize, extent: Extent) -> Self {
        let count = match extent {
            Extent::Count(count) => count,
            Extent::Remaining => self.len - offset,
        };
        unsafe { Self::from_raw_parts(self.ptr.add(offset), count) }
    }
}

impl<T> Default for ArrayViewMut<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for ArrayViewMut<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for ArrayViewMut<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for ArrayViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<'b, T> IntoIterator for &'b ArrayViewMut<'_, T> {
    type Item = &'b T;
    type IntoIter = slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, T> IntoIterator for &'b mut ArrayViewMut<'_, T> {
    type Item = &'b mut T;
    type IntoIter = slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ArrayViewMut<'a, T> {
    fn from(array: &'a mut [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T> From<&'a mut [T]> for ArrayViewMut<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for ArrayView<'a, T> {
    fn from(view: ArrayViewMut<'a, T>) -> Self {
        view.into_view()
    }
}

// Safety: an `ArrayViewMut<'a, T>` grants exactly the access of a `&'a mut [T]`.
unsafe impl<T: Send> Send for ArrayViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for ArrayViewMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_null_and_empty() {
        let mut view = ArrayViewMut::<u32>::default();
        assert!(view.is_empty());
        assert!(view.data().is_null());
        assert!(view.front_mut().is_none());
        assert_eq!(view.iter_mut().count(), 0);
        assert!(view.as_mut_slice().is_empty());
    }

    #[test]
    fn test_writes_reach_backing_array() {
        let mut array = [1, 2, 3, 4, 5];
        let base = array.as_ptr();
        {
            let mut view = ArrayViewMut::from_array(&mut array);
            assert_eq!(view.data(), base);
            assert_eq!(view.size_bytes(), 5 * size_of::<i32>());

            view[0] = 10;
            *view.back_mut().unwrap() = 50;
            *view.at_mut(2).unwrap() += 100;
            assert_eq!(
                view.at_mut(5).unwrap_err(),
                ViewError::OutOfRange { index: 5, len: 5 }
            );
            for value in view.iter_mut() {
                *value += 1;
            }
            // Safety: index 1 is in range.
            unsafe { *view.get_unchecked_mut(1) = 0 };
        }
        assert_eq!(array, [11, 0, 104, 5, 51]);
    }

    #[test]
    fn test_mutable_subviews() {
        let mut array = [1, 2, 3, 4, 5];
        let mut view = ArrayViewMut::from_array(&mut array);

        let mut middle = view.reborrow().subspan_mut(2, Extent::Count(2)).unwrap();
        assert_eq!(middle.as_slice(), &[3, 4]);
        middle[1] = 40;

        for value in view.reborrow().last_mut(1).unwrap() {
            *value = 0;
        }
        view.reborrow().first_mut(1).unwrap()[0] = 9;

        assert!(view.reborrow().first_mut(6).is_err());
        assert!(view.reborrow().subspan_mut(6, Extent::Remaining).is_err());
        assert_eq!(view.as_slice(), &[9, 2, 3, 40, 0]);
    }

    #[test]
    fn test_read_only_subviews_share_address() {
        let mut array = [1, 2, 3, 4, 5];
        let base = array.as_ptr();
        let view = ArrayViewMut::from_array(&mut array);

        let tail = view.last(2).unwrap();
        assert_eq!(tail.data(), base.wrapping_add(3));
        assert_eq!(view.first(2).unwrap().data(), base);
        assert_eq!(
            view.subspan(1, Extent::Remaining).unwrap().as_slice(),
            &[2, 3, 4, 5]
        );
    }

    #[test]
    fn test_read_only_conversion() {
        let mut array = [1u8, 2, 3];
        let view = ArrayViewMut::from_array(&mut array);
        let ptr = view.data();

        let read_only: ArrayView<'_, u8> = view.into();
        assert_eq!(read_only.data(), ptr);
        assert_eq!(read_only.size(), 3);

        let copy = read_only;
        assert_eq!(copy.as_slice(), read_only.as_slice());
    }

    #[test]
    fn test_pointer_ranges() {
        let mut array = [0u8; 4];
        let expected = array.as_ptr_range();
        let mut view = ArrayViewMut::from_array(&mut array);

        assert_eq!(view.as_ptr_range(), expected);
        assert_eq!(view.cbegin(), expected.start);
        assert_eq!(view.cend(), expected.end);
        let range = view.as_mut_ptr_range();
        assert_eq!(range.start as *const u8, expected.start);
        assert_eq!(range.end as *const u8, expected.end);
    }

    #[test]
    fn test_unchecked_access() {
        let mut array = [1, 2, 3];
        let view = ArrayViewMut::from_array(&mut array);

        // Safety: the view holds three elements.
        unsafe {
            assert_eq!(*view.front_unchecked(), 1);
            assert_eq!(*view.back_unchecked(), 3);
            let mut rest = view.subspan_unchecked_mut(1, Extent::Remaining);
            assert_eq!(rest.size(), 2);
            *rest.front_mut().unwrap() = 20;
        }
        assert_eq!(array, [1, 20, 3]);
    }
}
