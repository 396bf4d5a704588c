//! Non-owning views over contiguous memory.
//!
//! [`ArrayView`] is a copyable, read-only reference to a run of `T` values owned
//! elsewhere; [`ArrayViewMut`] is its exclusive, writable counterpart. Both are
//! a raw `(address, count)` pair tied to the lifetime of the storage they were
//! built from, so the borrow checker rejects any view that would outlive it.
//!
//! Every accessor comes in two tiers:
//!
//! - **checked** (the default): returns `Option`/`Result` or panics like slice
//!   indexing does,
//! - **unchecked** (`unsafe`, `*_unchecked`): pure pointer arithmetic for hot
//!   loops where the caller has already proven the index or range valid.
//!
//! ```
//! use probe_core::view::{ArrayView, Extent};
//!
//! let samples = [1, 2, 3, 4, 5];
//! let view = ArrayView::from_array(&samples);
//!
//! let middle = view.subspan(2, Extent::Count(2)).unwrap();
//! assert_eq!(middle.as_slice(), &[3, 4]);
//! assert_eq!(view.last(1).unwrap().as_slice(), &[5]);
//! ```

mod exclusive;
mod shared;

pub use exclusive::ArrayViewMut;
pub use shared::ArrayView;

use thiserror_no_std::Error;

/// Count value reserved to mean "every remaining element".
///
/// Only kept for callers translating sentinel-based code; [`Extent::Remaining`]
/// is the preferred spelling. `Extent::from(DYNAMIC_EXTENT)` is `Remaining`.
pub const DYNAMIC_EXTENT: usize = usize::MAX;

/// Length of a subview requested with `subspan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Exactly this many elements.
    Count(usize),
    /// Everything from the offset to the end of the source view.
    Remaining,
}

impl From<usize> for Extent {
    fn from(count: usize) -> Self {
        if count == DYNAMIC_EXTENT {
            Self::Remaining
        } else {
            Self::Count(count)
        }
    }
}

impl From<Option<usize>> for Extent {
    fn from(count: Option<usize>) -> Self {
        count.map_or(Self::Remaining, Self::from)
    }
}

/// Errors reported by the checked access tier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("index {index} out of range for view of {len} elements")]
    OutOfRange { index: usize, len: usize },
    #[error("subview at offset {offset} with {count} elements out of range for view of {len} elements")]
    SubviewOutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },
}

/// Resolve `extent` against a view of `len` elements, returning the subview length.
///
/// Fails when `[offset, offset + count)` does not lie inside `[0, len)`.
fn subview_len(len: usize, offset: usize, extent: Extent) -> Result<usize, ViewError> {
    match extent {
        Extent::Remaining if offset <= len => Ok(len - offset),
        Extent::Remaining => Err(ViewError::SubviewOutOfRange {
            offset,
            count: 0,
            len,
        }),
        Extent::Count(count) => match offset.checked_add(count) {
            Some(end) if end <= len => Ok(count),
            _ => Err(ViewError::SubviewOutOfRange { offset, count, len }),
        },
    }
}
