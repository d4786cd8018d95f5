//! Batched scans over index sequences.
//!
//! These are the primitives the validator is built on. Each scan processes the
//! input in batches of `N` lanes: the lanes of a batch are compared without
//! branching into a `u64` hit mask, and the first hit is read back with
//! `trailing_zeros`. The remainder that does not fill a whole batch is scanned
//! one element at a time.
//!
//! Batching is only a performance strategy. For every batch width the result is
//! the same as a plain left-to-right scan, and "first" always means lowest
//! index.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::scan;
//!
//! let a = [0_u8, 1, 2, 3];
//! let b = [3_u8, 2, 2, 0];
//! assert_eq!(scan::find_first_equal_position(&a, &b), Some(2));
//! assert_eq!(scan::find_first_at_least(&a, 1, 2), Some(2));
//! assert_eq!(scan::count_equal(&b, 2), 2);
//! ```

use crate::{
    RawIndex, StrictIndex,
    index::IndexKind,
};

/// Batch width used by the unparameterized scans.
pub const BATCH_WIDTH: usize = 16;

/// An element that can be scanned through its backing integer.
pub trait ScanElement: Copy {
    /// The backing integer compared by the scans.
    type Raw: RawIndex;

    /// Reinterprets the element as its backing integer.
    fn to_raw(self) -> Self::Raw;
}

macro_rules! impl_scan_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScanElement for $ty {
                type Raw = $ty;

                #[inline]
                fn to_raw(self) -> Self::Raw {
                    self
                }
            }
        )*
    };
}

impl_scan_element!(u8, u16, u32, u64);

impl<K, R> ScanElement for StrictIndex<K, R>
where
    K: IndexKind,
    R: RawIndex,
{
    type Raw = R;

    #[inline]
    fn to_raw(self) -> Self::Raw {
        self.raw()
    }
}

/// Returns the smallest `i` with `a[i] == b[i]`, over the common prefix of
/// `a` and `b`.
#[inline]
#[must_use]
pub fn find_first_equal_position<T: ScanElement>(a: &[T], b: &[T]) -> Option<usize> {
    find_first_equal_position_batched::<T, BATCH_WIDTH>(a, b)
}

/// Returns the smallest `i >= start` with `haystack[i] >= needle`.
///
/// Returns `None` if there is no such position, including when `start` is
/// past the end of `haystack`.
#[inline]
#[must_use]
pub fn find_first_at_least<T: ScanElement>(haystack: &[T], start: usize, needle: T) -> Option<usize> {
    find_first_at_least_batched::<T, BATCH_WIDTH>(haystack, start, needle)
}

/// Returns the number of elements of `haystack` equal to `needle`.
#[inline]
#[must_use]
pub fn count_equal<T: ScanElement>(haystack: &[T], needle: T) -> usize {
    count_equal_batched::<T, BATCH_WIDTH>(haystack, needle)
}

/// [`find_first_equal_position`] with an explicit batch width.
///
/// `N` must be in `1..=64`.
#[must_use]
pub fn find_first_equal_position_batched<T: ScanElement, const N: usize>(
    a: &[T],
    b: &[T],
) -> Option<usize> {
    const { assert!(N >= 1 && N <= 64) };

    let len = a.len().min(b.len());
    let mut a_chunks = a[..len].chunks_exact(N);
    let mut b_chunks = b[..len].chunks_exact(N);
    for (base, (ca, cb)) in (0..)
        .step_by(N)
        .zip(a_chunks.by_ref().zip(b_chunks.by_ref()))
    {
        let mask = lane_mask(ca.iter().zip(cb).map(|(x, y)| x.to_raw() == y.to_raw()));
        if mask != 0 {
            return Some(base + mask.trailing_zeros() as usize);
        }
    }

    let base = len - a_chunks.remainder().len();
    a_chunks
        .remainder()
        .iter()
        .zip(b_chunks.remainder())
        .position(|(x, y)| x.to_raw() == y.to_raw())
        .map(|i| base + i)
}

/// [`find_first_at_least`] with an explicit batch width.
///
/// `N` must be in `1..=64`.
#[must_use]
pub fn find_first_at_least_batched<T: ScanElement, const N: usize>(
    haystack: &[T],
    start: usize,
    needle: T,
) -> Option<usize> {
    const { assert!(N >= 1 && N <= 64) };

    let needle = needle.to_raw();
    let tail = haystack.get(start..)?;
    let mut chunks = tail.chunks_exact(N);
    for (base, chunk) in (start..).step_by(N).zip(chunks.by_ref()) {
        let mask = lane_mask(chunk.iter().map(|x| x.to_raw() >= needle));
        if mask != 0 {
            return Some(base + mask.trailing_zeros() as usize);
        }
    }

    let base = haystack.len() - chunks.remainder().len();
    chunks
        .remainder()
        .iter()
        .position(|x| x.to_raw() >= needle)
        .map(|i| base + i)
}

/// [`count_equal`] with an explicit batch width.
///
/// `N` must be in `1..=64`.
#[must_use]
pub fn count_equal_batched<T: ScanElement, const N: usize>(haystack: &[T], needle: T) -> usize {
    const { assert!(N >= 1 && N <= 64) };

    let needle = needle.to_raw();
    let mut chunks = haystack.chunks_exact(N);
    let batched: usize = chunks
        .by_ref()
        .map(|chunk| lane_mask(chunk.iter().map(|x| x.to_raw() == needle)).count_ones() as usize)
        .sum();
    batched
        + chunks
            .remainder()
            .iter()
            .filter(|x| x.to_raw() == needle)
            .count()
}

/// Packs up to 64 lane results into a bit mask, lane `i` at bit `i`.
#[inline]
fn lane_mask(lanes: impl Iterator<Item = bool>) -> u64 {
    lanes
        .enumerate()
        .fold(0, |mask, (i, hit)| mask | (u64::from(hit) << i))
}
