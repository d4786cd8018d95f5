//! Strict index types for entries, categories and properties.
//!
//! Every cell of a logic-grid table is addressed by an [`Entry`] and a
//! [`Category`], and holds a [`Property`]. All three are [`StrictIndex`] values
//! over the same kind of backing integer, but they are distinct types and never
//! convert into one another implicitly.
//!
//! # Null sentinel
//!
//! The maximum value of the backing integer is reserved as `NULL`, meaning
//! "not yet determined". Valid indices are therefore in `0..R::NULL`. Because
//! `NULL` compares greater than every valid index, a single threshold scan can
//! detect both unset and out-of-range cells (see [`scan`](crate::scan)).
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{Entry, Property};
//!
//! let entry = Entry::<u8>::new(3);
//! assert_eq!(entry.index(), 3);
//!
//! let unset = Property::<u8>::NULL;
//! assert!(unset.is_null());
//! assert_eq!(unset.raw(), u8::MAX);
//! assert_eq!(unset.checked_index(), None);
//! ```

use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

mod private {
    pub trait Sealed {}
}

/// An unsigned integer usable as the backing storage of a [`StrictIndex`].
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. The trait is sealed.
pub trait RawIndex: Copy + Eq + Ord + Hash + Debug + Display + private::Sealed {
    /// Bit width of the integer.
    const BITS: u32;

    /// The reserved null sentinel: the maximum representable value.
    const NULL: Self;

    /// Converts a `usize`, returning `None` if it does not fit.
    fn from_usize(value: usize) -> Option<Self>;

    /// Widens the integer to `usize`.
    fn to_usize(self) -> usize;
}

macro_rules! impl_raw_index {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl RawIndex for $ty {
                const BITS: u32 = <$ty>::BITS;
                const NULL: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(value: usize) -> Option<Self> {
                    Self::try_from(value).ok()
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_raw_index!(u8, u16, u32, u64);

/// Marker trait naming the kind of a [`StrictIndex`].
pub trait IndexKind {
    /// Human-readable kind name used in `Debug` output.
    const NAME: &'static str;
}

/// Kind marker for [`Entry`].
#[derive(Debug)]
pub enum EntryKind {}

/// Kind marker for [`Category`].
#[derive(Debug)]
pub enum CategoryKind {}

/// Kind marker for [`Property`].
#[derive(Debug)]
pub enum PropertyKind {}

impl IndexKind for EntryKind {
    const NAME: &'static str = "Entry";
}

impl IndexKind for CategoryKind {
    const NAME: &'static str = "Category";
}

impl IndexKind for PropertyKind {
    const NAME: &'static str = "Property";
}

/// A row of the table.
pub type Entry<R = u8> = StrictIndex<EntryKind, R>;

/// A column group of the table.
pub type Category<R = u8> = StrictIndex<CategoryKind, R>;

/// A cell value: which entry of the category occupies the cell.
pub type Property<R = u8> = StrictIndex<PropertyKind, R>;

/// An index of kind `K` backed by the unsigned integer `R`.
///
/// The value `R::NULL` is reserved and represents an unset index.
pub struct StrictIndex<K, R> {
    raw: R,
    _kind: PhantomData<fn() -> K>,
}

impl<K, R> StrictIndex<K, R>
where
    K: IndexKind,
    R: RawIndex,
{
    /// The unset index.
    pub const NULL: Self = Self::new(R::NULL);

    /// Wraps a raw integer without any range check.
    ///
    /// Passing `R::NULL` produces [`Self::NULL`].
    #[inline]
    #[must_use]
    pub const fn new(raw: R) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Converts a `usize` index, returning `None` if it is not a valid
    /// (non-null) index for the backing integer.
    #[inline]
    #[must_use]
    pub fn from_usize(index: usize) -> Option<Self> {
        R::from_usize(index)
            .filter(|raw| *raw != R::NULL)
            .map(Self::new)
    }

    /// Converts a `usize` index.
    ///
    /// # Panics
    ///
    /// Panics if `index` cannot be represented as a non-null value of `R`.
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match Self::from_usize(index) {
            Some(this) => this,
            None => panic!(
                "{} index {index} does not fit below the null sentinel of u{}",
                K::NAME,
                R::BITS
            ),
        }
    }

    /// Returns the raw backing integer.
    #[inline]
    #[must_use]
    pub fn raw(self) -> R {
        self.raw
    }

    /// Returns `true` if this is the null sentinel.
    #[inline]
    #[must_use]
    pub fn is_null(self) -> bool {
        self.raw == R::NULL
    }

    /// Returns the index as `usize`, or `None` if null.
    #[inline]
    #[must_use]
    pub fn checked_index(self) -> Option<usize> {
        (!self.is_null()).then(|| self.raw.to_usize())
    }

    /// Returns the index as `usize`.
    ///
    /// # Panics
    ///
    /// Panics if the index is null.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        assert!(!self.is_null(), "null {} has no index", K::NAME);
        self.raw.to_usize()
    }
}

impl<K, R: Copy> Clone for StrictIndex<K, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, R: Copy> Copy for StrictIndex<K, R> {}

impl<K, R: PartialEq> PartialEq for StrictIndex<K, R> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K, R: Eq> Eq for StrictIndex<K, R> {}

impl<K, R: PartialOrd> PartialOrd for StrictIndex<K, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.raw.partial_cmp(&other.raw)
    }
}

impl<K, R: Ord> Ord for StrictIndex<K, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K, R: Hash> Hash for StrictIndex<K, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K, R> Default for StrictIndex<K, R>
where
    K: IndexKind,
    R: RawIndex,
{
    /// Defaults to [`Self::NULL`].
    fn default() -> Self {
        Self::NULL
    }
}

impl<K, R> Debug for StrictIndex<K, R>
where
    K: IndexKind,
    R: RawIndex,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "{}(null)", K::NAME)
        } else {
            write!(f, "{}({})", K::NAME, self.raw)
        }
    }
}

impl<K, R> Display for StrictIndex<K, R>
where
    K: IndexKind,
    R: RawIndex,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.pad("null")
        } else {
            Display::fmt(&self.raw, f)
        }
    }
}
