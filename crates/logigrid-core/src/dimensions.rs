//! Table shape and row-major index arithmetic.
//!
//! A table with `entries` rows and `categories` columns stores its properties
//! in a flat buffer, row by row. The flat offset `i` is at
//! `(entry = i / categories, category = i % categories)`.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{Dimensions, Stride};
//!
//! let dim = Dimensions::from_stride(Stride::Entries(5), 15).unwrap();
//! assert_eq!(dim.categories(), 3);
//!
//! let loc = dim.index_to_location::<u8>(7);
//! assert_eq!((loc.entry.index(), loc.category.index()), (2, 1));
//! assert_eq!(dim.location_to_index(loc), 7);
//! ```

use std::fmt;

use crate::{Category, Entry, RawIndex};

/// Errors that can occur when constructing [`Dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DimensionsError {
    /// Fewer than two entries.
    #[display("too few entries: {entries} (at least 2 required)")]
    TooFewEntries {
        /// The rejected entry count.
        entries: usize,
    },
    /// Fewer than two categories.
    #[display("too few categories: {categories} (at least 2 required)")]
    TooFewCategories {
        /// The rejected category count.
        categories: usize,
    },
    /// The known stride is larger than the total property count.
    #[display("too few properties: {total} (stride is {stride})")]
    TooFewProperties {
        /// The known stride.
        stride: usize,
        /// The total property count.
        total: usize,
    },
    /// `entries * categories` does not fit in `usize`.
    #[display("too many properties: {entries}x{categories} overflows usize")]
    TooManyProperties {
        /// The requested entry count.
        entries: usize,
        /// The requested category count.
        categories: usize,
    },
    /// The total property count is not a multiple of the known stride.
    #[display("{total} properties are not a multiple of stride {stride}")]
    InexactStride {
        /// The known stride.
        stride: usize,
        /// The total property count.
        total: usize,
    },
}

/// One known axis of a table, used to derive the other from a total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    /// The table has this many entries.
    Entries(usize),
    /// The table has this many categories.
    Categories(usize),
}

/// A cell address: an entry (row) and a category (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location<R: RawIndex> {
    /// The row.
    pub entry: Entry<R>,
    /// The column.
    pub category: Category<R>,
}

impl<R: RawIndex> fmt::Display for Location<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(entry {}, category {})", self.entry, self.category)
    }
}

/// The shape of a table: entry count by category count.
///
/// Both counts are at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    entries: usize,
    categories: usize,
}

impl Dimensions {
    /// Creates dimensions from both counts.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionsError::TooFewEntries`] or
    /// [`DimensionsError::TooFewCategories`] if a count is below 2, and
    /// [`DimensionsError::TooManyProperties`] if `entries * categories`
    /// overflows `usize`.
    pub fn new(entries: usize, categories: usize) -> Result<Self, DimensionsError> {
        if entries < 2 {
            return Err(DimensionsError::TooFewEntries { entries });
        }
        if categories < 2 {
            return Err(DimensionsError::TooFewCategories { categories });
        }
        if entries.checked_mul(categories).is_none() {
            return Err(DimensionsError::TooManyProperties {
                entries,
                categories,
            });
        }
        Ok(Self {
            entries,
            categories,
        })
    }

    /// Creates dimensions from one known axis and the total property count.
    ///
    /// The other axis is `total / stride`.
    ///
    /// # Errors
    ///
    /// - The stride's "too few" error if the stride is below 2.
    /// - [`DimensionsError::TooFewProperties`] if the stride exceeds `total`.
    /// - [`DimensionsError::InexactStride`] if `total` is not a multiple of the stride.
    /// - The other axis' "too few" error if the derived count is below 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use logigrid_core::{Dimensions, DimensionsError, Stride};
    ///
    /// let a = Dimensions::from_stride(Stride::Entries(4), 12).unwrap();
    /// let b = Dimensions::from_stride(Stride::Categories(3), 12).unwrap();
    /// assert_eq!(a, b);
    ///
    /// assert_eq!(
    ///     Dimensions::from_stride(Stride::Entries(5), 12),
    ///     Err(DimensionsError::InexactStride { stride: 5, total: 12 }),
    /// );
    /// ```
    pub fn from_stride(stride: Stride, total: usize) -> Result<Self, DimensionsError> {
        let known = match stride {
            Stride::Entries(entries) if entries < 2 => {
                return Err(DimensionsError::TooFewEntries { entries });
            }
            Stride::Categories(categories) if categories < 2 => {
                return Err(DimensionsError::TooFewCategories { categories });
            }
            Stride::Entries(n) | Stride::Categories(n) => n,
        };
        if known > total {
            return Err(DimensionsError::TooFewProperties {
                stride: known,
                total,
            });
        }
        if total % known != 0 {
            return Err(DimensionsError::InexactStride {
                stride: known,
                total,
            });
        }
        let other = total / known;
        match stride {
            Stride::Entries(entries) => Self::new(entries, other),
            Stride::Categories(categories) => Self::new(other, categories),
        }
    }

    /// Returns the number of entries (rows).
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Returns the number of categories (columns).
    #[inline]
    #[must_use]
    pub const fn categories(&self) -> usize {
        self.categories
    }

    /// Returns `entries * categories`, the length of a table's flat buffer.
    #[inline]
    #[must_use]
    pub const fn total_property_count(&self) -> usize {
        self.entries * self.categories
    }

    /// Returns `true` if the largest entry index and the largest category
    /// index both fit below the null sentinel of `R`.
    #[must_use]
    pub fn fits<R: RawIndex>(&self) -> bool {
        Entry::<R>::from_usize(self.entries - 1).is_some()
            && Category::<R>::from_usize(self.categories - 1).is_some()
    }

    /// Converts a flat offset into a location.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.total_property_count()` or the location does
    /// not fit in `R`.
    #[must_use]
    pub fn index_to_location<R: RawIndex>(&self, index: usize) -> Location<R> {
        assert!(
            index < self.total_property_count(),
            "offset {index} out of range for {self}"
        );
        Location {
            entry: Entry::from_index(index / self.categories),
            category: Category::from_index(index % self.categories),
        }
    }

    /// Converts a location into a flat offset.
    ///
    /// # Panics
    ///
    /// Panics if the location is null or outside these dimensions.
    #[must_use]
    pub fn location_to_index<R: RawIndex>(&self, location: Location<R>) -> usize {
        let entry = location.entry.index();
        let category = location.category.index();
        assert!(
            entry < self.entries && category < self.categories,
            "location {location} out of range for {self}"
        );
        entry * self.categories + category
    }

    /// Returns an iterator over every entry in order.
    ///
    /// # Panics
    ///
    /// The iterator panics if an entry does not fit in `R`.
    pub fn entry_indices<R: RawIndex>(&self) -> impl ExactSizeIterator<Item = Entry<R>> + use<R> {
        (0..self.entries).map(Entry::from_index)
    }

    /// Returns an iterator over every category in order.
    ///
    /// # Panics
    ///
    /// The iterator panics if a category does not fit in `R`.
    pub fn category_indices<R: RawIndex>(
        &self,
    ) -> impl ExactSizeIterator<Item = Category<R>> + use<R> {
        (0..self.categories).map(Category::from_index)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.entries, self.categories)
    }
}
