//! Borrowed table views and label metadata.
//!
//! A table does not own its cells. [`Table`] and [`TableMut`] pair a
//! [`Dimensions`] with a caller-owned buffer of exactly
//! `dim.total_property_count()` properties, laid out row-major. The shared view
//! is what validation and rendering read; the mutable view is what a solving
//! process writes through.
//!
//! [`TableDesc`] holds the human-readable labels for a table and is only needed
//! for rendering.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{Dimensions, Entry, Property, TableMut};
//!
//! let dim = Dimensions::new(3, 2).unwrap();
//! let mut cells = vec![Property::<u8>::new(0); dim.total_property_count()];
//! let mut table = TableMut::new(dim, &mut cells).unwrap();
//!
//! table.clear();
//! table.entry_slice_mut(Entry::new(1))[0] = Property::new(2);
//!
//! let view = table.as_table();
//! assert_eq!(view.entry_slice(Entry::new(1)), [Property::new(2), Property::NULL]);
//! ```

use crate::{Dimensions, Entry, Location, Property, RawIndex, scan};

/// Errors that can occur when constructing a [`Table`] or [`TableMut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    /// The buffer length differs from the total property count.
    #[display("property buffer has {actual} cells, expected {expected}")]
    LengthMismatch {
        /// `dim.total_property_count()`.
        expected: usize,
        /// The buffer length.
        actual: usize,
    },
    /// An axis of the dimensions does not fit below the null sentinel.
    #[display("dimensions {dim} do not fit in u{bits} indices")]
    DimensionsTooLarge {
        /// The rejected dimensions.
        dim: Dimensions,
        /// Bit width of the backing integer.
        bits: u32,
    },
}

fn check_shape<R: RawIndex>(dim: Dimensions, len: usize) -> Result<(), TableError> {
    if !dim.fits::<R>() {
        return Err(TableError::DimensionsTooLarge { dim, bits: R::BITS });
    }
    let expected = dim.total_property_count();
    if len != expected {
        return Err(TableError::LengthMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

fn entry_range(dim: Dimensions, entry: usize) -> std::ops::Range<usize> {
    assert!(
        entry < dim.entries(),
        "entry {entry} out of range for {dim}"
    );
    let start = entry * dim.categories();
    start..start + dim.categories()
}

/// A read-only view of a table.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a, R: RawIndex = u8> {
    dim: Dimensions,
    properties: &'a [Property<R>],
}

impl<'a, R: RawIndex> Table<'a, R> {
    /// Creates a view over `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if the buffer length is not
    /// `dim.total_property_count()`, or [`TableError::DimensionsTooLarge`] if
    /// the dimensions cannot be indexed with `R`.
    pub fn new(dim: Dimensions, properties: &'a [Property<R>]) -> Result<Self, TableError> {
        check_shape::<R>(dim, properties.len())?;
        Ok(Self { dim, properties })
    }

    /// Returns the table's dimensions.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> Dimensions {
        self.dim
    }

    /// Returns the whole flat buffer.
    #[inline]
    #[must_use]
    pub fn property_slice(&self) -> &'a [Property<R>] {
        self.properties
    }

    /// Returns the `categories` properties of one entry.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is null or not below the entry count.
    #[inline]
    #[must_use]
    pub fn entry_slice(&self, entry: Entry<R>) -> &'a [Property<R>] {
        &self.properties[entry_range(self.dim, entry.index())]
    }

    /// Returns the property at `location`.
    ///
    /// # Panics
    ///
    /// Panics if `location` is outside the table.
    #[inline]
    #[must_use]
    pub fn get(&self, location: Location<R>) -> Property<R> {
        self.properties[self.dim.location_to_index(location)]
    }

    /// Returns the number of cells that are still [`Property::NULL`].
    #[must_use]
    pub fn null_count(&self) -> usize {
        scan::count_equal(self.properties, Property::NULL)
    }
}

/// A mutable view of a table.
#[derive(Debug)]
pub struct TableMut<'a, R: RawIndex = u8> {
    dim: Dimensions,
    properties: &'a mut [Property<R>],
}

impl<'a, R: RawIndex> TableMut<'a, R> {
    /// Creates a mutable view over `properties`.
    ///
    /// # Errors
    ///
    /// Same as [`Table::new`].
    pub fn new(dim: Dimensions, properties: &'a mut [Property<R>]) -> Result<Self, TableError> {
        check_shape::<R>(dim, properties.len())?;
        Ok(Self { dim, properties })
    }

    /// Returns the table's dimensions.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> Dimensions {
        self.dim
    }

    /// Reborrows as a read-only view.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Table<'_, R> {
        Table {
            dim: self.dim,
            properties: self.properties,
        }
    }

    /// Returns the whole flat buffer.
    #[inline]
    #[must_use]
    pub fn property_slice(&self) -> &[Property<R>] {
        self.properties
    }

    /// Returns the whole flat buffer for writing.
    #[inline]
    #[must_use]
    pub fn property_slice_mut(&mut self) -> &mut [Property<R>] {
        self.properties
    }

    /// Returns the `categories` properties of one entry.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is null or not below the entry count.
    #[inline]
    #[must_use]
    pub fn entry_slice(&self, entry: Entry<R>) -> &[Property<R>] {
        &self.properties[entry_range(self.dim, entry.index())]
    }

    /// Returns the property at `location`.
    ///
    /// # Panics
    ///
    /// Panics if `location` is outside the table.
    #[inline]
    #[must_use]
    pub fn get(&self, location: Location<R>) -> Property<R> {
        self.properties[self.dim.location_to_index(location)]
    }

    /// Returns the `categories` properties of one entry for writing.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is null or not below the entry count.
    #[inline]
    #[must_use]
    pub fn entry_slice_mut(&mut self, entry: Entry<R>) -> &mut [Property<R>] {
        &mut self.properties[entry_range(self.dim, entry.index())]
    }

    /// Resets every cell to [`Property::NULL`].
    pub fn clear(&mut self) {
        self.properties.fill(Property::NULL);
    }
}

impl<'a, R: RawIndex> From<TableMut<'a, R>> for Table<'a, R> {
    fn from(table: TableMut<'a, R>) -> Self {
        Self {
            dim: table.dim,
            properties: table.properties,
        }
    }
}

/// Errors reported by [`TableDesc::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DescError {
    /// The number of entry labels differs from the entry count.
    #[display("{actual} entry labels, expected {expected}")]
    EntryCount {
        /// The entry count.
        expected: usize,
        /// The number of entry labels.
        actual: usize,
    },
    /// The number of categories differs from the category count.
    #[display("{actual} categories described, expected {expected}")]
    CategoryCount {
        /// The category count.
        expected: usize,
        /// The number of described categories.
        actual: usize,
    },
    /// A category has a property label count different from the entry count.
    #[display("category {category} has {actual} property labels, expected {expected}")]
    PropertyCount {
        /// Index of the offending category.
        category: usize,
        /// The entry count.
        expected: usize,
        /// The number of property labels.
        actual: usize,
    },
}

/// Labels of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDesc {
    /// Column header.
    pub name: String,
    /// Label of each property value, indexed by the value.
    pub properties: Vec<String>,
}

/// Human-readable labels for a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDesc {
    /// Header of the entry label column.
    pub entry_kind: String,
    /// Label of each entry, in entry order.
    pub entries: Vec<String>,
    /// Labels of each category, in category order.
    pub categories: Vec<CategoryDesc>,
}

impl TableDesc {
    /// Checks that the labels match the shape of `dim`.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found: entry labels, then category count,
    /// then each category's property labels in order.
    pub fn check(&self, dim: Dimensions) -> Result<(), DescError> {
        if self.entries.len() != dim.entries() {
            return Err(DescError::EntryCount {
                expected: dim.entries(),
                actual: self.entries.len(),
            });
        }
        if self.categories.len() != dim.categories() {
            return Err(DescError::CategoryCount {
                expected: dim.categories(),
                actual: self.categories.len(),
            });
        }
        for (category, desc) in self.categories.iter().enumerate() {
            if desc.properties.len() != dim.entries() {
                return Err(DescError::PropertyCount {
                    category,
                    expected: dim.entries(),
                    actual: desc.properties.len(),
                });
            }
        }
        Ok(())
    }
}
