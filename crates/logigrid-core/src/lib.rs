//! Core data structures for logic-grid puzzle tables.
//!
//! A logic-grid puzzle pairs every *entry* (a row, e.g. a person) with exactly
//! one *property* of each *category* (a column group, e.g. "score"). This crate
//! models the resolved table as a dense, row-major matrix and checks whether it
//! is consistent.
//!
//! # Overview
//!
//! The crate is organized around these concepts, leaves first:
//!
//! 1. **Strict indices** - [`index`]: [`Entry`], [`Category`] and [`Property`]
//!    are distinct index types over a shared backing integer, each with a
//!    `NULL` sentinel equal to the integer's maximum value.
//! 2. **Shape** - [`dimensions`]: [`Dimensions`] holds the entry and category
//!    counts and converts between flat offsets and [`Location`]s.
//! 3. **Scanning** - [`scan`]: batched equality and threshold scans used by
//!    the validator.
//! 4. **Tables** - [`table`]: [`Table`] and [`TableMut`] borrow a flat property
//!    buffer; [`TableDesc`] carries the human-readable labels.
//! 5. **Validation** - [`validate`]: [`validate()`] classifies a table as solved,
//!    unsolved, or contradictory.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{Dimensions, Property, Table, ValidationStatus, validate};
//!
//! let dim = Dimensions::new(4, 2).unwrap();
//! let cells: Vec<Property<u8>> = [0, 3, 1, 2, 2, 1, 3, 0]
//!     .into_iter()
//!     .map(Property::new)
//!     .collect();
//! let table = Table::new(dim, &cells).unwrap();
//!
//! assert_eq!(validate(&table), ValidationStatus::Ok);
//! ```

pub mod dimensions;
pub mod index;
pub mod scan;
pub mod table;
pub mod validate;

// Re-export commonly used types
pub use self::{
    dimensions::{Dimensions, DimensionsError, Location, Stride},
    index::{Category, Entry, Property, RawIndex, StrictIndex},
    table::{CategoryDesc, DescError, Table, TableDesc, TableError, TableMut},
    validate::{ValidationStatus, validate},
};
