//! Classification of a table's state.
//!
//! [`validate()`] decides whether a table is solved, still has unset cells, or
//! contains a contradiction. It runs in two phases:
//!
//! 1. **Completeness.** A single threshold scan over the flat buffer finds every
//!    cell whose value is not below the entry count. `NULL` is the maximum
//!    integer, so it is found by the same scan: a `NULL` cell marks the table
//!    unsolved and scanning continues, any other hit is an invalid property and
//!    ends validation.
//! 2. **Bijection.** Each category column must map properties to entries one to
//!    one. For every entry pair `a < b` the two entry slices are compared for a
//!    category where both hold the same non-null property. Shared `NULL`s are
//!    skipped.
//!
//! Phase 2 is quadratic in the entry count, which is fine for puzzle-sized
//! tables.

use crate::{Category, Entry, Location, Property, RawIndex, Table, scan};

/// The state of a table, as reported by [`validate()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum ValidationStatus<R: RawIndex = u8> {
    /// Every cell is set and every category column is a permutation.
    #[display("solved")]
    Ok,
    /// Some cells are unset, and no contradiction was found.
    #[display("unsolved")]
    Unsolved,
    /// A cell holds a value that is neither `NULL` nor below the entry count.
    #[display("invalid property at {location}")]
    InvalidProperty {
        /// The first such cell in row-major order.
        location: Location<R>,
    },
    /// Two entries hold the same property in one category.
    #[display("entries {entry_a} and {entry_b} share a property in category {category}")]
    DuplicateProperty {
        /// The lower entry of the pair.
        entry_a: Entry<R>,
        /// The higher entry of the pair.
        entry_b: Entry<R>,
        /// The category holding the shared property.
        category: Category<R>,
    },
}

/// Classifies the current state of `table`.
///
/// An invalid property takes precedence over everything else. Otherwise the
/// first duplicate in `(entry_a, entry_b, category)` order is reported, and a
/// table without duplicates is [`ValidationStatus::Ok`] or
/// [`ValidationStatus::Unsolved`] depending on whether any cell is `NULL`.
///
/// # Examples
///
/// ```
/// use logigrid_core::{Dimensions, Entry, Category, Property, Table, ValidationStatus, validate};
///
/// let dim = Dimensions::new(3, 2).unwrap();
/// let cells: Vec<Property<u8>> = [1, 0, 1, 2, 2, 1].into_iter().map(Property::new).collect();
/// let table = Table::new(dim, &cells).unwrap();
///
/// assert_eq!(
///     validate(&table),
///     ValidationStatus::DuplicateProperty {
///         entry_a: Entry::new(0),
///         entry_b: Entry::new(1),
///         category: Category::new(0),
///     },
/// );
/// ```
#[must_use]
pub fn validate<R: RawIndex>(table: &Table<'_, R>) -> ValidationStatus<R> {
    let dim = table.dim();
    let properties = table.property_slice();

    // Table construction guarantees `entries <= R::NULL`.
    let limit = Property::new(R::from_usize(dim.entries()).unwrap_or(R::NULL));

    let mut solved = true;
    let mut start = 0;
    while let Some(offset) = scan::find_first_at_least(properties, start, limit) {
        if !properties[offset].is_null() {
            let location = dim.index_to_location(offset);
            log::debug!(
                "invalid property {} at {location} in {dim} table",
                properties[offset]
            );
            return ValidationStatus::InvalidProperty { location };
        }
        solved = false;
        start = offset + 1;
    }

    for (a, entry_a) in dim.entry_indices::<R>().enumerate() {
        let slice_a = table.entry_slice(entry_a);
        for entry_b in dim.entry_indices::<R>().skip(a + 1) {
            let slice_b = table.entry_slice(entry_b);
            let mut start = 0;
            while let Some(offset) =
                scan::find_first_equal_position(&slice_a[start..], &slice_b[start..])
            {
                let category = start + offset;
                if !slice_a[category].is_null() {
                    let category = Category::from_index(category);
                    log::debug!(
                        "entries {entry_a} and {entry_b} share property {} in category {category}",
                        slice_a[category.index()]
                    );
                    return ValidationStatus::DuplicateProperty {
                        entry_a,
                        entry_b,
                        category,
                    };
                }
                debug_assert!(!solved, "shared null cell in a table seen as solved");
                start = category + 1;
            }
        }
    }

    if solved {
        ValidationStatus::Ok
    } else {
        log::debug!("{dim} table is unsolved");
        ValidationStatus::Unsolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimensions;

    const N: u8 = u8::MAX;

    fn check(entries: usize, categories: usize, values: &[u8]) -> ValidationStatus {
        let dim = Dimensions::new(entries, categories).unwrap();
        let cells: Vec<Property> = values.iter().copied().map(Property::new).collect();
        let table = Table::new(dim, &cells).unwrap();
        validate(&table)
    }

    fn location(entry: u8, category: u8) -> Location<u8> {
        Location {
            entry: Entry::new(entry),
            category: Category::new(category),
        }
    }

    fn duplicate(entry_a: u8, entry_b: u8, category: u8) -> ValidationStatus {
        ValidationStatus::DuplicateProperty {
            entry_a: Entry::new(entry_a),
            entry_b: Entry::new(entry_b),
            category: Category::new(category),
        }
    }

    mod solved {
        use super::*;

        #[test]
        fn test_permutation_columns_are_ok() {
            let status = check(4, 2, &[0, 3, 1, 2, 2, 1, 3, 0]);
            assert_eq!(status, ValidationStatus::Ok);
            assert!(status.is_ok());
        }

        #[test]
        fn test_wide_table_is_ok() {
            let values = [0, 4, 3, 2, 1, 0, 4, 3, 2, 1, 0, 4, 3, 2, 1];
            assert_eq!(check(5, 3, &values), ValidationStatus::Ok);
        }

        #[test]
        fn test_u16_table_is_ok() {
            let dim = Dimensions::new(300, 2).unwrap();
            let cells: Vec<Property<u16>> = (0..300_u16)
                .flat_map(|e| [Property::new(e), Property::new(299 - e)])
                .collect();
            let table = Table::new(dim, &cells).unwrap();
            assert_eq!(validate(&table), ValidationStatus::Ok);
        }
    }

    mod unsolved {
        use super::*;

        #[test]
        fn test_single_null_is_unsolved() {
            let status = check(4, 2, &[0, 3, 1, N, 2, 1, 3, 0]);
            assert_eq!(status, ValidationStatus::Unsolved);
            assert!(status.is_unsolved());
        }

        #[test]
        fn test_shared_nulls_are_not_duplicates() {
            assert_eq!(
                check(3, 2, &[N, 0, N, 1, N, 2]),
                ValidationStatus::Unsolved
            );
        }

        #[test]
        fn test_all_null_is_unsolved() {
            assert_eq!(check(3, 3, &[N; 9]), ValidationStatus::Unsolved);
        }
    }

    mod invalid_property {
        use super::*;

        #[test]
        fn test_value_at_entry_count() {
            assert_eq!(
                check(4, 2, &[0, 3, 1, 2, 2, 4, 3, 0]),
                ValidationStatus::InvalidProperty {
                    location: location(2, 1)
                }
            );
        }

        #[test]
        fn test_reported_after_nulls() {
            assert_eq!(
                check(3, 2, &[N, N, 0, 200, 1, 2]),
                ValidationStatus::InvalidProperty {
                    location: location(1, 1)
                }
            );
        }

        #[test]
        fn test_takes_precedence_over_duplicates() {
            let status = check(3, 2, &[0, 0, 0, 1, 2, 3]);
            assert!(status.is_invalid_property());
            assert_eq!(
                status,
                ValidationStatus::InvalidProperty {
                    location: location(2, 1)
                }
            );
        }
    }

    mod duplicate_property {
        use super::*;

        #[test]
        fn test_duplicate_in_first_category() {
            assert_eq!(check(3, 2, &[1, 0, 1, 2, 2, 1]), duplicate(0, 1, 0));
        }

        #[test]
        fn test_lowest_pair_wins() {
            // Entries 1 and 2 collide in category 0, entries 0 and 2 in category 1.
            let status = check(3, 2, &[0, 2, 1, 0, 1, 2]);
            assert_eq!(status, duplicate(0, 2, 1));
            assert!(status.is_duplicate_property());
        }

        #[test]
        fn test_skips_shared_null_before_collision() {
            assert_eq!(
                check(3, 3, &[N, 1, 0, N, 1, 1, 2, 0, 2]),
                duplicate(0, 1, 1)
            );
        }

        #[test]
        fn test_duplicate_in_unsolved_table() {
            assert_eq!(check(4, 2, &[0, N, 1, 2, 2, N, 3, 2]), duplicate(1, 3, 1));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidationStatus::<u8>::Ok.to_string(), "solved");
        assert_eq!(
            ValidationStatus::InvalidProperty {
                location: location(1, 0)
            }
            .to_string(),
            "invalid property at (entry 1, category 0)"
        );
        assert_eq!(
            duplicate(0, 2, 1).to_string(),
            "entries 0 and 2 share a property in category 1"
        );
    }
}
