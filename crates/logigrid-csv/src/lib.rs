//! CSV rendering of solved logic-grid tables.
//!
//! The output has a header row (`entry_kind` followed by each category name)
//! and one row per entry (the entry label followed by the label of the property
//! it holds in each category). Rows are separated by `\n`; there is no line
//! terminator after the last row.
//!
//! A field is quoted only if it contains a comma or a double quote. Quoted
//! fields double every embedded double quote. Nothing else is escaped, so
//! labels containing line breaks are written as is.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{CategoryDesc, Dimensions, Property, Table, TableDesc};
//!
//! let dim = Dimensions::new(2, 2).unwrap();
//! let cells: Vec<Property<u8>> = [1, 0, 0, 1].into_iter().map(Property::new).collect();
//! let table = Table::new(dim, &cells).unwrap();
//! let desc = TableDesc {
//!     entry_kind: "Name".to_owned(),
//!     entries: vec!["Ann".to_owned(), "Bob".to_owned()],
//!     categories: vec![
//!         CategoryDesc {
//!             name: "Pet".to_owned(),
//!             properties: vec!["cat".to_owned(), "dog".to_owned()],
//!         },
//!         CategoryDesc {
//!             name: "Drink".to_owned(),
//!             properties: vec!["tea".to_owned(), "milk, warm".to_owned()],
//!         },
//!     ],
//! };
//!
//! let mut out = Vec::new();
//! logigrid_csv::render(&table, &desc, &mut out)?;
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Name,Pet,Drink\nAnn,dog,tea\nBob,cat,\"milk, warm\"",
//! );
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use logigrid_core::{RawIndex, Table, TableDesc};

/// Writes `table` as CSV to `sink`, labelled by `desc`.
///
/// The table must be solved: every cell holds a property below the entry
/// count. This is only checked in debug builds.
///
/// # Errors
///
/// Returns the first error reported by `sink`. Nothing further is written
/// after a failed write.
///
/// # Panics
///
/// Panics if `desc` does not match the table's dimensions (see
/// [`TableDesc::check`]).
pub fn render<R, W>(table: &Table<'_, R>, desc: &TableDesc, sink: &mut W) -> io::Result<()>
where
    R: RawIndex,
    W: Write + ?Sized,
{
    let dim = table.dim();
    if let Err(e) = desc.check(dim) {
        panic!("table description does not match {dim} table: {e}");
    }
    debug_assert!(
        logigrid_core::validate(table).is_ok(),
        "rendering a table that is not solved"
    );

    write_field(sink, &desc.entry_kind)?;
    for category in &desc.categories {
        sink.write_all(b",")?;
        write_field(sink, &category.name)?;
    }

    for (entry, label) in dim.entry_indices::<R>().zip(&desc.entries) {
        sink.write_all(b"\n")?;
        write_field(sink, label)?;
        for (property, category) in table.entry_slice(entry).iter().zip(&desc.categories) {
            sink.write_all(b",")?;
            write_field(sink, &category.properties[property.index()])?;
        }
    }

    log::trace!("rendered {dim} table as CSV");
    Ok(())
}

/// Writes one CSV field, quoting it if it contains a comma or a double quote.
///
/// # Errors
///
/// Returns the first error reported by `sink`.
///
/// # Examples
///
/// ```
/// let mut out = Vec::new();
/// logigrid_csv::write_field(&mut out, "Sa\"m")?;
/// assert_eq!(out, b"\"Sa\"\"m\"");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_field<W>(sink: &mut W, field: &str) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut rest = field.as_bytes();
    let mut quoted = false;
    while let Some(pos) = rest.iter().position(|&b| b == b',' || b == b'"') {
        if !quoted {
            sink.write_all(b"\"")?;
            quoted = true;
        }
        let special = rest[pos];
        // Emit up to and including the special byte; a quote is then doubled.
        sink.write_all(&rest[..=pos])?;
        if special == b'"' {
            sink.write_all(b"\"")?;
        }
        rest = &rest[pos + 1..];
    }
    sink.write_all(rest)?;
    if quoted {
        sink.write_all(b"\"")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use logigrid_core::{CategoryDesc, Dimensions, Property};

    use super::*;

    fn field(s: &str) -> String {
        let mut out = Vec::new();
        write_field(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    mod fields {
        use super::*;

        #[test]
        fn test_plain_field_is_unquoted() {
            assert_eq!(field("Smith"), "Smith");
            assert_eq!(field(""), "");
            assert_eq!(field("two words"), "two words");
        }

        #[test]
        fn test_comma_is_quoted() {
            assert_eq!(field("Sm,ith"), "\"Sm,ith\"");
            assert_eq!(field(",,"), "\",,\"");
        }

        #[test]
        fn test_quote_is_doubled() {
            assert_eq!(field("Sa\"m"), "\"Sa\"\"m\"");
            assert_eq!(field("\""), "\"\"\"\"");
            assert_eq!(field("a,\"b\""), "\"a,\"\"b\"\"\"");
        }

        #[test]
        fn test_newline_is_passed_through() {
            assert_eq!(field("a\nb"), "a\nb");
        }

        #[test]
        fn test_non_ascii() {
            assert_eq!(field("café, bar"), "\"café, bar\"");
        }
    }

    mod tables {
        use super::*;

        const WORKED_VALUES: [u8; 15] = [0, 4, 3, 2, 1, 0, 4, 3, 2, 1, 0, 4, 3, 2, 1];

        /// Labels property `p` of each category after the row holding it, so
        /// every row reads back its own letter.
        fn worked_example() -> TableDesc {
            let rows = ["D", "E", "F", "G", "H"];
            let columns = ["A", "B", "C"];
            TableDesc {
                entry_kind: "OO".to_owned(),
                entries: rows.iter().map(|r| format!("{r}_")).collect(),
                categories: columns
                    .iter()
                    .enumerate()
                    .map(|(c, column)| {
                        let mut properties = vec![String::new(); rows.len()];
                        for (e, row) in rows.iter().enumerate() {
                            let value = usize::from(WORKED_VALUES[e * columns.len() + c]);
                            properties[value] = format!("{row}{column}");
                        }
                        CategoryDesc {
                            name: format!("_{column}"),
                            properties,
                        }
                    })
                    .collect(),
            }
        }

        fn worked_cells() -> Vec<Property> {
            WORKED_VALUES.into_iter().map(Property::new).collect()
        }

        fn render_to_string(table: &Table<'_>, desc: &TableDesc) -> String {
            let mut out = Vec::new();
            render(table, desc, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        }

        #[test]
        fn test_worked_example() {
            let dim = Dimensions::new(5, 3).unwrap();
            let cells = worked_cells();
            let table = Table::new(dim, &cells).unwrap();
            assert_eq!(
                render_to_string(&table, &worked_example()),
                "OO,_A,_B,_C\nD_,DA,DB,DC\nE_,EA,EB,EC\nF_,FA,FB,FC\nG_,GA,GB,GC\nH_,HA,HB,HC"
            );
        }

        #[test]
        fn test_quoted_labels() {
            let dim = Dimensions::new(2, 2).unwrap();
            let cells: Vec<Property> = [0, 1, 1, 0].into_iter().map(Property::new).collect();
            let table = Table::new(dim, &cells).unwrap();
            let desc = TableDesc {
                entry_kind: "Name".to_owned(),
                entries: vec!["Sm,ith".to_owned(), "Sa\"m".to_owned()],
                categories: vec![
                    CategoryDesc {
                        name: "Score".to_owned(),
                        properties: vec!["1".to_owned(), "2".to_owned()],
                    },
                    CategoryDesc {
                        name: "Team, color".to_owned(),
                        properties: vec!["red".to_owned(), "\"blue\"".to_owned()],
                    },
                ],
            };
            assert_eq!(
                render_to_string(&table, &desc),
                "Name,Score,\"Team, color\"\n\"Sm,ith\",1,\"\"\"blue\"\"\"\n\"Sa\"\"m\",2,red"
            );
        }

        #[test]
        #[should_panic(expected = "table description does not match")]
        fn test_mismatched_desc_panics() {
            let dim = Dimensions::new(2, 2).unwrap();
            let cells: Vec<Property> = [0, 1, 1, 0].into_iter().map(Property::new).collect();
            let table = Table::new(dim, &cells).unwrap();
            let _ = render_to_string(&table, &TableDesc::default());
        }

        #[test]
        fn test_sink_error_propagates() {
            struct Full;

            impl Write for Full {
                fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                    Err(io::Error::new(io::ErrorKind::StorageFull, "full"))
                }

                fn flush(&mut self) -> io::Result<()> {
                    Ok(())
                }
            }

            let dim = Dimensions::new(5, 3).unwrap();
            let cells = worked_cells();
            let table = Table::new(dim, &cells).unwrap();
            let err = render(&table, &worked_example(), &mut Full).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        }
    }
}
