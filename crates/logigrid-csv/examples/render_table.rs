//! Example demonstrating validation and CSV rendering of a random table.
//!
//! This example shows how to:
//! - Fill a caller-owned buffer through a `TableMut` view
//! - Validate the table
//! - Render it as CSV when it is solved
//!
//! # Usage
//!
//! ```sh
//! cargo run --example render_table
//! ```
//!
//! Choose the table shape and seed:
//!
//! ```sh
//! cargo run --example render_table -- --entries 6 --categories 4 --seed 42
//! ```
//!
//! Reset some cells to null before validating (the table is then reported as
//! unsolved and nothing is rendered):
//!
//! ```sh
//! RUST_LOG=debug cargo run --example render_table -- --blank 3
//! ```

use std::{
    io::{self, Write as _},
    process,
};

use clap::Parser;
use logigrid_core::{
    CategoryDesc, Dimensions, Property, Table, TableDesc, TableMut, ValidationStatus, validate,
};
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of entries (rows).
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    entries: usize,

    /// Number of categories (columns).
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    categories: usize,

    /// Seed for the random permutations.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,

    /// Number of cells to reset to null before validating.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    blank: usize,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let dim = match Dimensions::new(args.entries, args.categories) {
        Ok(dim) => dim,
        Err(e) => {
            eprintln!("Invalid dimensions: {e}");
            process::exit(2);
        }
    };

    let mut rng = Pcg64::seed_from_u64(args.seed);
    let mut cells = vec![Property::<u16>::NULL; dim.total_property_count()];
    let mut table = match TableMut::new(dim, &mut cells) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Cannot build table: {e}");
            process::exit(2);
        }
    };
    fill_random(&mut table, &mut rng);

    let mut offsets: Vec<usize> = (0..dim.total_property_count()).collect();
    offsets.shuffle(&mut rng);
    for &offset in offsets.iter().take(args.blank) {
        table.property_slice_mut()[offset] = Property::NULL;
    }

    let table = Table::from(table);
    let status = validate(&table);
    log::info!(
        "{dim} table with seed {}: {status} ({} unset cells)",
        args.seed,
        table.null_count()
    );
    if status != ValidationStatus::Ok {
        eprintln!("Table is {status}; nothing to render.");
        process::exit(1);
    }

    let desc = describe(dim);
    let mut stdout = io::stdout().lock();
    let result = logigrid_csv::render(&table, &desc, &mut stdout).and_then(|()| writeln!(stdout));
    if let Err(e) = result {
        eprintln!("Failed to write CSV: {e}");
        process::exit(1);
    }
}

/// Fills every category column with an independent random permutation.
fn fill_random(table: &mut TableMut<'_, u16>, rng: &mut Pcg64) {
    let dim = table.dim();
    let mut column: Vec<Property<u16>> = dim
        .entry_indices::<u16>()
        .map(|e| Property::new(e.raw()))
        .collect();
    for category in 0..dim.categories() {
        column.shuffle(rng);
        for (entry, property) in dim.entry_indices::<u16>().zip(&column) {
            table.entry_slice_mut(entry)[category] = *property;
        }
    }
}

/// Builds labels such as `Entry 2` and `C1-P3` for a table of shape `dim`.
fn describe(dim: Dimensions) -> TableDesc {
    TableDesc {
        entry_kind: "Entry".to_owned(),
        entries: (0..dim.entries()).map(|e| format!("Entry {e}")).collect(),
        categories: (0..dim.categories())
            .map(|c| CategoryDesc {
                name: format!("Category {c}"),
                properties: (0..dim.entries()).map(|p| format!("C{c}-P{p}")).collect(),
            })
            .collect(),
    }
}
