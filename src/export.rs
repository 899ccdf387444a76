//! Delimited-text persistence of a table collection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::table::TableCollection;

/// An error writing tables to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An error creating the output directory.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error writing a delimited-text file.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Write every table to `<directory>/<name>.csv`, returning the paths
/// written.
///
/// The first row holds the column names; absent cells are left empty and
/// array values are joined with `;`.
pub fn write_csv(
    tables: &TableCollection,
    directory: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ExportError> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory)?;

    let mut written = Vec::with_capacity(tables.len());
    for (name, table) in tables.iter() {
        if table.columns().is_empty() {
            tracing::debug!(name, "skipping table with no columns");
            continue;
        }

        let path = directory.join(format!("{name}.csv"));
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|cell| match cell {
                Some(value) => value.to_string(),
                None => String::new(),
            }))?;
        }
        writer.flush()?;

        written.push(path);
    }

    Ok(written)
}
