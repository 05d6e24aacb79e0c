//! Table export of a well matrix.
//!
//! CSV output has an empty top-left cell, one `Column j` header per plate
//! column and one `Row i` line per plate row, so spreadsheets import it as a
//! grid in physical plate coordinates.

use std::path::Path;

use common::file_format::{file_extension, SerdeFormat};

use crate::error::{Error, Result};
use crate::matrix::{row_label, WellMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
    Yaml,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match file_extension(path).as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedTableFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Renders `matrix` as CSV text.
pub fn to_csv(matrix: &WellMatrix) -> String {
    let mut out = String::new();

    for label in matrix.column_labels() {
        out.push(',');
        out.push_str(&label);
    }
    out.push('\n');

    for (i, values) in matrix.iter_rows().enumerate() {
        out.push_str(&row_label(i as u32));
        for value in values {
            // `{:?}` keeps a trailing `.0` and round-trips exactly
            out.push_str(&format!(",{value:?}"));
        }
        out.push('\n');
    }

    out
}

pub fn render(matrix: &WellMatrix, format: TableFormat) -> anyhow::Result<String> {
    match format {
        TableFormat::Csv => Ok(to_csv(matrix)),
        TableFormat::Json => common::serde_io::serialize(&matrix.to_table(), SerdeFormat::Json),
        TableFormat::Yaml => common::serde_io::serialize(&matrix.to_table(), SerdeFormat::Yaml),
    }
}

/// Writes `matrix` to `path`, picking the format from the extension.
pub fn write_table<P: AsRef<Path>>(matrix: &WellMatrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;

    let table_error = |source: anyhow::Error| Error::TableWrite {
        path: path.to_path_buf(),
        source,
    };

    let text = render(matrix, format).map_err(table_error)?;
    std::fs::write(path, text).map_err(|e| table_error(e.into()))?;

    log::debug!("Wrote {:?} table to {}", format, path.display());
    Ok(())
}
