//! Loading a table document from CSV and writing it back.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::error::Result;
use super::table::Table;

/// Parse CSV from `reader`. With `has_header`, the first record becomes the
/// header section.
///
/// # Errors
///
/// Returns an error for malformed CSV, an empty body or ragged records.
pub fn read_table<R: Read>(reader: R, has_header: bool) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(ToOwned::to_owned).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    let header = if has_header { records.next() } else { None };
    Table::from_records(header, records.collect())
}

/// Load a CSV file from disk.
///
/// # Errors
///
/// See [`read_table`]; also fails when the file cannot be opened.
pub fn load_table(path: &Path, has_header: bool) -> Result<Table> {
    let file = File::open(path)?;
    let table = read_table(file, has_header)?;
    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        cols = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

/// Write every header, body and footer row as CSV records.
///
/// # Errors
///
/// Returns an error when writing to `writer` fails.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = table
        .header_rows()
        .iter()
        .chain(table.body_rows())
        .chain(table.footer_rows());
    for row in rows {
        let fields = table
            .children(*row)
            .iter()
            .map(|cell| table.text_content(*cell));
        csv_writer.write_record(fields)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save the table to `path`, replacing its contents.
///
/// The table is written to a temporary file next to `path` and renamed over
/// it, so a failed save leaves the old file as it was.
///
/// # Errors
///
/// Returns an error when the temporary file cannot be created, written or
/// moved into place.
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    write_table(table, &mut tmp)?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    tmp.persist(path).map_err(|err| err.error)?;
    tracing::info!(path = %path.display(), "saved table");
    Ok(())
}
