//! CSV interchange file: one header row, then one row per product image

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{QuoteStyle, StringRecord};

use crate::error::{Error, Result};
use crate::models::Row;

/// Header written on export, in this order
pub const COLUMNS: [&str; 8] = [
    "Product name",
    "Image name",
    "Alt",
    "Suggested",
    "Src",
    "Product",
    "Product ID",
    "Image ID",
];

const PRODUCT_ID: &str = "Product ID";
const IMAGE_ID: &str = "Image ID";

/// Writes the header followed by every row. Fields are quoted only when needed.
pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes all rows to it
pub fn write_rows_to_path<P: AsRef<Path>>(path: P, rows: &[Row]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_rows(file, rows)?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.as_ref().display());
    Ok(())
}

/// Column positions resolved from the header row
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn require(&self, column: &'static str) -> Result<()> {
        if self.positions.contains_key(column) {
            Ok(())
        } else {
            Err(Error::MissingColumn(column))
        }
    }

    /// Field value, empty when the column or the field is absent
    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn required(&self, record: &StringRecord, column: &'static str) -> Result<String> {
        let value = self.field(record, column);
        if value.trim().is_empty() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(Error::MissingValue { line, column });
        }
        Ok(value.trim().to_string())
    }
}

/// Reads rows back, locating fields by header name rather than position.
///
/// `Product ID` and `Image ID` must be present and non-empty in every record;
/// any other column may be missing and reads as empty.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    read_rows_limited(reader, None)
}

/// Like [`read_rows`], but stops after `limit` records. Records past the
/// limit are not parsed or validated.
pub fn read_rows_limited<R: Read>(reader: R, limit: Option<usize>) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let index = ColumnIndex::from_headers(csv_reader.headers()?);
    index.require(PRODUCT_ID)?;
    index.require(IMAGE_ID)?;

    let mut rows = Vec::new();
    for record in csv_reader.records().take(limit.unwrap_or(usize::MAX)) {
        let record = record?;
        rows.push(Row {
            product_name: index.field(&record, "Product name").to_string(),
            image_name: index.field(&record, "Image name").to_string(),
            alt: index.field(&record, "Alt").to_string(),
            suggested: index.field(&record, "Suggested").to_string(),
            src: index.field(&record, "Src").to_string(),
            permalink: index.field(&record, "Product").to_string(),
            product_id: index.required(&record, PRODUCT_ID)?,
            image_id: index.required(&record, IMAGE_ID)?,
        });
    }

    Ok(rows)
}

/// Opens `path` and reads every row from it
pub fn read_rows_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    read_rows_from_path_limited(path, None)
}

/// Opens `path` and reads at most `limit` rows from it
pub fn read_rows_from_path_limited<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<Vec<Row>> {
    let file = File::open(path.as_ref())?;
    let rows = read_rows_limited(file, limit)?;
    log::debug!("Read {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
