//! Spreadsheet ingestion: CSV via the csv crate, XLSX/XLS via calamine.
//! Only the first sheet of a workbook is read.

use crate::domain::model::SheetRow;
use crate::utils::error::{OutreachError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Reads every data row of the sheet at `path`, dispatching on extension.
/// Headers are kept verbatim (including stray whitespace); blank cells are
/// simply absent from the row map.
pub fn load_rows(path: &Path) -> Result<Vec<SheetRow>> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
    {
        Some(ext) if ext == "csv" => read_csv(path),
        Some(ext) if ext == "xlsx" || ext == "xls" => read_workbook(path),
        _ => Err(OutreachError::config(format!(
            "Unsupported spreadsheet format: {}",
            path.display()
        ))),
    }
}

fn read_csv(path: &Path) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if header.trim().is_empty() || value.trim().is_empty() {
                continue;
            }
            fields.insert(header.to_string(), value.to_string());
        }
        rows.push(SheetRow::new(fields));
    }
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OutreachError::config(format!("Workbook has no sheets: {}", path.display())))??;

    let mut cells = range.rows();
    let headers: Vec<String> = match cells.next() {
        Some(row) => row.iter().map(|cell| cell.to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in cells {
        let mut fields = HashMap::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.trim().is_empty() || matches!(cell, Data::Empty) {
                continue;
            }
            let value = cell.to_string();
            if value.trim().is_empty() {
                continue;
            }
            fields.insert(header.clone(), value);
        }
        rows.push(SheetRow::new(fields));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_csv_rows_with_verbatim_headers() {
        let file = csv_file(
            "Company,Name of HR's,HR Email id \n\
             Acme,Alice,a@x.com\n\
             Globex,,b@y.com\n",
        );

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("Company"), Some("Acme"));
        // Trailing-space header resolved through SheetRow::field.
        assert_eq!(rows[0].field("HR Email id"), Some("a@x.com"));
        // Blank cells are absent, not empty strings.
        assert_eq!(rows[1].field("Name of HR's"), None);
    }

    #[test]
    fn tolerates_short_csv_records() {
        let file = csv_file(
            "Company,Name of HR's,HR Email id\n\
             Acme\n\
             Globex,Bob,b@y.com\n",
        );

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("HR Email id"), None);
        assert_eq!(rows[1].field("HR Email id"), Some("b@y.com"));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(load_rows(Path::new("contacts.txt")).is_err());
        assert!(load_rows(Path::new("contacts")).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_rows(Path::new("does-not-exist.csv")).is_err());
    }
}
