use std::io::Cursor;
use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx};

use super::model::{CellValue, RawTable, REQUIRED_COLUMNS};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the first sheet of an `.xlsx` file from disk.
pub fn load_file(path: &Path) -> Result<RawTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Parse an in-memory `.xlsx` payload.
///
/// The first row of the first sheet is the header row. All five required
/// columns must be present (exact, case-sensitive names); any other column
/// is carried along as-is.
pub fn load_bytes(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(LoadError::NoSheets)??;

    // Leading empty rows are not part of the range.
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|c| c.as_string().unwrap_or_else(|| c.to_string()))
            .collect(),
        None => Vec::new(),
    };

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let width = headers.len();
    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().take(width).map(cell_to_value).collect();
            cells.resize(width, CellValue::Null);
            cells
        })
        .collect();

    log::debug!("Read {} rows with columns {:?}", rows.len(), headers);
    Ok(RawTable {
        header_row,
        headers,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// Map a calamine cell onto a [`CellValue`].
///
/// Empty and error cells (`#N/A`, `#VALUE!`, ...) both become `Null`.
fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Float(cell.as_f64().unwrap_or(f64::NAN)),
        },
        Data::DateTimeIso(s) => match cell.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::String(s.clone()),
        },
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    use super::*;

    /// Cell contents for building fixture workbooks.
    pub enum Cell<'a> {
        Text(&'a str),
        Number(f64),
        Date(u16, u8, u8),
        Blank,
    }

    /// Build an `.xlsx` in memory with `headers` and `rows` on the first sheet.
    pub fn workbook(headers: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
        workbook_from_row(0, headers, rows)
    }

    /// Same as [`workbook`] but with `first_row` empty rows above the headers.
    pub fn workbook_from_row(first_row: u32, headers: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let sheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(first_row, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            let r = first_row + r as u32 + 1;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Number(n) => {
                        sheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Date(y, m, d) => {
                        let dt = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                        sheet.write_datetime_with_format(r, c, &dt, &date_format).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    pub const HEADERS: [&str; 10] = [
        "Name",
        "City",
        "Country",
        "From Date",
        "Until Date",
        "Bedroom",
        "Bathrooms",
        "Max People",
        "Sqr Meters",
        "Stars",
    ];

    #[test]
    fn reads_first_sheet_with_typed_cells() {
        let bytes = workbook(
            &HEADERS,
            &[vec![
                Cell::Text("Anna"),
                Cell::Text("Lyon"),
                Cell::Text("France"),
                Cell::Date(2024, 1, 1),
                Cell::Text("2024-01-10"),
                Cell::Number(2.0),
                Cell::Number(1.0),
                Cell::Number(4.0),
                Cell::Number(80.0),
                Cell::Number(4.5),
            ]],
        );
        let table = load_bytes(&bytes).unwrap();
        assert_eq!(table.headers, HEADERS);
        assert_eq!(table.header_row, 1);
        assert_eq!(table.rows.len(), 1);

        let row = &table.rows[0];
        assert_eq!(row[0], CellValue::String("Anna".into()));
        assert!(matches!(row[3], CellValue::DateTime(_)));
        assert_eq!(row[3].to_string(), "2024-01-01");
        assert_eq!(row[4], CellValue::String("2024-01-10".into()));
        assert_eq!(row[9].to_string(), "4.5");
    }

    #[test]
    fn leading_empty_rows_shift_the_header_row() {
        let bytes = workbook_from_row(
            2,
            &HEADERS,
            &[vec![
                Cell::Text("Anna"),
                Cell::Text("Lyon"),
                Cell::Text("France"),
                Cell::Date(2024, 1, 1),
                Cell::Date(2024, 1, 10),
            ]],
        );
        let table = load_bytes(&bytes).unwrap();
        assert_eq!(table.header_row, 3);
        assert_eq!(table.headers, HEADERS);
        assert_eq!(table.sheet_row(0), 4);
    }

    #[test]
    fn pads_short_rows_with_null() {
        let bytes = workbook(
            &HEADERS,
            &[vec![
                Cell::Text("Anna"),
                Cell::Text("Lyon"),
                Cell::Blank,
                Cell::Date(2024, 1, 1),
                Cell::Date(2024, 1, 10),
            ]],
        );
        let table = load_bytes(&bytes).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[2], CellValue::Null);
        assert_eq!(row[9], CellValue::Null);
    }

    #[test]
    fn missing_required_columns_are_reported() {
        let bytes = workbook(&["Name", "City", "From Date"], &[]);
        match load_bytes(&bytes) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["Country", "Until Date"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let bytes = workbook(&["name", "City", "Country", "From Date", "Until Date"], &[]);
        assert!(matches!(
            load_bytes(&bytes),
            Err(LoadError::MissingColumns(cols)) if cols == vec!["Name"]
        ));
    }

    #[test]
    fn garbage_payload_is_a_workbook_error() {
        let err = load_bytes(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, LoadError::Workbook(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/requests.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
