use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Anything that stops a spreadsheet from becoming a request collection.
///
/// None of these are fatal to the viewer: the UI turns them into an error
/// notice and waits for another file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid .xlsx workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("workbook has no worksheets")]
    NoSheets,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: cannot parse {column} value '{value}' as a date")]
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failure while writing the filtered rows to CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("writing export file: {0}")]
    Io(#[from] std::io::Error),
}
