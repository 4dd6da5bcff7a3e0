use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const NAME: &str = "Name";
pub const CITY: &str = "City";
pub const COUNTRY: &str = "Country";
pub const FROM_DATE: &str = "From Date";
pub const UNTIL_DATE: &str = "Until Date";
pub const NAME_CITY: &str = "Name_City";

/// Columns every uploaded sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [NAME, CITY, COUNTRY, FROM_DATE, UNTIL_DATE];

/// Display-only columns, passed through untouched.
pub const DETAIL_COLUMNS: [&str; 5] = ["Bedroom", "Bathrooms", "Max People", "Sqr Meters", "Stars"];

/// The ten columns shown in the table, in display order.
pub const DISPLAY_COLUMNS: [&str; 10] = [
    NAME,
    CITY,
    COUNTRY,
    FROM_DATE,
    UNTIL_DATE,
    "Bedroom",
    "Bathrooms",
    "Max People",
    "Sqr Meters",
    "Stars",
];

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from the workbook.
/// Must be `Ord` so it can sit in `BTreeMap` / `BTreeSet`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord because of the f64 payload --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                DateTime(_) => 5,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(dt) if dt.time() == NaiveTime::default() => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// `Null` and whitespace-only strings both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form used for the string fields (Name, City, Country), kept
    /// exactly as written in the sheet.
    pub fn as_text(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(self.to_string())
    }
}

/// Stand-in for cells that are not there at all.
pub static NULL_CELL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// RawTable – the first sheet, before cleaning
// ---------------------------------------------------------------------------

/// Header row plus data rows, each padded to the header width.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// 1-based sheet row holding the headers.
    pub header_row: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Default for RawTable {
    fn default() -> Self {
        Self {
            header_row: 1,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl RawTable {
    /// 1-based sheet row of the data row at `index`.
    pub fn sheet_row(&self, index: usize) -> usize {
        self.header_row + 1 + index
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// ExchangeRequest – one cleaned row
// ---------------------------------------------------------------------------

/// A single home-exchange request that survived cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRequest {
    pub name: String,
    pub city: String,
    pub country: String,
    pub from_date: NaiveDate,
    pub until_date: NaiveDate,
    /// `"{name} - {city}"`, used as the timeline label.
    pub name_city: String,
    /// Bedroom, Bathrooms, ... keyed by column name. Absent columns hold `Null`.
    pub details: BTreeMap<String, CellValue>,
    /// 1-based sheet row, counted from the top of the sheet.
    pub source_row: usize,
}

impl ExchangeRequest {
    pub fn detail(&self, column: &str) -> &CellValue {
        self.details.get(column).unwrap_or(&NULL_CELL)
    }

    /// Cell text for one of the [`DISPLAY_COLUMNS`], dates as `YYYY-MM-DD`.
    pub fn display_value(&self, column: &str) -> String {
        match column {
            NAME => self.name.clone(),
            CITY => self.city.clone(),
            COUNTRY => self.country.clone(),
            FROM_DATE => self.from_date.format("%Y-%m-%d").to_string(),
            UNTIL_DATE => self.until_date.format("%Y-%m-%d").to_string(),
            NAME_CITY => self.name_city.clone(),
            other => self.detail(other).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RequestCollection – the cleaned (or filtered) set
// ---------------------------------------------------------------------------

/// Requests in source order with the set of distinct countries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestCollection {
    pub requests: Vec<ExchangeRequest>,
    pub countries: BTreeSet<String>,
}

impl RequestCollection {
    pub fn from_requests(requests: Vec<ExchangeRequest>) -> Self {
        let countries = requests.iter().map(|r| r.country.clone()).collect();
        RequestCollection {
            requests,
            countries,
        }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Earliest From Date and latest Until Date, or `None` when empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min_from = self.requests.iter().map(|r| r.from_date).min()?;
        let max_until = self.requests.iter().map(|r| r.until_date).max()?;
        Some((min_from, max_until))
    }

    /// New collection holding the requests at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> RequestCollection {
        let requests = indices
            .iter()
            .filter_map(|&i| self.requests.get(i).cloned())
            .collect();
        RequestCollection::from_requests(requests)
    }
}
