use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::model::{
    CellValue, ExchangeRequest, RawTable, RequestCollection, CITY, COUNTRY, DETAIL_COLUMNS,
    FROM_DATE, NAME, NULL_CELL, UNTIL_DATE,
};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Parse-failure policy
// ---------------------------------------------------------------------------

/// What to do when a From/Until Date cell cannot be read as a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Abort the whole load on the first bad date.
    Strict,
    /// Skip the row and count it.
    #[default]
    Tolerant,
}

// ---------------------------------------------------------------------------
// Cleaning result
// ---------------------------------------------------------------------------

/// The cleaned collection plus what was thrown away on the way.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub collection: RequestCollection,
    /// Rows with an empty Name, City, Country, From Date or Until Date.
    pub dropped_missing: usize,
    /// Rows whose From or Until Date did not parse (tolerant mode only).
    pub skipped_invalid_dates: usize,
    /// Kept rows where Until Date is before From Date.
    pub reversed_ranges: usize,
}

/// Turn a raw sheet into a [`RequestCollection`].
///
/// Steps, in order: drop rows missing a required field, coerce both date
/// columns under `policy`, then derive `Name_City`.
pub fn clean(table: &RawTable, policy: DatePolicy) -> Result<CleanReport, LoadError> {
    let index_of = |col: &str| {
        table
            .column_index(col)
            .ok_or_else(|| LoadError::MissingColumns(vec![col.to_string()]))
    };
    let name_idx = index_of(NAME)?;
    let city_idx = index_of(CITY)?;
    let country_idx = index_of(COUNTRY)?;
    let from_idx = index_of(FROM_DATE)?;
    let until_idx = index_of(UNTIL_DATE)?;
    let detail_idx: Vec<(&str, Option<usize>)> = DETAIL_COLUMNS
        .iter()
        .map(|col| (*col, table.column_index(col)))
        .collect();

    let mut report = CleanReport::default();
    let mut requests = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        let source_row = table.sheet_row(i);
        let cell = |idx: usize| row.get(idx).unwrap_or(&NULL_CELL);

        let (Some(name), Some(city), Some(country)) = (
            cell(name_idx).as_text(),
            cell(city_idx).as_text(),
            cell(country_idx).as_text(),
        ) else {
            report.dropped_missing += 1;
            continue;
        };
        let (from_cell, until_cell) = (cell(from_idx), cell(until_idx));
        if from_cell.is_missing() || until_cell.is_missing() {
            report.dropped_missing += 1;
            continue;
        }

        let from_date = parse_date(from_cell);
        let until_date = parse_date(until_cell);
        let (from_date, until_date) = match (from_date, until_date) {
            (Some(f), Some(u)) => (f, u),
            (from, _) => {
                let (column, value) = if from.is_none() {
                    (FROM_DATE, from_cell)
                } else {
                    (UNTIL_DATE, until_cell)
                };
                match policy {
                    DatePolicy::Strict => {
                        return Err(LoadError::InvalidDate {
                            row: source_row,
                            column,
                            value: value.to_string(),
                        });
                    }
                    DatePolicy::Tolerant => {
                        log::debug!("Row {source_row}: unparseable {column} '{value}', skipping");
                        report.skipped_invalid_dates += 1;
                        continue;
                    }
                }
            }
        };

        if until_date < from_date {
            report.reversed_ranges += 1;
        }

        let details: BTreeMap<String, CellValue> = detail_idx
            .iter()
            .map(|(col, idx)| {
                let value = idx.map(|i| cell(i).clone()).unwrap_or(CellValue::Null);
                (col.to_string(), value)
            })
            .collect();

        let name_city = format!("{name} - {city}");
        requests.push(ExchangeRequest {
            name,
            city,
            country,
            from_date,
            until_date,
            name_city,
            details,
            source_row,
        });
    }

    report.collection = RequestCollection::from_requests(requests);

    log::info!(
        "Cleaned {} of {} rows ({} missing required fields, {} invalid dates)",
        report.collection.len(),
        table.rows.len(),
        report.dropped_missing,
        report.skipped_invalid_dates
    );
    if report.reversed_ranges > 0 {
        log::warn!(
            "{} request(s) have an Until Date before their From Date",
            report.reversed_ranges
        );
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Date coercion
// ---------------------------------------------------------------------------

/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Interpret a cell as a calendar date; times are dropped.
///
/// Accepts date cells, Excel serial numbers (1900 date system) and the
/// common textual forms listed in [`DATE_FORMATS`] / [`DATETIME_FORMATS`].
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Integer(i) => excel_serial_to_date(*i as f64),
        CellValue::Float(f) => excel_serial_to_date(*f),
        CellValue::String(s) => parse_date_str(s),
        CellValue::Bool(_) | CellValue::Null => None,
    }
}

/// Excel's phantom 1900-02-29.
const LEAP_BUG_SERIAL: i64 = 60;

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let days = serial.trunc() as i64;
    // Serial 1 is 1900-01-01. From serial 61 on, every serial is one day
    // late because Excel counts a 1900-02-29 that never existed.
    let epoch = match days.cmp(&LEAP_BUG_SERIAL) {
        std::cmp::Ordering::Less => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        std::cmp::Ordering::Equal => return None,
        std::cmp::Ordering::Greater => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    epoch.checked_add_signed(Duration::days(days))
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
