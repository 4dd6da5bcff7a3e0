use std::io::Write;

use chrono::NaiveDate;

use super::model::{RequestCollection, DISPLAY_COLUMNS, NAME_CITY};
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// CSV export of the filtered collection
// ---------------------------------------------------------------------------

/// `homeexchange_filtered_<YYYYMMDD>.csv`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("homeexchange_filtered_{}.csv", today.format("%Y%m%d"))
}

/// Write `collection` as comma-separated text: the ten display columns plus
/// `Name_City`, dates as `YYYY-MM-DD`. An empty collection yields just the
/// header row.
pub fn write_csv<W: Write>(collection: &RequestCollection, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let header = DISPLAY_COLUMNS.iter().copied().chain(std::iter::once(NAME_CITY));
    wtr.write_record(header)?;

    for request in &collection.requests {
        let record = DISPLAY_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(NAME_CITY))
            .map(|col| request.display_value(col));
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::test_support::{date, request};

    fn to_csv_string(collection: &RequestCollection) -> String {
        let mut buf = Vec::new();
        write_csv(collection, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    const HEADER: &str =
        "Name,City,Country,From Date,Until Date,Bedroom,Bathrooms,Max People,Sqr Meters,Stars,Name_City";

    #[test]
    fn file_name_embeds_the_date() {
        assert_eq!(
            export_file_name(date("2024-03-07")),
            "homeexchange_filtered_20240307.csv"
        );
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = to_csv_string(&RequestCollection::default());
        assert_eq!(csv, format!("{HEADER}\n"));
    }

    #[test]
    fn rows_follow_collection_order() {
        let mut a = request("Anna", "France", "2024-01-01", "2024-01-10");
        a.details.insert("Stars".into(), CellValue::Float(4.5));
        a.details.insert("Bedroom".into(), CellValue::Integer(2));
        let mut b = request("Ben", "Spain", "2024-02-01", "2024-02-05");
        b.city = "Madrid, Centro".into();
        b.name_city = "Ben - Madrid, Centro".into();

        let csv = to_csv_string(&RequestCollection::from_requests(vec![a, b]));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "Anna,Paris,France,2024-01-01,2024-01-10,2,,,,4.5,Anna - Paris"
        );
        assert_eq!(
            lines[2],
            "Ben,\"Madrid, Centro\",Spain,2024-02-01,2024-02-05,,,,,,\"Ben - Madrid, Centro\""
        );
    }
}
