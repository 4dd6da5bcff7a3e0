use std::collections::HashMap;

use chrono::NaiveDate;

use crate::data::model::RequestCollection;

// ---------------------------------------------------------------------------
// Timeline layout (independent of egui)
// ---------------------------------------------------------------------------

/// One horizontal bar on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSpan {
    /// Plot Y coordinate; row 0 of the layout is drawn at the top.
    pub y: f64,
    pub country: String,
    /// Days since the Unix epoch.
    pub start: f64,
    pub end: f64,
}

/// Bars plus the Name_City label of every row, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineLayout {
    pub spans: Vec<TimelineSpan>,
    pub labels: Vec<String>,
}

impl TimelineLayout {
    /// Requests sharing a Name_City share a row; rows appear in order of
    /// first occurrence, the first request at the top.
    pub fn build(collection: &RequestCollection) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut row_of: HashMap<&str, usize> = HashMap::new();
        let mut rows = Vec::with_capacity(collection.len());

        for request in &collection.requests {
            let row = *row_of.entry(request.name_city.as_str()).or_insert_with(|| {
                labels.push(request.name_city.clone());
                labels.len() - 1
            });
            rows.push(row);
        }

        let n_rows = labels.len();
        let spans = collection
            .requests
            .iter()
            .zip(rows)
            .map(|(request, row)| TimelineSpan {
                y: (n_rows - 1 - row) as f64,
                country: request.country.clone(),
                start: day_number(request.from_date),
                end: day_number(request.until_date),
            })
            .collect();

        TimelineLayout { spans, labels }
    }

    /// Label for a plot Y coordinate, if it lands on a row.
    pub fn label_at(&self, y: f64) -> Option<&str> {
        let rounded = y.round();
        if (y - rounded).abs() > 1e-6 || rounded < 0.0 {
            return None;
        }
        let from_top = self.labels.len().checked_sub(1 + rounded as usize)?;
        self.labels.get(from_top).map(String::as_str)
    }

    /// Plot height in points: `row_height` per request, never below
    /// `min_height`.
    pub fn height(&self, row_height: f32, min_height: f32) -> f32 {
        (self.spans.len() as f32 * row_height).max(min_height)
    }
}

/// Days since 1970-01-01.
pub fn day_number(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

/// Inverse of [`day_number`], for axis labels.
pub fn date_from_day_number(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    NaiveDate::default().checked_add_signed(chrono::Duration::try_days(days.round() as i64)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{date, request};

    #[test]
    fn first_request_is_on_top_and_rows_are_shared() {
        let c = RequestCollection::from_requests(vec![
            request("A", "France", "2024-01-01", "2024-01-10"),
            request("B", "Spain", "2024-02-01", "2024-02-05"),
            request("A", "France", "2024-03-01", "2024-03-05"),
        ]);
        let layout = TimelineLayout::build(&c);
        assert_eq!(layout.labels, ["A - Paris", "B - Paris"]);
        let ys: Vec<f64> = layout.spans.iter().map(|s| s.y).collect();
        assert_eq!(ys, [1.0, 0.0, 1.0]);
        assert_eq!(layout.label_at(1.0), Some("A - Paris"));
        assert_eq!(layout.label_at(0.0), Some("B - Paris"));
        assert_eq!(layout.label_at(0.5), None);
        assert_eq!(layout.label_at(2.0), None);
        assert_eq!(layout.label_at(-1.0), None);
    }

    #[test]
    fn span_covers_from_to_until() {
        let c = RequestCollection::from_requests(vec![request(
            "A",
            "France",
            "2024-01-01",
            "2024-01-10",
        )]);
        let span = &TimelineLayout::build(&c).spans[0];
        assert_eq!(span.end - span.start, 9.0);
        assert_eq!(date_from_day_number(span.start), Some(date("2024-01-01")));
        assert_eq!(span.country, "France");
    }

    #[test]
    fn height_grows_with_rows_above_minimum() {
        let requests = (0..20)
            .map(|i| request(&format!("G{i}"), "France", "2024-01-01", "2024-01-02"))
            .collect();
        let layout = TimelineLayout::build(&RequestCollection::from_requests(requests));
        assert_eq!(layout.height(30.0, 400.0), 600.0);
        assert_eq!(TimelineLayout::default().height(30.0, 400.0), 400.0);
    }

    #[test]
    fn height_counts_requests_not_rows() {
        let requests = (0..20)
            .map(|_| request("Same", "France", "2024-01-01", "2024-01-02"))
            .collect();
        let layout = TimelineLayout::build(&RequestCollection::from_requests(requests));
        assert_eq!(layout.labels.len(), 1);
        assert_eq!(layout.height(30.0, 400.0), 600.0);
    }

    #[test]
    fn day_numbers_start_at_the_epoch() {
        assert_eq!(day_number(date("1970-01-02")), 1.0);
        assert_eq!(date_from_day_number(f64::NAN), None);
    }
}
