use super::model::RequestCollection;

/// The three summary tiles shown above the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_requests: usize,
    pub countries: usize,
    /// `"Jan 2024 - Mar 2024"`; `None` when nothing is left after filtering.
    pub date_range: Option<String>,
}

impl Summary {
    pub fn of(collection: &RequestCollection) -> Self {
        let date_range = collection.date_bounds().map(|(from, until)| {
            format!("{} - {}", from.format("%b %Y"), until.format("%b %Y"))
        });
        Summary {
            total_requests: collection.len(),
            countries: collection.countries.len(),
            date_range,
        }
    }
}
