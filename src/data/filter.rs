use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{ExchangeRequest, RequestCollection};

// ---------------------------------------------------------------------------
// Date selection
// ---------------------------------------------------------------------------

/// The date part of the filter: a closed interval or a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    Range { start: NaiveDate, end: NaiveDate },
    /// Only one boundary picked; behaves as `start == end`.
    Single(NaiveDate),
}

impl DateSelection {
    /// `(start, end)` of the closed interval.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            DateSelection::Range { start, end } => (start, end),
            DateSelection::Single(day) => (day, day),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Session-scoped filter selections, passed into [`filtered_indices`] on
/// every render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub dates: DateSelection,
    /// Accepted countries. Empty means nothing is shown.
    pub countries: BTreeSet<String>,
}

impl FilterState {
    /// Pull the selected dates back inside `[min, max]`.
    pub fn clamp_to(&mut self, (min, max): (NaiveDate, NaiveDate)) {
        let clamp = |d: NaiveDate| d.clamp(min, min.max(max));
        self.dates = match self.dates {
            DateSelection::Range { start, end } => DateSelection::Range {
                start: clamp(start),
                end: clamp(end),
            },
            DateSelection::Single(day) => DateSelection::Single(clamp(day)),
        };
    }
}

/// Default filters: the full date span of the data and every country.
/// `None` when there is nothing to filter.
pub fn init_filter_state(collection: &RequestCollection) -> Option<FilterState> {
    let (start, end) = collection.date_bounds()?;
    Some(FilterState {
        dates: DateSelection::Range { start, end },
        countries: collection.countries.clone(),
    })
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A request passes when it lies inside the interval and its country is
/// selected (exact, case-sensitive match).
pub fn matches(request: &ExchangeRequest, filters: &FilterState) -> bool {
    let (start, end) = filters.dates.bounds();
    request.from_date >= start
        && request.until_date <= end
        && filters.countries.contains(&request.country)
}

/// Return indices of requests that pass the filters, in source order.
pub fn filtered_indices(collection: &RequestCollection, filters: &FilterState) -> Vec<usize> {
    collection
        .requests
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{date, request};

    fn apply(collection: &RequestCollection, filters: &FilterState) -> RequestCollection {
        collection.select(&filtered_indices(collection, filters))
    }

    fn sample() -> RequestCollection {
        RequestCollection::from_requests(vec![
            request("A", "France", "2024-01-01", "2024-01-10"),
            request("B", "Spain", "2024-02-01", "2024-02-05"),
            request("C", "France", "2024-01-12", "2024-01-12"),
            request("D", "france", "2024-01-03", "2024-01-04"),
        ])
    }

    fn countries(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn range(start: &str, end: &str) -> DateSelection {
        DateSelection::Range {
            start: date(start),
            end: date(end),
        }
    }

    #[test]
    fn interval_and_country_both_apply() {
        // C has no country and never reaches the filter.
        let cleaned = RequestCollection::from_requests(vec![
            request("A", "France", "2024-01-01", "2024-01-10"),
            request("B", "Spain", "2024-02-01", "2024-02-05"),
        ]);
        let filters = FilterState {
            dates: range("2024-01-01", "2024-01-31"),
            countries: countries(&["France"]),
        };
        let out = apply(&cleaned, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out.requests[0].name, "A");
    }

    #[test]
    fn country_match_is_case_sensitive() {
        let filters = FilterState {
            dates: range("2024-01-01", "2024-12-31"),
            countries: countries(&["France"]),
        };
        assert_eq!(filtered_indices(&sample(), &filters), vec![0, 2]);
    }

    #[test]
    fn default_filters_keep_everything_in_order() {
        let c = sample();
        let filters = init_filter_state(&c).unwrap();
        assert_eq!(filters.dates, range("2024-01-01", "2024-02-05"));
        assert_eq!(filters.countries, countries(&["France", "Spain", "france"]));
        assert_eq!(apply(&c, &filters), c);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let c = sample();
        let filters = FilterState {
            dates: range("2024-01-01", "2024-01-31"),
            countries: countries(&["France", "france"]),
        };
        let once = apply(&c, &filters);
        let twice = apply(&once, &filters);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn single_date_equals_degenerate_range() {
        let c = sample();
        let all = countries(&["France", "Spain", "france"]);
        let single = FilterState {
            dates: DateSelection::Single(date("2024-01-12")),
            countries: all.clone(),
        };
        let degenerate = FilterState {
            dates: range("2024-01-12", "2024-01-12"),
            countries: all,
        };
        assert_eq!(filtered_indices(&c, &single), filtered_indices(&c, &degenerate));
        assert_eq!(filtered_indices(&c, &single), vec![2]);
    }

    #[test]
    fn empty_country_set_matches_nothing() {
        let c = sample();
        let mut filters = init_filter_state(&c).unwrap();
        filters.countries.clear();
        assert!(apply(&c, &filters).is_empty());
    }

    #[test]
    fn requests_straddling_the_interval_are_excluded() {
        let c = sample();
        let filters = FilterState {
            dates: range("2024-01-02", "2024-01-09"),
            countries: countries(&["France", "Spain", "france"]),
        };
        // A starts before and ends after; only D fits.
        assert_eq!(filtered_indices(&c, &filters), vec![3]);
    }

    #[test]
    fn clamp_pulls_dates_into_bounds() {
        let mut filters = FilterState {
            dates: range("2023-06-01", "2025-01-01"),
            countries: BTreeSet::new(),
        };
        filters.clamp_to((date("2024-01-01"), date("2024-02-05")));
        assert_eq!(filters.dates, range("2024-01-01", "2024-02-05"));

        filters.dates = DateSelection::Single(date("2030-01-01"));
        filters.clamp_to((date("2024-01-01"), date("2024-02-05")));
        assert_eq!(filters.dates, DateSelection::Single(date("2024-02-05")));
    }

    #[test]
    fn empty_collection_has_no_default_filters() {
        assert!(init_filter_state(&RequestCollection::default()).is_none());
    }
}
