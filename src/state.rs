use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::config::ViewerConfig;
use crate::data::clean::{clean, CleanReport, DatePolicy};
use crate::data::export::write_csv;
use crate::data::filter::{filtered_indices, init_filter_state, DateSelection, FilterState};
use crate::data::loader::load_file;
use crate::data::model::{RawTable, RequestCollection};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// User-visible messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned data from the last successful load.
    pub report: Option<CleanReport>,

    /// Active sidebar selections; `None` until data is loaded.
    pub filters: Option<FilterState>,

    /// Indices of requests passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Country colours for the loaded file.
    pub color_map: ColorMap,

    pub config: ViewerConfig,

    /// Messages from the last load or export.
    pub notices: Vec<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            report: None,
            filters: None,
            visible_indices: Vec::new(),
            color_map: ColorMap::default(),
            config,
            notices: Vec::new(),
        }
    }

    /// Load and clean a workbook. On failure the previous data is dropped and
    /// an error notice is posted; the viewer keeps running either way.
    pub fn load_path(&mut self, path: &Path) {
        let result = load_file(path);
        self.ingest(result);
    }

    /// Clean an already parsed table (or report its load error).
    pub fn ingest(&mut self, table: Result<RawTable, LoadError>) {
        self.notices.clear();
        match table.and_then(|t| clean(&t, self.config.date_policy)) {
            Ok(report) => {
                log::info!(
                    "Loaded {} requests from {} countries",
                    report.collection.len(),
                    report.collection.countries.len()
                );
                self.set_report(report);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.report = None;
                self.filters = None;
                self.visible_indices.clear();
                self.color_map = ColorMap::default();
                self.notices.push(Notice::Error(format!("Error loading file: {e}")));
            }
        }
    }

    fn set_report(&mut self, report: CleanReport) {
        self.notices.push(Notice::Success("File loaded successfully!".into()));
        if report.skipped_invalid_dates > 0 {
            log::warn!("Skipped {} row(s) with invalid dates", report.skipped_invalid_dates);
            self.notices.push(Notice::Warning(format!(
                "Skipped {} row(s) due to invalid dates.",
                report.skipped_invalid_dates
            )));
        }
        if report.reversed_ranges > 0 {
            self.notices.push(Notice::Warning(format!(
                "{} request(s) end before they start.",
                report.reversed_ranges
            )));
        }
        if report.collection.is_empty() {
            self.notices
                .push(Notice::Info("No valid requests found in this file.".into()));
        }

        self.filters = init_filter_state(&report.collection);
        self.color_map = ColorMap::new(&report.collection.countries);
        self.report = Some(report);
        self.refilter();
    }

    pub fn collection(&self) -> Option<&RequestCollection> {
        self.report.as_ref().map(|r| &r.collection)
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = match (&self.report, &self.filters) {
            (Some(report), Some(filters)) => filtered_indices(&report.collection, filters),
            _ => Vec::new(),
        };
    }

    /// The filtered collection for this render pass.
    pub fn filtered(&self) -> RequestCollection {
        self.collection()
            .map(|c| c.select(&self.visible_indices))
            .unwrap_or_default()
    }

    // -- Filter mutations --

    pub fn toggle_country(&mut self, country: &str) {
        if let Some(filters) = &mut self.filters {
            if !filters.countries.remove(country) {
                filters.countries.insert(country.to_string());
            }
        }
        self.refilter();
    }

    pub fn select_all_countries(&mut self) {
        if let (Some(report), Some(filters)) = (&self.report, &mut self.filters) {
            filters.countries = report.collection.countries.clone();
        }
        self.refilter();
    }

    pub fn select_no_countries(&mut self) {
        if let Some(filters) = &mut self.filters {
            filters.countries.clear();
        }
        self.refilter();
    }

    /// Replace the date selection, kept inside the data's date span.
    pub fn set_dates(&mut self, dates: DateSelection) {
        let bounds = self.collection().and_then(|c| c.date_bounds());
        if let Some(filters) = &mut self.filters {
            filters.dates = dates;
            if let Some(bounds) = bounds {
                filters.clamp_to(bounds);
            }
        }
        self.refilter();
    }

    /// Switch between an interval and a single day, keeping the start date.
    pub fn set_single_date_mode(&mut self, single: bool) {
        let Some(filters) = &self.filters else {
            return;
        };
        let (start, end) = filters.dates.bounds();
        let dates = if single {
            DateSelection::Single(start)
        } else {
            DateSelection::Range {
                start,
                end: self.collection().and_then(|c| c.date_bounds()).map_or(end, |b| b.1),
            }
        };
        self.set_dates(dates);
    }

    /// Applies to the next load.
    pub fn set_date_policy(&mut self, policy: DatePolicy) {
        self.config.date_policy = policy;
    }

    /// Date picker limits.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.collection().and_then(|c| c.date_bounds())
    }

    // -- Export --

    /// Write the filtered rows to `path`; failure becomes an error notice.
    pub fn export_to(&mut self, path: &Path) {
        let filtered = self.filtered();
        let result = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))
            .and_then(|file| write_csv(&filtered, file).context("writing CSV"));
        match result {
            Ok(()) => {
                log::info!("Exported {} requests to {}", filtered.len(), path.display());
                self.notices.push(Notice::Success(format!(
                    "Exported {} request(s) to {}",
                    filtered.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.notices.push(Notice::Error(format!("Export failed: {e:#}")));
            }
        }
    }
}
