use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::clean::DatePolicy;
use crate::data::export::export_file_name;
use crate::data::filter::DateSelection;
use crate::data::metrics::Summary;
use crate::state::{AppState, Notice};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Date parsing policy (applies to the next load) ----
    ui.strong("Rows with invalid dates");
    let mut policy = state.config.date_policy;
    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut policy, DatePolicy::Tolerant, "Skip");
        ui.radio_value(&mut policy, DatePolicy::Strict, "Reject file");
    });
    if policy != state.config.date_policy {
        state.set_date_policy(policy);
    }
    ui.small("Takes effect on the next file.");
    ui.separator();

    let Some((min, max)) = state.date_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            date_filter(ui, state, min, max);
            ui.separator();
            country_filter(ui, state);
        });
}

fn date_filter(ui: &mut Ui, state: &mut AppState, min: chrono::NaiveDate, max: chrono::NaiveDate) {
    ui.strong("Show requests between");

    let mut single = matches!(
        state.filters.as_ref().map(|f| f.dates),
        Some(DateSelection::Single(_))
    );
    if ui.checkbox(&mut single, "Single day").changed() {
        state.set_single_date_mode(single);
    }

    let Some(current) = state.filters.as_ref().map(|f| f.dates) else {
        return;
    };
    let picked = match current {
        DateSelection::Range { mut start, mut end } => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut start).id_salt("date_start"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Until");
                ui.add(DatePickerButton::new(&mut end).id_salt("date_end"));
            });
            DateSelection::Range { start, end }
        }
        DateSelection::Single(mut day) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Day");
                ui.add(DatePickerButton::new(&mut day).id_salt("date_single"));
            });
            DateSelection::Single(day)
        }
    };
    if picked != current {
        state.set_dates(picked);
    }

    ui.small(format!(
        "Data spans {} to {}",
        min.format("%Y-%m-%d"),
        max.format("%Y-%m-%d")
    ));
}

fn country_filter(ui: &mut Ui, state: &mut AppState) {
    let all = state
        .collection()
        .map(|c| c.countries.clone())
        .unwrap_or_default();
    let n_selected = state.filters.as_ref().map_or(0, |f| f.countries.len());
    ui.strong(format!("Countries  ({n_selected}/{})", all.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_countries();
        }
        if ui.small_button("None").clicked() {
            state.select_no_countries();
        }
    });

    for country in &all {
        let mut checked = state
            .filters
            .as_ref()
            .is_some_and(|f| f.countries.contains(country));
        let text = RichText::new(country).color(state.color_map.color_for(country));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_country(country);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.report.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(c) = state.collection() {
            ui.label(format!(
                "{} requests loaded, {} visible",
                c.len(),
                state.visible_indices.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel pieces
// ---------------------------------------------------------------------------

/// Coloured one-line messages from the last load or export.
pub fn notices(ui: &mut Ui, notices: &[Notice]) {
    for notice in notices {
        let (text, color) = match notice {
            Notice::Success(m) => (m, Color32::from_rgb(60, 170, 90)),
            Notice::Info(m) => (m, Color32::LIGHT_BLUE),
            Notice::Warning(m) => (m, Color32::from_rgb(230, 160, 30)),
            Notice::Error(m) => (m, Color32::RED),
        };
        ui.label(RichText::new(text).color(color));
    }
}

/// Total Requests / Countries / Date Range tiles.
pub fn metrics_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Requests", summary.total_requests.to_string());
        metric(&mut cols[1], "Countries", summary.countries.to_string());
        metric(
            &mut cols[2],
            "Date Range",
            summary.date_range.clone().unwrap_or_default(),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(24.0).strong());
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open HomeExchange requests")
        .add_filter("Excel workbook", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.load_path(&path);
    }
}

pub fn save_export_dialog(state: &mut AppState) {
    let file_name = export_file_name(chrono::Local::now().date_naive());
    let file = rfd::FileDialog::new()
        .set_title("Export filtered requests")
        .set_file_name(&file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
