use eframe::egui::{self, ScrollArea, Ui};

use crate::data::metrics::Summary;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HomeExchangeApp {
    pub state: AppState,
}

impl HomeExchangeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HomeExchangeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, timeline, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::notices(ui, &self.state.notices);

            if self.state.report.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Upload an Excel file to begin  (File → Open…)");
                });
                return;
            }

            let filtered = self.state.filtered();
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::metrics_row(ui, &Summary::of(&filtered));
                    ui.separator();

                    ui.heading("Timeline View");
                    if filtered.is_empty() {
                        ui.label("No requests match the selected filters.");
                    } else {
                        plot::timeline_plot(
                            ui,
                            &filtered,
                            &self.state.color_map,
                            &self.state.config,
                        );
                    }
                    ui.separator();

                    ui.heading("Data Table");
                    if filtered.is_empty() {
                        ui.label("No data to display.");
                    } else {
                        table::request_table(ui, &filtered);
                    }
                });
        });
    }
}
