use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{RequestCollection, DISPLAY_COLUMNS};

/// The ten display columns of the filtered requests, dates as `YYYY-MM-DD`.
pub fn request_table(ui: &mut Ui, filtered: &RequestCollection) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0), DISPLAY_COLUMNS.len())
        .header(20.0, |mut header| {
            for col in DISPLAY_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, filtered.len(), |mut row| {
                let request = &filtered.requests[row.index()];
                for col in DISPLAY_COLUMNS {
                    row.col(|ui: &mut Ui| {
                        ui.label(request.display_value(col));
                    });
                }
            });
        });
}
