use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::config::ViewerConfig;
use crate::data::model::RequestCollection;
use crate::timeline::{date_from_day_number, TimelineLayout};

// ---------------------------------------------------------------------------
// Timeline plot (central panel)
// ---------------------------------------------------------------------------

/// One horizontal bar per request from From Date to Until Date, one row per
/// Name_City, coloured by country.
pub fn timeline_plot(
    ui: &mut Ui,
    filtered: &RequestCollection,
    colors: &ColorMap,
    config: &ViewerConfig,
) {
    let layout = TimelineLayout::build(filtered);
    let height = layout.height(config.timeline_row_height, config.timeline_min_height);

    // One chart per country so the legend lists countries.
    let mut by_country: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
    for span in &layout.spans {
        let bar = Bar::new(span.y, span.end - span.start)
            .base_offset(span.start)
            .width(0.6);
        by_country.entry(span.country.clone()).or_default().push(bar);
    }

    Plot::new("timeline_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Guest - City")
        .x_axis_formatter(|mark, _range| {
            date_from_day_number(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_axis_formatter(move |mark, _range| {
            layout.label_at(mark.value).unwrap_or_default().to_string()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (country, bars) in by_country {
                let chart = BarChart::new(bars)
                    .horizontal()
                    .color(colors.color_for(&country))
                    .name(&country);
                plot_ui.bar_chart(chart);
            }
        });
}
