use std::collections::BTreeMap;

use eframe::egui::{self, Color32, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{viridis, ColorScale};
use crate::data::model::Record;
use crate::state::AppState;
use crate::summary::format_thousands;

/// Number of colour buckets the map draws; one `Points` series each.
const COLOR_LEVELS: usize = 32;
const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Housing map
// ---------------------------------------------------------------------------

/// Scatter of the view: longitude × latitude, coloured by price and sized by income.
pub fn housing_map(ui: &mut Ui, state: &AppState) {
    ui.heading("Housing Distribution Map");

    let Some(dataset) = &state.dataset else {
        return;
    };
    let visible: Vec<&Record> = state
        .visible_indices
        .iter()
        .map(|&i| &dataset.records[i])
        .collect();
    let Some(scale) = ColorScale::spanning(visible.iter().map(|r| r.median_house_value)) else {
        ui.colored_label(Color32::YELLOW, "No data available for the selected filters.");
        return;
    };

    // Group by (colour bucket, income) so thousands of points stay a few series.
    let mut groups: BTreeMap<(usize, u32), Vec<[f64; 2]>> = BTreeMap::new();
    for r in &visible {
        let level = (scale.normalize(r.median_house_value) * (COLOR_LEVELS - 1) as f64).round() as usize;
        let income = r.median_income.max(0.0).round() as u32;
        groups
            .entry((level, income))
            .or_default()
            .push([r.longitude, r.latitude]);
    }

    Plot::new("housing_map")
        .height(420.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((level, income), coords) in groups {
                let color = viridis(level as f64 / (COLOR_LEVELS - 1) as f64).gamma_multiply(0.6);
                let radius = ((income.max(1) * 10) as f32).sqrt() * 0.5;
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius)
                        .color(color),
                );
            }
        });

    color_bar(ui, &scale);
}

fn color_bar(ui: &mut Ui, scale: &ColorScale) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("${}", format_thousands(scale.min)));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(180.0, 12.0), Sense::hover());
        let painter = ui.painter();
        let slices = 60;
        let w = rect.width() / slices as f32;
        for i in 0..slices {
            let x = rect.left() + w * i as f32;
            let slice = egui::Rect::from_min_max(
                egui::pos2(x, rect.top()),
                egui::pos2(x + w + 0.5, rect.bottom()),
            );
            painter.rect_filled(slice, 0.0, viridis(i as f64 / (slices - 1) as f64));
        }
        ui.label(format!("${}", format_thousands(scale.max)));
        ui.small("Median House Value");
    });
}

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

pub fn price_histogram(ui: &mut Ui, state: &AppState) {
    ui.heading("Distribution of Median House Value");

    let Some(histogram) = &state.histogram else {
        ui.colored_label(Color32::YELLOW, "No data available to display histogram.");
        return;
    };

    let width = histogram.bin_width();
    let bars: Vec<Bar> = histogram
        .bars()
        .map(|(center, count)| {
            Bar::new(center, count as f64)
                .width(width)
                .fill(SKY_BLUE.gamma_multiply(0.7))
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("price_histogram")
        .height(280.0)
        .x_axis_label("Median House Value")
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars).name(format!("Histogram ({} bins)", histogram.counts.len())),
            );
        });
}
