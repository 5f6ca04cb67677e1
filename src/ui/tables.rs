use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Column, HousingDataset};
use crate::state::AppState;
use crate::summary::{sample_columns, sample_rows, DataInfo};

const ROW_HEIGHT: f32 = 18.0;

/// Metrics plus the first rows of the view.
pub fn data_summary(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Summary");

    let (Some(dataset), Some(metrics)) = (&state.dataset, &state.metrics) else {
        ui.colored_label(Color32::YELLOW, "No data available for the selected filters.");
        return;
    };

    metric(ui, "Average Price", &metrics.price_text());
    metric(ui, "Average Income", &metrics.income_text());
    if let Some(age) = metrics.age_text() {
        metric(ui, "Average House Age", &age);
    }

    ui.add_space(8.0);
    ui.heading("Sample Data");
    let rows = sample_rows(&state.visible_indices, state.config.sample_rows);
    ui.push_id("sample_table", |ui: &mut Ui| {
        record_table(ui, dataset, &sample_columns(dataset), rows, false);
    });
}

fn metric(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.small(title);
        ui.heading(value);
    });
}

/// Every record of the dataset, virtualised.
pub fn raw_data(ui: &mut Ui, dataset: &HousingDataset) {
    let rows: Vec<usize> = (0..dataset.len()).collect();
    ui.push_id("raw_table", |ui: &mut Ui| {
        record_table(ui, dataset, &dataset.columns, &rows, true);
    });
}

fn record_table(
    ui: &mut Ui,
    dataset: &HousingDataset,
    columns: &[Column],
    rows: &[usize],
    show_index: bool,
) {
    let n_cols = columns.len() + usize::from(show_index);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(TableColumn::auto().at_least(60.0), n_cols)
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            if show_index {
                header.col(|ui| {
                    ui.strong("#");
                });
            }
            for column in columns {
                header.col(|ui| {
                    ui.strong(column.name());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let idx = rows[row.index()];
                let record = &dataset.records[idx];
                if show_index {
                    row.col(|ui| {
                        ui.label(idx.to_string());
                    });
                }
                for &column in columns {
                    row.col(|ui| {
                        ui.label(record.value(column).to_string());
                    });
                }
            });
        });
}

/// Column list, shape and dtypes.
pub fn data_info(ui: &mut Ui, dataset: &HousingDataset) {
    let info = DataInfo::of(dataset);

    ui.strong("Data Columns:");
    ui.label(format!("{:?}", info.columns));
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Data Shape:");
        ui.label(format!("{:?}", info.shape));
    });
    ui.strong("Data Types:");
    egui::Grid::new("dtypes")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (name, dtype) in &info.dtypes {
                ui.monospace(*name);
                ui.monospace(*dtype);
                ui.end_row();
            }
        });
}
