use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::CategoryColors;
use crate::data::export;
use crate::data::filter::IncomeBracket;
use crate::state::AppState;

/// Menu actions the app handles itself (they need more than `AppState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ReloadDefault,
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            price_controls(ui, state);
            ui.separator();
            location_controls(ui, state);
            ui.separator();
            income_controls(ui, state);
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

fn price_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Price Range:");
    let range = state.price.bound_min..=state.price.bound_max;

    let mut low = state.price.low;
    let low_changed = ui
        .add(egui::Slider::new(&mut low, range.clone()).prefix("$").text("min"))
        .changed();
    if low_changed {
        state.set_price_low(low);
    }

    let mut high = state.price.high;
    let high_changed = ui
        .add(egui::Slider::new(&mut high, range).prefix("$").text("max"))
        .changed();
    if high_changed {
        state.set_price_high(high);
    }

    ui.small(format!("Step ${}", state.price.step));
}

fn location_controls(ui: &mut Ui, state: &mut AppState) {
    let options = state.locations.options.clone();
    let colors = CategoryColors::new(&options);

    let header = format!(
        "Select Location Type:  ({}/{})",
        state.locations.selected.len(),
        options.len()
    );
    ui.strong(header);

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_locations();
        }
        if ui.small_button("None").clicked() {
            state.select_no_locations();
        }
    });

    for option in &options {
        let mut checked = state.locations.is_selected(option);
        let text = RichText::new(option).color(colors.color_for(option));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_location(option);
        }
    }

    if state.locations.selected.is_empty() {
        ui.small("Nothing selected: showing every location.");
    }
}

fn income_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Income Level:");
    let mut income = state.income;
    for bracket in IncomeBracket::ALL {
        ui.radio_value(&mut income, bracket, bracket.label());
    }
    if income != state.income {
        state.set_income(income);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> Option<MenuAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload default data").clicked() {
                action = Some(MenuAction::ReloadDefault);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?} from {}",
                    dataset.len(),
                    dataset.column_names(),
                    path.display()
                );
                state.warning = None;
                state.set_dataset(dataset.into());
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(ds) = state.dataset.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .add_filter("CSV", &["csv"])
        .set_file_name("housing_filtered.csv")
        .save_file();

    if let Some(path) = file {
        match export::write_csv(&path, &ds, &state.visible_indices) {
            Ok(()) => {
                log::info!(
                    "Exported {} records to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
