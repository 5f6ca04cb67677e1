use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::state::AppState;
use crate::summary::record_count_line;
use crate::ui::panels::{self, MenuAction};
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HousingExplorerApp {
    pub state: AppState,
    cache: DatasetCache,
}

impl HousingExplorerApp {
    /// Load (or synthesize) the default dataset through `cache`.
    pub fn new(config: DashboardConfig, cache: DatasetCache) -> Self {
        let state = AppState::from_cache(config, &cache);
        Self { state, cache }
    }

    /// Forget the cached dataset and load it again from disk.
    fn reload_default(&mut self) {
        log::info!("Reloading {}", self.cache.path().display());
        self.cache.reset();
        self.state = AppState::from_cache(self.state.config.clone(), &self.cache);
    }
}

impl eframe::App for HousingExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let mut action = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = panels::top_bar(ui, &mut self.state);
        });
        if action == Some(MenuAction::ReloadDefault) {
            self.reload_default();
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map, summary, histogram, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new("California Housing Data (1990)").size(26.0));

    if let Some(warning) = &state.warning {
        ui.label(RichText::new(warning).color(Color32::YELLOW));
    }

    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (File → Open…)");
        });
        return;
    };

    ui.label(record_count_line(state.visible_indices.len(), dataset.len()));
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        plot::housing_map(&mut columns[0], state);
        tables::data_summary(&mut columns[1], state);
    });

    ui.add_space(12.0);
    plot::price_histogram(ui, state);
    ui.add_space(12.0);

    egui::CollapsingHeader::new("Show Raw Data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| tables::raw_data(ui, dataset));

    egui::CollapsingHeader::new("Data Information")
        .default_open(false)
        .show(ui, |ui: &mut Ui| tables::data_info(ui, dataset));
}
