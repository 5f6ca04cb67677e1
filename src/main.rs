use eframe::egui;

use housing_explorer::app::HousingExplorerApp;
use housing_explorer::config::DashboardConfig;
use housing_explorer::data::cache::DatasetCache;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();
    let cache = DatasetCache::new(config.data_path.clone(), config.seed, config.sample_size);
    let app = HousingExplorerApp::new(config, cache);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "California Housing Data Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
