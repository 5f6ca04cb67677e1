use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, FilterCriteria, IncomeBracket};
use crate::data::model::{Column, HousingDataset};
use crate::summary::{Histogram, Metrics};

/// Location choices offered when the dataset has no `ocean_proximity` column.
pub const FALLBACK_LOCATIONS: [&str; 4] = ["Coastal", "Inland", "Urban", "Rural"];

// ---------------------------------------------------------------------------
// Price range control
// ---------------------------------------------------------------------------

/// Two-ended price slider. Bounds are the dataset's price extremes truncated
/// to whole dollars; handles snap to `bound_min + k * step`, and the upper
/// bound itself is always reachable.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRange {
    pub bound_min: f64,
    pub bound_max: f64,
    pub step: f64,
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub fn new((lo, hi): (f64, f64), step: f64) -> Self {
        let (bound_min, bound_max) = (lo.trunc(), hi.trunc());
        PriceRange {
            bound_min,
            bound_max,
            step,
            low: bound_min,
            high: bound_max,
        }
    }

    pub fn snap(&self, value: f64) -> f64 {
        if value >= self.bound_max {
            return self.bound_max;
        }
        let k = ((value - self.bound_min) / self.step).round();
        (self.bound_min + k * self.step).clamp(self.bound_min, self.bound_max)
    }

    pub fn set_low(&mut self, value: f64) {
        self.low = self.snap(value);
        if self.low > self.high {
            self.high = self.low;
        }
    }

    pub fn set_high(&mut self, value: f64) {
        self.high = self.snap(value);
        if self.high < self.low {
            self.low = self.high;
        }
    }

    pub fn is_full_range(&self) -> bool {
        self.low == self.bound_min && self.high == self.bound_max
    }
}

// ---------------------------------------------------------------------------
// Location multi-select
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationSelector {
    /// Choices in display order.
    pub options: Vec<String>,
    pub selected: BTreeSet<String>,
}

impl LocationSelector {
    /// Every option selected.
    pub fn for_dataset(dataset: &HousingDataset) -> Self {
        let options: Vec<String> = if dataset.has_column(Column::OceanProximity) {
            dataset.categories.clone()
        } else {
            FALLBACK_LOCATIONS.iter().map(|s| s.to_string()).collect()
        };
        let selected = options.iter().cloned().collect();
        LocationSelector { options, selected }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    pub fn toggle(&mut self, option: &str) {
        if !self.selected.remove(option) {
            self.selected.insert(option.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Session dataset (None when loading failed).
    pub dataset: Option<Arc<HousingDataset>>,

    /// Shown as a banner, e.g. when running on synthetic data.
    pub warning: Option<String>,

    pub price: PriceRange,
    pub locations: LocationSelector,
    pub income: IncomeBracket,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,
    pub metrics: Option<Metrics>,
    pub histogram: Option<Histogram>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let price = PriceRange::new((0.0, 0.0), config.price_step);
        Self {
            config,
            dataset: None,
            warning: None,
            price,
            locations: LocationSelector::default(),
            income: IncomeBracket::default(),
            visible_indices: Vec::new(),
            metrics: None,
            histogram: None,
            status_message: None,
        }
    }

    /// Start from the session cache: its dataset, or its error in the status line.
    pub fn from_cache(config: DashboardConfig, cache: &DatasetCache) -> Self {
        let mut state = Self::new(config);
        match cache.get() {
            Ok(loaded) => {
                state.warning = loaded.warning();
                state.set_dataset(loaded.dataset);
            }
            Err(e) => {
                state.status_message = Some(format!("Error: {e}"));
            }
        }
        state
    }

    /// Ingest a dataset and reset every filter to its default.
    pub fn set_dataset(&mut self, dataset: Arc<HousingDataset>) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reset_filters();
    }

    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.price = PriceRange::new(ds.price_bounds().unwrap_or((0.0, 0.0)), self.config.price_step);
            self.locations = LocationSelector::for_dataset(ds);
        }
        self.income = IncomeBracket::default();
        self.refilter();
    }

    /// Criteria from the current widget values.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            price_min: self.price.low,
            price_max: self.price.high,
            allowed_categories: self.locations.selected.clone(),
            income_bracket: self.income,
        }
    }

    /// Recompute the view and everything derived from it.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.metrics = None;
            self.histogram = None;
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.criteria());
        self.metrics = Metrics::compute(ds, &self.visible_indices);
        self.histogram = Histogram::of_prices(ds, &self.visible_indices, self.config.histogram_bins);
        log::debug!(
            "{} of {} records visible ({:?})",
            self.visible_indices.len(),
            ds.len(),
            self.income
        );
    }

    pub fn set_price_low(&mut self, value: f64) {
        self.price.set_low(value);
        self.refilter();
    }

    pub fn set_price_high(&mut self, value: f64) {
        self.price.set_high(value);
        self.refilter();
    }

    pub fn set_income(&mut self, income: IncomeBracket) {
        self.income = income;
        self.refilter();
    }

    pub fn toggle_location(&mut self, option: &str) {
        self.locations.toggle(option);
        self.refilter();
    }

    pub fn select_all_locations(&mut self) {
        self.locations.select_all();
        self.refilter();
    }

    pub fn select_no_locations(&mut self) {
        self.locations.select_none();
        self.refilter();
    }

    pub fn total_records(&self) -> usize {
        self.dataset.as_ref().map_or(0, |ds| ds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn state_with(rows: Vec<crate::data::model::Record>, columns: Vec<Column>) -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(Arc::new(HousingDataset::new(rows, columns)));
        state
    }

    fn three_rows() -> AppState {
        state_with(
            vec![
                record(2.0, 100_000.0, "INLAND"),
                record(3.0, 200_000.0, "NEAR BAY"),
                record(5.0, 300_000.0, "INLAND"),
            ],
            Column::ALL.to_vec(),
        )
    }

    #[test]
    fn test_price_snapping() {
        let mut p = PriceRange::new((14_999.0, 500_001.0), 10_000.0);
        assert_eq!((p.low, p.high), (14_999.0, 500_001.0));
        p.set_low(101_000.0);
        assert_eq!(p.low, 104_999.0);
        p.set_high(499_000.0);
        assert_eq!(p.high, 494_999.0);
        p.set_high(600_000.0);
        assert_eq!(p.high, 500_001.0);
        p.set_low(-5.0);
        assert_eq!(p.low, 14_999.0);
    }

    #[test]
    fn test_price_handles_never_cross() {
        let mut p = PriceRange::new((0.0, 100_000.0), 10_000.0);
        p.set_high(30_000.0);
        p.set_low(60_000.0);
        assert_eq!((p.low, p.high), (60_000.0, 60_000.0));
        p.set_high(20_000.0);
        assert_eq!((p.low, p.high), (20_000.0, 20_000.0));
    }

    #[test]
    fn test_bounds_are_truncated() {
        let p = PriceRange::new((14_999.9, 500_001.7), 10_000.0);
        assert_eq!((p.bound_min, p.bound_max), (14_999.0, 500_001.0));
        assert!(p.is_full_range());
    }

    #[test]
    fn test_defaults_after_load() {
        let state = three_rows();
        assert_eq!(state.income, IncomeBracket::Low);
        assert_eq!(state.locations.options, vec!["INLAND", "NEAR BAY"]);
        assert_eq!(state.locations.selected.len(), 2);
        assert!(state.price.is_full_range());
        assert_eq!(state.visible_indices, vec![0]);
        assert!(state.metrics.is_some());
        assert_eq!(state.total_records(), 3);
    }

    #[test]
    fn test_interactions_refilter() {
        let mut state = three_rows();
        state.set_income(IncomeBracket::High);
        assert_eq!(state.visible_indices, vec![2]);

        state.toggle_location("INLAND");
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.metrics, None);
        assert_eq!(state.histogram, None);

        // Deselecting every location lifts the location filter.
        state.select_no_locations();
        assert_eq!(state.visible_indices, vec![2]);

        state.set_income(IncomeBracket::Medium);
        state.select_all_locations();
        assert_eq!(state.visible_indices, vec![1]);
        state.set_price_high(150_000.0);
        assert!(state.visible_indices.is_empty());

        state.reset_filters();
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn test_fallback_locations_without_column() {
        let state = state_with(
            vec![record(2.0, 100_000.0, "INLAND")],
            Column::REQUIRED.to_vec(),
        );
        assert_eq!(state.locations.options, FALLBACK_LOCATIONS.to_vec());
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn test_from_cache_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        let cache = DatasetCache::new(&path, 42, 1000);

        let state = AppState::from_cache(DashboardConfig::default(), &cache);
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn test_from_cache_synthetic_warning() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().join("housing.csv"), 42, 1000);
        let state = AppState::from_cache(DashboardConfig::default(), &cache);
        assert_eq!(
            state.warning.as_deref(),
            Some("housing.csv not found. Using sample data.")
        );
        assert_eq!(state.total_records(), 1000);
        assert_eq!(state.locations.options.len(), 4);
    }
}
