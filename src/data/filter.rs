use std::collections::BTreeSet;
use std::fmt;

use super::model::{Column, HousingDataset, Record};

// ---------------------------------------------------------------------------
// Income bracket
// ---------------------------------------------------------------------------

/// Median-income bracket. The three brackets partition the real line:
/// Low is `<= 2.5`, Medium is the open interval `(2.5, 4.5)`, High is `>= 4.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeBracket {
    #[default]
    Low,
    Medium,
    High,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 3] = [
        IncomeBracket::Low,
        IncomeBracket::Medium,
        IncomeBracket::High,
    ];

    pub const LOW_MAX: f64 = 2.5;
    pub const HIGH_MIN: f64 = 4.5;

    pub fn contains(self, income: f64) -> bool {
        match self {
            IncomeBracket::Low => income <= Self::LOW_MAX,
            IncomeBracket::Medium => income > Self::LOW_MAX && income < Self::HIGH_MIN,
            IncomeBracket::High => income >= Self::HIGH_MIN,
        }
    }

    /// Radio-button label.
    pub fn label(self) -> &'static str {
        match self {
            IncomeBracket::Low => "Low (±2.5)",
            IncomeBracket::Medium => "Medium (> 2.5 & < 4.5)",
            IncomeBracket::High => "High (> 4.5)",
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Active filter parameters, rebuilt from widget state on every interaction.
///
/// An empty `allowed_categories` set means "no location filter", not
/// "exclude every location". Deselecting every location therefore shows all
/// of them; this is the intended contract.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower bound on `median_house_value`.
    pub price_min: f64,
    /// Inclusive upper bound on `median_house_value`.
    pub price_max: f64,
    pub allowed_categories: BTreeSet<String>,
    pub income_bracket: IncomeBracket,
}

impl FilterCriteria {
    /// Criteria that keep every record in the given income bracket.
    pub fn unbounded(income_bracket: IncomeBracket) -> Self {
        FilterCriteria {
            price_min: f64::NEG_INFINITY,
            price_max: f64::INFINITY,
            allowed_categories: BTreeSet::new(),
            income_bracket,
        }
    }

    fn price_matches(&self, record: &Record) -> bool {
        self.price_min <= record.median_house_value && record.median_house_value <= self.price_max
    }

    fn category_matches(&self, record: &Record) -> bool {
        record
            .ocean_proximity
            .as_ref()
            .is_some_and(|label| self.allowed_categories.contains(label))
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Return indices of records that pass all active predicates, in input order.
///
/// Predicates run in a fixed sequence: income bracket over the full dataset,
/// then the inclusive price range, then location membership. The location
/// step is skipped when the dataset has no `ocean_proximity` column or the
/// allowed set is empty.
pub fn filtered_indices(dataset: &HousingDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let mut indices: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.income_bracket.contains(r.median_income))
        .map(|(i, _)| i)
        .collect();

    indices.retain(|&i| criteria.price_matches(&dataset.records[i]));

    if dataset.has_column(Column::OceanProximity) && !criteria.allowed_categories.is_empty() {
        indices.retain(|&i| criteria.category_matches(&dataset.records[i]));
    }

    indices
}

/// The filtered dataset itself. An empty result is a normal value.
pub fn filter(dataset: &HousingDataset, criteria: &FilterCriteria) -> HousingDataset {
    dataset.select(&filtered_indices(dataset, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn three_rows() -> HousingDataset {
        HousingDataset::new(
            vec![
                record(2.0, 100_000.0, "INLAND"),
                record(3.0, 200_000.0, "NEAR BAY"),
                record(5.0, 300_000.0, "INLAND"),
            ],
            Column::ALL.to_vec(),
        )
    }

    fn categories(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_low_income_inland_keeps_first_row() {
        let ds = three_rows();
        let criteria = FilterCriteria {
            price_min: 100_000.0,
            price_max: 300_000.0,
            allowed_categories: categories(&["INLAND"]),
            income_bracket: IncomeBracket::Low,
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);
        assert_eq!(filter(&ds, &criteria).records, vec![ds.records[0].clone()]);
    }

    #[test]
    fn test_empty_category_set_is_unconstrained() {
        let ds = three_rows();
        let criteria = FilterCriteria {
            price_min: 0.0,
            price_max: 1_000_000.0,
            allowed_categories: BTreeSet::new(),
            income_bracket: IncomeBracket::Medium,
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    #[test]
    fn test_bracket_boundaries() {
        assert!(IncomeBracket::Low.contains(2.5));
        assert!(!IncomeBracket::Medium.contains(2.5));
        assert!(IncomeBracket::Medium.contains(2.500001));
        assert!(IncomeBracket::Medium.contains(4.499999));
        assert!(!IncomeBracket::Medium.contains(4.5));
        assert!(IncomeBracket::High.contains(4.5));
        assert!(!IncomeBracket::Low.contains(2.500001));
    }

    #[test]
    fn test_brackets_partition_income_axis() {
        let samples = [
            f64::NEG_INFINITY,
            -3.0,
            0.0,
            2.4999,
            2.5,
            2.5001,
            3.0,
            4.4999,
            4.5,
            4.5001,
            15.0,
            f64::INFINITY,
        ];
        for income in samples {
            let matching = IncomeBracket::ALL
                .iter()
                .filter(|b| b.contains(income))
                .count();
            assert_eq!(matching, 1, "income {income}");
        }
    }

    #[test]
    fn test_nan_income_matches_no_bracket() {
        assert!(IncomeBracket::ALL.iter().all(|b| !b.contains(f64::NAN)));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let ds = three_rows();
        let criteria = FilterCriteria {
            price_min: 100_000.0,
            price_max: 100_000.0,
            ..FilterCriteria::unbounded(IncomeBracket::Low)
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);
    }

    #[test]
    fn test_category_filter_skipped_without_column() {
        let mut ds = three_rows();
        ds.columns.retain(|c| *c != Column::OceanProximity);
        let criteria = FilterCriteria {
            allowed_categories: categories(&["Coastal"]),
            ..FilterCriteria::unbounded(IncomeBracket::High)
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![2]);
    }

    #[test]
    fn test_missing_label_dropped_by_category_filter() {
        let mut rows = three_rows().records;
        rows[0].ocean_proximity = None;
        let ds = HousingDataset::new(rows, Column::ALL.to_vec());
        let criteria = FilterCriteria {
            allowed_categories: categories(&["INLAND"]),
            ..FilterCriteria::unbounded(IncomeBracket::Low)
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let ds = three_rows();
        let criteria = FilterCriteria {
            price_min: 400_000.0,
            price_max: 500_000.0,
            ..FilterCriteria::unbounded(IncomeBracket::High)
        };
        let out = filter(&ds, &criteria);
        assert!(out.is_empty());
        assert_eq!(out.columns, ds.columns);
    }

    #[test]
    fn test_output_is_subset_satisfying_predicates_and_pure() {
        let ds = crate::data::synthetic::generate(7, 500);
        let criteria = FilterCriteria {
            price_min: 100_000.0,
            price_max: 350_000.0,
            allowed_categories: categories(&["INLAND", "ISLAND"]),
            income_bracket: IncomeBracket::Medium,
        };
        let first = filtered_indices(&ds, &criteria);
        assert_eq!(first, filtered_indices(&ds, &criteria));
        assert!(first.windows(2).all(|w| w[0] < w[1]));
        for &i in &first {
            let r = &ds.records[i];
            assert!(IncomeBracket::Medium.contains(r.median_income));
            assert!((100_000.0..=350_000.0).contains(&r.median_house_value));
            let label = r.ocean_proximity.as_deref().unwrap();
            assert!(label == "INLAND" || label == "ISLAND");
        }
    }
}
