//! Values derived from the filtered view for the dashboard panels.
//!
//! Every function here has an explicit empty state (`None` or an empty
//! collection) so the UI never aggregates over zero rows.

use crate::data::model::{Column, HousingDataset};

pub fn record_count_line(shown: usize, total: usize) -> String {
    format!("Showing {shown} out of {total} records")
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub average_price: f64,
    pub average_income: f64,
    /// `None` when the age column is absent or every cell is blank.
    pub average_age: Option<f64>,
}

impl Metrics {
    pub fn compute(dataset: &HousingDataset, indices: &[usize]) -> Option<Metrics> {
        if indices.is_empty() {
            return None;
        }
        let rows = || indices.iter().filter_map(|&i| dataset.records.get(i));
        let average_age = if dataset.has_column(Column::HousingMedianAge) {
            mean(rows().filter_map(|r| r.housing_median_age.map(f64::from)))
        } else {
            None
        };
        Some(Metrics {
            average_price: mean(rows().map(|r| r.median_house_value))?,
            average_income: mean(rows().map(|r| r.median_income))?,
            average_age,
        })
    }

    pub fn price_text(&self) -> String {
        format!("${}", format_thousands(self.average_price))
    }

    pub fn income_text(&self) -> String {
        format!("${:.2}", self.average_income)
    }

    pub fn age_text(&self) -> Option<String> {
        self.average_age.map(|age| format!("{age:.1} years"))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Round to a whole number and group digits with commas: `1234567.8` → `1,234,568`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

// ---------------------------------------------------------------------------
// Sample table
// ---------------------------------------------------------------------------

/// Columns of the sample table; age and location only when present.
pub fn sample_columns(dataset: &HousingDataset) -> Vec<Column> {
    let mut columns = vec![Column::MedianIncome, Column::MedianHouseValue];
    if dataset.has_column(Column::HousingMedianAge) {
        columns.push(Column::HousingMedianAge);
    }
    if dataset.has_column(Column::OceanProximity) {
        columns.push(Column::OceanProximity);
    }
    columns.extend([Column::Longitude, Column::Latitude]);
    columns
}

/// The first `n` rows of the view.
pub fn sample_rows(indices: &[usize], n: usize) -> &[usize] {
    &indices[..indices.len().min(n)]
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` over their own `[min, max]` range. The last bin is closed
    /// on the right; a single distinct value is binned over `[v - 0.5, v + 0.5]`.
    /// NaN values are ignored.
    pub fn compute(values: impl IntoIterator<Item = f64>, bins: usize) -> Option<Histogram> {
        let values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if values.is_empty() || bins == 0 {
            return None;
        }
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Histogram { edges, counts })
    }

    /// Median house values of the view.
    pub fn of_prices(dataset: &HousingDataset, indices: &[usize], bins: usize) -> Option<Histogram> {
        Self::compute(
            indices
                .iter()
                .filter_map(|&i| dataset.records.get(i))
                .map(|r| r.median_house_value),
            bins,
        )
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// `(center, count)` per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }
}

// ---------------------------------------------------------------------------
// Data information panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DataInfo {
    pub columns: Vec<&'static str>,
    pub shape: (usize, usize),
    pub dtypes: Vec<(&'static str, &'static str)>,
}

impl DataInfo {
    pub fn of(dataset: &HousingDataset) -> DataInfo {
        DataInfo {
            columns: dataset.column_names(),
            shape: dataset.shape(),
            dtypes: dataset
                .columns
                .iter()
                .map(|c| (c.name(), c.kind().dtype()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn dataset() -> HousingDataset {
        let mut rows = vec![
            record(2.0, 100_000.0, "INLAND"),
            record(3.0, 200_000.0, "NEAR BAY"),
            record(5.0, 300_001.0, "INLAND"),
        ];
        rows[0].housing_median_age = Some(10);
        rows[1].housing_median_age = None;
        rows[2].housing_median_age = Some(41);
        HousingDataset::new(rows, Column::ALL.to_vec())
    }

    #[test]
    fn test_count_line() {
        assert_eq!(record_count_line(1, 3), "Showing 1 out of 3 records");
    }

    #[test]
    fn test_metrics() {
        let ds = dataset();
        let m = Metrics::compute(&ds, &[0, 1, 2]).unwrap();
        assert_eq!(m.price_text(), "$200,000");
        assert_eq!(m.income_text(), "$3.33");
        assert_eq!(m.age_text().as_deref(), Some("25.5 years"));
        assert_eq!(Metrics::compute(&ds, &[]), None);
    }

    #[test]
    fn test_metrics_without_age_column() {
        let mut ds = dataset();
        ds.columns.retain(|c| *c != Column::HousingMedianAge);
        let m = Metrics::compute(&ds, &[0]).unwrap();
        assert_eq!(m.age_text(), None);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(206855.8), "206,856");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(-45000.0), "-45,000");
    }

    #[test]
    fn test_sample_columns_follow_schema() {
        let ds = dataset();
        assert_eq!(
            sample_columns(&ds),
            vec![
                Column::MedianIncome,
                Column::MedianHouseValue,
                Column::HousingMedianAge,
                Column::OceanProximity,
                Column::Longitude,
                Column::Latitude,
            ]
        );
        let narrow = HousingDataset::new(vec![], Column::REQUIRED.to_vec());
        assert_eq!(sample_columns(&narrow).len(), 4);

        let indices: Vec<usize> = (0..25).collect();
        assert_eq!(sample_rows(&indices, 10).len(), 10);
        assert_eq!(sample_rows(&indices[..3], 10), &[0, 1, 2]);
    }

    #[test]
    fn test_histogram_thirty_bins() {
        let ds = crate::data::synthetic::generate(42, 1000);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let h = Histogram::of_prices(&ds, &indices, 30).unwrap();
        assert_eq!(h.counts.len(), 30);
        assert_eq!(h.edges.len(), 31);
        assert_eq!(h.counts.iter().sum::<usize>(), 1000);
        assert_eq!(h.bars().count(), 30);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let h = Histogram::compute([0.0, 5.0, 10.0], 2).unwrap();
        assert_eq!(h.edges, vec![0.0, 5.0, 10.0]);
        assert_eq!(h.counts, vec![1, 2]);
        assert_eq!(h.bin_width(), 5.0);
    }

    #[test]
    fn test_histogram_degenerate_and_empty() {
        let h = Histogram::compute([7.0, 7.0], 4).unwrap();
        assert_eq!(h.edges.first(), Some(&6.5));
        assert_eq!(h.edges.last(), Some(&7.5));
        assert_eq!(h.counts.iter().sum::<usize>(), 2);
        assert_eq!(Histogram::compute(std::iter::empty(), 30), None);
    }

    #[test]
    fn test_data_info() {
        let info = DataInfo::of(&dataset());
        assert_eq!(info.shape, (3, 10));
        assert_eq!(info.columns[0], "longitude");
        assert_eq!(info.dtypes[2], ("housing_median_age", "int64"));
        assert_eq!(info.dtypes[9], ("ocean_proximity", "object"));
    }
}
