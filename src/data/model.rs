use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column – the fixed housing schema
// ---------------------------------------------------------------------------

/// Storage class of a column, reported with pandas-style dtype names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Integer,
    Category,
}

impl ColumnKind {
    pub fn dtype(self) -> &'static str {
        match self {
            ColumnKind::Float => "float64",
            ColumnKind::Integer => "int64",
            ColumnKind::Category => "object",
        }
    }
}

/// One column of the housing schema, in canonical file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Longitude,
    Latitude,
    HousingMedianAge,
    TotalRooms,
    TotalBedrooms,
    Population,
    Households,
    MedianIncome,
    MedianHouseValue,
    OceanProximity,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Longitude,
        Column::Latitude,
        Column::HousingMedianAge,
        Column::TotalRooms,
        Column::TotalBedrooms,
        Column::Population,
        Column::Households,
        Column::MedianIncome,
        Column::MedianHouseValue,
        Column::OceanProximity,
    ];

    /// Columns every loaded file must carry.
    pub const REQUIRED: [Column; 4] = [
        Column::Longitude,
        Column::Latitude,
        Column::MedianIncome,
        Column::MedianHouseValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Longitude => "longitude",
            Column::Latitude => "latitude",
            Column::HousingMedianAge => "housing_median_age",
            Column::TotalRooms => "total_rooms",
            Column::TotalBedrooms => "total_bedrooms",
            Column::Population => "population",
            Column::Households => "households",
            Column::MedianIncome => "median_income",
            Column::MedianHouseValue => "median_house_value",
            Column::OceanProximity => "ocean_proximity",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Longitude
            | Column::Latitude
            | Column::MedianIncome
            | Column::MedianHouseValue => ColumnKind::Float,
            Column::HousingMedianAge
            | Column::TotalRooms
            | Column::TotalBedrooms
            | Column::Population
            | Column::Households => ColumnKind::Integer,
            Column::OceanProximity => ColumnKind::Category,
        }
    }

    pub fn is_required(self) -> bool {
        Column::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a borrowed view of one cell, for tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Float(f64),
    Integer(u32),
    Text(&'a str),
    Missing,
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Float(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "NaN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the housing table
// ---------------------------------------------------------------------------

/// One housing observation (a census block group).
///
/// Optional fields are empty cells or columns absent from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub housing_median_age: Option<u32>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_rooms: Option<u32>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub population: Option<u32>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub households: Option<u32>,
    /// Tens of thousands of USD.
    pub median_income: f64,
    /// USD.
    pub median_house_value: f64,
    #[serde(default)]
    pub ocean_proximity: Option<String>,
}

impl Record {
    pub fn value(&self, column: Column) -> CellValue<'_> {
        let count = |v: Option<u32>| v.map_or(CellValue::Missing, CellValue::Integer);
        match column {
            Column::Longitude => CellValue::Float(self.longitude),
            Column::Latitude => CellValue::Float(self.latitude),
            Column::HousingMedianAge => count(self.housing_median_age),
            Column::TotalRooms => count(self.total_rooms),
            Column::TotalBedrooms => count(self.total_bedrooms),
            Column::Population => count(self.population),
            Column::Households => count(self.households),
            Column::MedianIncome => CellValue::Float(self.median_income),
            Column::MedianHouseValue => CellValue::Float(self.median_house_value),
            Column::OceanProximity => self
                .ocean_proximity
                .as_deref()
                .map_or(CellValue::Missing, CellValue::Text),
        }
    }
}

/// Count columns are stored as floats (`880.0`) in the public dataset.
pub mod count {
    use serde::{Deserialize, Deserializer};

    /// Convert a float cell to a count, rejecting fractions, negatives and NaN.
    pub fn from_f64(v: f64) -> Result<u32, String> {
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
            return Err(format!("{v} is not a non-negative integer"));
        }
        Ok(v as u32)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<f64>::deserialize(deserializer)? {
            Some(v) => from_f64(v).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// HousingDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An immutable, ordered collection of records plus schema facts.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingDataset {
    pub records: Vec<Record>,
    /// Columns present in the source, in source order.
    pub columns: Vec<Column>,
    /// Distinct `ocean_proximity` labels in order of first appearance.
    pub categories: Vec<String>,
}

impl HousingDataset {
    pub fn new(records: Vec<Record>, columns: Vec<Column>) -> Self {
        let mut seen = BTreeSet::new();
        let mut categories = Vec::new();
        if columns.contains(&Column::OceanProximity) {
            for label in records.iter().filter_map(|r| r.ocean_proximity.as_deref()) {
                if seen.insert(label) {
                    categories.push(label.to_string());
                }
            }
        }
        HousingDataset {
            records,
            columns,
            categories,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.columns.len())
    }

    /// Sub-dataset with the records at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> HousingDataset {
        let records = indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect();
        HousingDataset::new(records, self.columns.clone())
    }

    /// Smallest and largest `median_house_value`, ignoring NaN.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| r.median_house_value)
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
pub(crate) fn record(income: f64, price: f64, category: &str) -> Record {
    Record {
        longitude: -120.0,
        latitude: 36.0,
        housing_median_age: Some(20),
        total_rooms: Some(1000),
        total_bedrooms: Some(200),
        population: Some(500),
        households: Some(180),
        median_income: income,
        median_house_value: price,
        ocean_proximity: Some(category.to_string()),
    }
}
