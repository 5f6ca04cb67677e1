use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::{count, Column, HousingDataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a housing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the housing column names
/// * `.json`    – `[{ "longitude": ..., "latitude": ..., ... }, ...]`
/// * `.parquet` – flat numeric / string columns named like the CSV header
///
/// Only the four required columns are checked; the rest are optional.
pub fn load_file(path: &Path) -> Result<HousingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| DataError::from_io(path, e))
}

/// Known columns among `names`, in the order given, without duplicates.
fn known_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<Column>> {
    let mut columns = Vec::new();
    for name in names {
        match Column::from_name(name) {
            Some(c) if !columns.contains(&c) => columns.push(c),
            Some(_) => {}
            None => log::debug!("ignoring unknown column '{name}'"),
        }
    }
    if let Some(missing) = Column::REQUIRED.iter().find(|c| !columns.contains(c)) {
        return Err(DataError::MissingColumn(missing.name()));
    }
    Ok(columns)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Blank cells in optional columns become `None`; count columns accept
/// integral floats such as `880.0`.
fn load_csv(path: &Path) -> Result<HousingDataset> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let columns = known_columns(reader.headers()?.iter())?;

    let records = reader
        .deserialize::<Record>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(HousingDataset::new(records, columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "longitude": -122.23, "latitude": 37.88, "median_income": 8.3252,
///     "median_house_value": 452600.0, "ocean_proximity": "NEAR BAY" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<HousingDataset> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => {
            return Err(DataError::InvalidValue {
                row: 0,
                column: "<root>",
                message: "expected a top-level JSON array".to_string(),
            })
        }
    };

    // Column order follows the schema; JSON object key order is not kept.
    let present: Vec<&str> = Column::ALL
        .iter()
        .map(|c| c.name())
        .filter(|name| {
            rows.iter()
                .any(|row| row.as_object().is_some_and(|o| o.contains_key(*name)))
        })
        .collect();
    let columns = known_columns(present)?;

    let records = rows
        .into_iter()
        .map(serde_json::from_value::<Record>)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(HousingDataset::new(records, columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of housing rows.
///
/// Numeric columns may be Float64, Float32, Int64 or Int32; `ocean_proximity`
/// must be Utf8 or LargeUtf8. Works with files written by **Pandas**
/// (`df.to_parquet()`), **Polars** and the `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<HousingDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let columns = known_columns(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let column = |c: Column| schema.index_of(c.name()).ok().map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let abs_row = records.len();
            let float = |c: Column| -> Result<Option<f64>> {
                column(c).map_or(Ok(None), |col| extract_f64(col, row, abs_row, c))
            };
            let required = |c: Column| -> Result<f64> {
                float(c)?.ok_or_else(|| DataError::InvalidValue {
                    row: abs_row,
                    column: c.name(),
                    message: "null value in required column".to_string(),
                })
            };
            let counted = |c: Column| -> Result<Option<u32>> {
                float(c)?
                    .map(|v| {
                        count::from_f64(v).map_err(|message| DataError::InvalidValue {
                            row: abs_row,
                            column: c.name(),
                            message,
                        })
                    })
                    .transpose()
            };

            let ocean_proximity = match column(Column::OceanProximity) {
                Some(col) => extract_string(col, row, abs_row)?,
                None => None,
            };

            records.push(Record {
                longitude: required(Column::Longitude)?,
                latitude: required(Column::Latitude)?,
                housing_median_age: counted(Column::HousingMedianAge)?,
                total_rooms: counted(Column::TotalRooms)?,
                total_bedrooms: counted(Column::TotalBedrooms)?,
                population: counted(Column::Population)?,
                households: counted(Column::Households)?,
                median_income: required(Column::MedianIncome)?,
                median_house_value: required(Column::MedianHouseValue)?,
                ocean_proximity,
            });
        }
    }

    Ok(HousingDataset::new(records, columns))
}

// -- Parquet / Arrow helpers --

/// Extract a numeric cell as `f64`; `None` for nulls.
fn extract_f64(col: &Arc<dyn Array>, row: usize, abs_row: usize, c: Column) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => f64::from(col.as_primitive::<Float32Type>().value(row)),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => f64::from(col.as_primitive::<Int32Type>().value(row)),
        other => {
            return Err(DataError::InvalidValue {
                row: abs_row,
                column: c.name(),
                message: format!("expected a numeric column, got {other:?}"),
            })
        }
    };
    Ok(Some(v))
}

fn extract_string(col: &Arc<dyn Array>, row: usize, abs_row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => Err(DataError::InvalidValue {
            row: abs_row,
            column: Column::OceanProximity.name(),
            message: format!("expected a string column, got {other:?}"),
        }),
    }
}
