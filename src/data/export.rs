use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::error::{DataError, Result};
use super::model::{CellValue, Column, ColumnKind, HousingDataset, Record};

/// Text of one CSV cell: shortest round-trip floats, empty for missing.
fn csv_field(record: &Record, column: Column) -> String {
    match record.value(column) {
        CellValue::Float(v) => v.to_string(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Text(s) => s.to_string(),
        CellValue::Missing => String::new(),
    }
}

/// Write the records at `indices` with the dataset's column header.
pub fn write_csv(path: &Path, dataset: &HousingDataset, indices: &[usize]) -> Result<()> {
    let file = File::create(path).map_err(|e| DataError::from_io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(dataset.column_names())?;
    for record in indices.iter().filter_map(|&i| dataset.records.get(i)) {
        writer.write_record(dataset.columns.iter().map(|&c| csv_field(record, c)))?;
    }
    writer.flush().map_err(|e| DataError::from_io(path, e))?;
    Ok(())
}

/// Build one Arrow record batch holding the whole dataset.
pub fn to_record_batch(dataset: &HousingDataset) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(dataset.columns.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(dataset.columns.len());

    for &column in &dataset.columns {
        let values = dataset.records.iter().map(|r| r.value(column));
        let (data_type, array): (DataType, ArrayRef) = match column.kind() {
            ColumnKind::Float => (
                DataType::Float64,
                Arc::new(Float64Array::from(
                    values
                        .map(|v| match v {
                            CellValue::Float(f) => Some(f),
                            _ => None,
                        })
                        .collect::<Vec<_>>(),
                )),
            ),
            ColumnKind::Integer => (
                DataType::Int64,
                Arc::new(Int64Array::from(
                    values
                        .map(|v| match v {
                            CellValue::Integer(i) => Some(i64::from(i)),
                            _ => None,
                        })
                        .collect::<Vec<_>>(),
                )),
            ),
            ColumnKind::Category => (
                DataType::Utf8,
                Arc::new(StringArray::from(
                    values
                        .map(|v| match v {
                            CellValue::Text(s) => Some(s),
                            _ => None,
                        })
                        .collect::<Vec<_>>(),
                )),
            ),
        };
        fields.push(Field::new(column.name(), data_type, !column.is_required()));
        arrays.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Write the whole dataset as a single-batch Parquet file.
pub fn write_parquet(path: &Path, dataset: &HousingDataset) -> Result<()> {
    let batch = to_record_batch(dataset)?;
    let file = File::create(path).map_err(|e| DataError::from_io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
