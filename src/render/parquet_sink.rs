//! Parquet curve output

use super::RenderSink;
use crate::series::VolatilityCurve;
use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

/// Volatility curve schema fields
pub fn curve_schema() -> Schema {
    Schema::new(vec![
        Field::new("symbol", DataType::Utf8, false),
        Field::new("window", DataType::UInt32, false),
        Field::new("date", DataType::Date32, false),
        Field::new("volatility", DataType::Float64, false),
    ])
}

/// Writes every drawn curve to a single Parquet file
pub struct ParquetSink {
    path: PathBuf,
    curves: Vec<VolatilityCurve>,
}

impl ParquetSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            curves: Vec::new(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn build_batch(&self) -> anyhow::Result<RecordBatch> {
        let rows: usize = self.curves.iter().map(|c| c.points.len()).sum();

        let mut symbols = Vec::with_capacity(rows);
        let mut windows = Vec::with_capacity(rows);
        let mut dates = Vec::with_capacity(rows);
        let mut values = Vec::with_capacity(rows);

        for curve in &self.curves {
            let window = u32::try_from(curve.window)?;
            for (date, value) in &curve.points {
                symbols.push(curve.symbol.as_str());
                windows.push(window);
                dates.push(days_since_epoch(*date)?);
                values.push(*value);
            }
        }

        let batch = RecordBatch::try_new(
            Arc::new(curve_schema()),
            vec![
                Arc::new(StringArray::from(symbols)) as ArrayRef,
                Arc::new(UInt32Array::from(windows)) as ArrayRef,
                Arc::new(Date32Array::from(dates)) as ArrayRef,
                Arc::new(Float64Array::from(values)) as ArrayRef,
            ],
        )?;

        Ok(batch)
    }
}

impl RenderSink for ParquetSink {
    fn draw(&mut self, curve: &VolatilityCurve) -> anyhow::Result<()> {
        self.curves.push(curve.clone());
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let batch = self.build_batch()?;
        let file = File::create(&self.path)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        tracing::info!(path = ?self.path, rows = batch.num_rows(), "Wrote volatility curves to Parquet");

        Ok(())
    }
}

/// Arrow Date32 value for a calendar date
fn days_since_epoch(date: NaiveDate) -> anyhow::Result<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid epoch date"))?;
    Ok(i32::try_from((date - epoch).num_days())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    #[test]
    fn test_days_since_epoch() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 11).unwrap();
        assert_eq!(days_since_epoch(d).unwrap(), 10);
    }

    #[test]
    fn test_parquet_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vol.parquet");
        let mut sink = ParquetSink::new(&path);

        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        sink.draw(&VolatilityCurve {
            symbol: "BTC-USD".to_string(),
            window: 10,
            points: vec![(d(3), 0.61), (d(2), 0.58)],
        })
        .unwrap();
        sink.draw(&VolatilityCurve {
            symbol: "ETH-USD".to_string(),
            window: 30,
            points: vec![(d(3), 0.72)],
        })
        .unwrap();
        sink.finish().unwrap();

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();

        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 3);

        let batch = &batches[0];
        assert_eq!(batch.schema().field(2).data_type(), &DataType::Date32);
        let vols = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(vols.value(2), 0.72);
    }
}
