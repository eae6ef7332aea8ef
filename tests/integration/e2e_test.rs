//! End-to-end integration tests

use arrow::array::{Float64Array, StringArray};
use chrono::NaiveDate;
use hist_vol::config::Config;
use hist_vol::feed::CsvPriceSource;
use hist_vol::model::VolatilityEstimator;
use hist_vol::pipeline::Pipeline;
use hist_vol::render::ParquetSink;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;

fn write_prices(dir: &std::path::Path, symbol: &str, closes: &[f64]) {
    // Oldest-first rows, as exported
    let mut csv = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    for (i, close) in closes.iter().enumerate() {
        let date = start + chrono::Duration::days(i as i64);
        csv.push_str(&format!(
            "{},{c},{c},{c},{c},{c},1000\n",
            date.format("%Y-%m-%d"),
            c = close
        ));
    }
    std::fs::write(dir.join(format!("{}.csv", symbol)), csv).unwrap();
}

#[test]
fn test_config_example_exists() {
    let config = Config::bundled().unwrap();
    assert_eq!(config.analysis.windows, vec![10, 30]);
    assert!(config.analysis.symbols.contains(&"BTC-USD".to_string()));
}

#[tokio::test]
async fn test_csv_to_parquet_pipeline() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let btc: Vec<f64> = (0..40).map(|i| 60000.0 + (i as f64 * 0.8).cos() * 900.0).collect();
    let flat = vec![1.0; 40];
    write_prices(data.path(), "BTC-USD", &btc);
    write_prices(data.path(), "USDT-USD", &flat);

    let pipeline = Pipeline::new(
        vec!["BTC-USD".to_string(), "USDT-USD".to_string(), "GONE-USD".to_string()],
        vec![10, 30],
        365,
        VolatilityEstimator::new(),
    );
    let source = CsvPriceSource::new(data.path());
    let path = out.path().join("volatility.parquet");
    let mut sink = ParquetSink::new(&path);
    let end = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();

    let summary = pipeline.run(&source, &mut sink, end).await.unwrap();
    assert_eq!(summary.curves_rendered, 4);
    assert_eq!(summary.skipped_symbols, vec!["GONE-USD".to_string()]);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();

    let mut rows = 0;
    for batch in reader {
        let batch = batch.unwrap();
        let symbols = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let vols = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        for i in 0..batch.num_rows() {
            if symbols.value(i) == "USDT-USD" {
                assert_eq!(vols.value(i), 0.0);
            } else {
                assert!(vols.value(i) > 0.0);
            }
        }
        rows += batch.num_rows();
    }
    // (40 - 10) + (40 - 30) per symbol
    assert_eq!(rows, 2 * (30 + 10));
}
