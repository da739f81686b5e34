//! Export synthetic datasets to CSV.
//!
//! The output is a plain header + rows file that `load_table` (and any
//! spreadsheet) reads back without options.

use std::path::Path;

use crate::data::SampleData;
use crate::error::AppError;

/// Write a sample dataset to a CSV file: feature columns first, then `label`.
pub fn write_sample_csv(path: &Path, sample: &SampleData) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;

    let mut header: Vec<&str> = sample.feature_names.iter().map(String::as_str).collect();
    header.push(&sample.label_name);
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    for (features, label) in sample.features.iter().zip(&sample.labels) {
        let mut record: Vec<String> = features.iter().map(|v| format!("{v:.6}")).collect();
        record.push(label.to_string());
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;

    Ok(())
}
