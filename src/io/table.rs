//! CSV tables: raw sensor exports and labeled datasets

use crate::error::{Error, Result};
use crate::reading::{Dataset, LabeledSample, ACTION_COLUMN, FEATURE_NAMES};
use std::io::Read;
use std::path::Path;

/// A raw sensor table with untyped cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse a CSV export. Rows may be shorter than the header.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| Error::DataPreparation(format!("Failed to read CSV header: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let rows = csv
            .records()
            .enumerate()
            .map(|(i, record)| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| {
                        Error::DataPreparation(format!("Failed to read row {}: {e}", i + 1))
                    })
            })
            .collect::<Result<Vec<Vec<String>>>>()?;

        Ok(Self { headers, rows })
    }

    /// Read a raw sensor CSV file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::DataPreparation(format!("Failed to open raw dataset {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }
}

/// Read a labeled dataset with columns `temp,hum,soil,Pump_Action`.
///
/// # Errors
///
/// Returns [`Error::TrainingInput`] if the file is missing, lacks a column
/// or holds a value that is not a finite number (or not 0/1 for the action).
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::TrainingInput(format!(
            "cannot find data {}",
            path.display()
        )));
    }
    let file = std::fs::File::open(path).map_err(|e| {
        Error::TrainingInput(format!("Failed to open dataset {}: {e}", path.display()))
    })?;
    dataset_from_reader(file)
}

/// Parse a labeled dataset from any CSV source.
pub fn dataset_from_reader(reader: impl Read) -> Result<Dataset> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| Error::TrainingInput(format!("Failed to read dataset header: {e}")))?
        .clone();
    for required in FEATURE_NAMES.iter().chain(std::iter::once(&ACTION_COLUMN)) {
        if !headers.iter().any(|h| h == *required) {
            return Err(Error::TrainingInput(format!(
                "dataset is missing column '{required}'"
            )));
        }
    }

    csv.deserialize::<LabeledSample>()
        .enumerate()
        .map(|(i, row)| {
            let sample = row.map_err(|e| {
                Error::TrainingInput(format!("Invalid dataset row {}: {e}", i + 1))
            })?;
            if !sample.reading().is_finite() {
                return Err(Error::TrainingInput(format!(
                    "Invalid dataset row {}: feature values must be finite ({})",
                    i + 1,
                    sample.reading()
                )));
            }
            Ok(sample)
        })
        .collect()
}

/// Write a labeled dataset, replacing any existing file.
pub fn write_dataset(path: impl AsRef<Path>, dataset: &[LabeledSample]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        Error::DataPreparation(format!("Failed to create {}: {e}", path.display()))
    })?;
    if dataset.is_empty() {
        let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
        header.push(ACTION_COLUMN);
        writer
            .write_record(&header)
            .map_err(|e| Error::DataPreparation(format!("Failed to write header: {e}")))?;
    }
    for sample in dataset {
        writer
            .serialize(sample)
            .map_err(|e| Error::DataPreparation(format!("Failed to write row: {e}")))?;
    }
    writer.flush()?;
    Ok(())
}
