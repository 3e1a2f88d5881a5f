//! Labeler: raw sensor rows to a labeled three-feature dataset
//!
//! The raw table is resolved to its temperature, humidity and soil columns,
//! every row is parsed and run through the pump rule, and the result is
//! written as `temp,hum,soil,Pump_Action`. Any malformed row aborts the whole
//! run before anything is written.

mod columns;
mod rule;

pub use columns::{normalize_header, resolve_columns, ColumnMap, ColumnNames};
pub use rule::{
    label_reading, matched_branch, RuleBranch, DRY_HUM, HOT_TEMP, SOIL_CRITICAL, SOIL_DRY_AIR,
    SOIL_HOT,
};

use crate::error::{Error, Result};
use crate::io::{write_dataset, RawTable};
use crate::reading::{class_balance, Dataset, LabeledSample, SensorReading};
use std::path::Path;

/// Outcome of a labeling run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary {
    /// Source header matched to each feature, in `temp, hum, soil` order
    pub source_columns: [String; 3],
    pub rows: usize,
    pub pump_off: usize,
    pub pump_on: usize,
    /// First rows of the labeled output
    pub preview: Vec<LabeledSample>,
}

impl LabelSummary {
    const PREVIEW_ROWS: usize = 5;

    fn new(table: &RawTable, map: ColumnMap, dataset: &[LabeledSample]) -> Self {
        let (pump_off, pump_on) = class_balance(dataset);
        let header = |i: usize| table.headers[i].trim().to_string();
        Self {
            source_columns: [header(map.temp), header(map.hum), header(map.soil)],
            rows: dataset.len(),
            pump_off,
            pump_on,
            preview: dataset.iter().take(Self::PREVIEW_ROWS).copied().collect(),
        }
    }
}

/// Label every row of a raw table.
///
/// # Errors
///
/// Returns [`Error::DataPreparation`] if the feature columns cannot be
/// resolved or any row has a missing, non-numeric or non-finite value.
pub fn label_table(table: &RawTable, names: &ColumnNames) -> Result<Dataset> {
    let map = resolve_columns(&table.headers, names)?;
    label_rows(table, map)
}

fn label_rows(table: &RawTable, map: ColumnMap) -> Result<Dataset> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let reading = parse_row(row, map, i + 1)?;
            Ok(LabeledSample::new(reading, label_reading(&reading)))
        })
        .collect()
}

fn parse_row(row: &[String], map: ColumnMap, line: usize) -> Result<SensorReading> {
    let field = |index: usize, feature: &str| -> Result<f64> {
        let cell = row.get(index).map(|c| c.trim()).unwrap_or_default();
        if cell.is_empty() {
            return Err(Error::DataPreparation(format!(
                "row {line}: missing value for '{feature}'"
            )));
        }
        let value = cell.parse::<f64>().map_err(|_| {
            Error::DataPreparation(format!(
                "row {line}: '{cell}' is not a number for '{feature}'"
            ))
        })?;
        // NaN and inf parse, but a dropout cell is a missing reading
        if !value.is_finite() {
            return Err(Error::DataPreparation(format!(
                "row {line}: '{cell}' is not a finite number for '{feature}'"
            )));
        }
        Ok(value)
    };

    Ok(SensorReading::new(
        field(map.temp, "temp")?,
        field(map.hum, "hum")?,
        field(map.soil, "soil")?,
    ))
}

/// Label a raw CSV file and write the labeled dataset.
///
/// The output is only touched once every row has been labeled.
pub fn label_file(
    raw: impl AsRef<Path>,
    output: impl AsRef<Path>,
    names: &ColumnNames,
) -> Result<LabelSummary> {
    let table = RawTable::read(raw)?;
    let map = resolve_columns(&table.headers, names)?;
    let dataset = label_rows(&table, map)?;
    write_dataset(output, &dataset)?;
    Ok(LabelSummary::new(&table, map, &dataset))
}
