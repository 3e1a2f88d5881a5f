//! Raw column resolution
//!
//! Source datasets name their columns loosely (`Temperature [_ C]`,
//! `Humidity [%]`, `Soil moisture`). Headers are normalized to lowercase
//! alphanumerics and matched against known aliases first, then by prefix.

use crate::error::{Error, Result};
use crate::reading::{HUM, SOIL, TEMP};
use serde::{Deserialize, Serialize};

const TEMP_ALIASES: &[&str] = &["temp", "temperature", "temperaturec", "airtemperature"];
const HUM_ALIASES: &[&str] = &["hum", "humid", "humidity", "relativehumidity"];
const SOIL_ALIASES: &[&str] = &["soil", "soilmoisture", "moisture"];

/// Explicit source column names, overriding alias detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
}

/// Position of each feature column in the raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub temp: usize,
    pub hum: usize,
    pub soil: usize,
}

/// Lowercase a header and drop whitespace, units and punctuation.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Locate the temp, hum and soil columns among `headers`.
pub fn resolve_columns(headers: &[String], names: &ColumnNames) -> Result<ColumnMap> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    Ok(ColumnMap {
        temp: locate(TEMP, names.temp.as_deref(), TEMP_ALIASES, &normalized, headers)?,
        hum: locate(HUM, names.hum.as_deref(), HUM_ALIASES, &normalized, headers)?,
        soil: locate(SOIL, names.soil.as_deref(), SOIL_ALIASES, &normalized, headers)?,
    })
}

fn locate(
    feature: &str,
    explicit: Option<&str>,
    aliases: &[&str],
    normalized: &[String],
    headers: &[String],
) -> Result<usize> {
    if let Some(name) = explicit {
        let wanted = normalize_header(name);
        return normalized.iter().position(|h| *h == wanted).ok_or_else(|| {
            Error::DataPreparation(format!(
                "column '{name}' configured for '{feature}' not found; available columns: {}",
                headers.join(", ")
            ))
        });
    }

    let exact: Vec<usize> = matching(normalized, |h| aliases.contains(&h));
    let candidates = if exact.is_empty() {
        matching(normalized, |h| h.starts_with(aliases[0]))
    } else {
        exact
    };

    match candidates.as_slice() {
        [index] => Ok(*index),
        [] => Err(Error::DataPreparation(format!(
            "no column found for '{feature}'; available columns: {}",
            headers.join(", ")
        ))),
        many => Err(Error::DataPreparation(format!(
            "ambiguous columns for '{feature}': {}",
            many.iter()
                .map(|&i| headers[i].trim())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn matching(normalized: &[String], predicate: impl Fn(&str) -> bool) -> Vec<usize> {
    normalized
        .iter()
        .enumerate()
        .filter(|(_, h)| predicate(h.as_str()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Temperature [_ C] "), "temperaturec");
        assert_eq!(normalize_header("Humidity [%]"), "humidity");
        assert_eq!(normalize_header("Soil moisture"), "soilmoisture");
    }

    #[test]
    fn test_resolve_tomato_dataset_headers() {
        let h = headers(&["Date", " Temperature [_ C]", "Humidity [%] ", "Soil moisture", "Pump"]);
        let map = resolve_columns(&h, &ColumnNames::default()).unwrap();
        assert_eq!(map, ColumnMap { temp: 1, hum: 2, soil: 3 });
    }

    #[test]
    fn test_resolve_canonical_headers_any_order() {
        let h = headers(&["SOIL", "hum", "Temp"]);
        let map = resolve_columns(&h, &ColumnNames::default()).unwrap();
        assert_eq!(map, ColumnMap { temp: 2, hum: 1, soil: 0 });
    }

    #[test]
    fn test_exact_alias_beats_prefix() {
        // "soiltemperature" would match the soil prefix; the exact alias wins
        let h = headers(&["Soil temperature", "Soil moisture", "temp", "hum"]);
        let map = resolve_columns(&h, &ColumnNames::default()).unwrap();
        assert_eq!(map.soil, 1);
    }

    #[test]
    fn test_prefix_fallback() {
        let h = headers(&["temp_air_c", "humidity_rel", "soil_raw_adc"]);
        let map = resolve_columns(&h, &ColumnNames::default()).unwrap();
        assert_eq!(map, ColumnMap { temp: 0, hum: 1, soil: 2 });
    }

    #[test]
    fn test_ambiguous_prefix_is_error() {
        let h = headers(&["temp", "hum", "soil_a", "soil_b"]);
        let err = resolve_columns(&h, &ColumnNames::default()).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_missing_column_is_error() {
        let h = headers(&["temp", "hum"]);
        let err = resolve_columns(&h, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, Error::DataPreparation(_)));
        assert!(err.to_string().contains("soil"));
    }

    #[test]
    fn test_explicit_names_override_detection() {
        let h = headers(&["t1", "h1", "probe_a", "probe_b"]);
        let names = ColumnNames {
            temp: Some("t1".into()),
            hum: Some("H1".into()),
            soil: Some(" probe_b ".into()),
        };
        let map = resolve_columns(&h, &names).unwrap();
        assert_eq!(map, ColumnMap { temp: 0, hum: 1, soil: 3 });
    }

    #[test]
    fn test_explicit_name_not_found() {
        let h = headers(&["temp", "hum", "soil"]);
        let names = ColumnNames {
            soil: Some("moisture_probe".into()),
            ..ColumnNames::default()
        };
        let err = resolve_columns(&h, &names).unwrap_err();
        assert!(err.to_string().contains("moisture_probe"));
    }
}
