//! Label command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{LabelArgs, PipelineConfig};
use crate::label::{label_file, LabelSummary};

pub fn run_label(args: LabelArgs, config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    let raw = args
        .raw
        .or(config.paths.raw_path)
        .ok_or("No raw dataset given (pass RAW or set paths.raw_path)")?;
    let output = args.output.unwrap_or(config.paths.dataset_path);

    log(
        level,
        LogLevel::Normal,
        &format!("Labeling {}", raw.display()),
    );

    let summary = label_file(&raw, &output, &config.labeling.columns)
        .map_err(|e| format!("Labeling error: {e}"))?;

    log(level, LogLevel::Normal, &format_summary(&summary));
    log(level, LogLevel::Verbose, &format_preview(&summary));
    log(
        level,
        LogLevel::Normal,
        &format!("Finish, saved: {}", output.display()),
    );
    Ok(())
}

fn format_summary(summary: &LabelSummary) -> String {
    let [temp, hum, soil] = &summary.source_columns;
    format!(
        "  Columns: temp <- '{temp}', hum <- '{hum}', soil <- '{soil}'\n  Rows: {}\n  Pump: {}  Not Pump: {}",
        summary.rows, summary.pump_on, summary.pump_off
    )
}

fn format_preview(summary: &LabelSummary) -> String {
    let mut lines = vec![format!(
        "  {:>8} {:>8} {:>8} {:>12}",
        "temp", "hum", "soil", "Pump_Action"
    )];
    lines.extend(summary.preview.iter().map(|s| {
        format!(
            "  {:>8} {:>8} {:>8} {:>12}",
            s.temp, s.hum, s.soil, s.action
        )
    }));
    lines.join("\n")
}
