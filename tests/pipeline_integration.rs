//! End-to-end pipeline: raw export -> labeled dataset -> policy -> decision

use irrigate::infer::{run_inference, Decision, InferenceAdapter, NO_MODEL};
use irrigate::io::{load_policy, read_dataset};
use irrigate::label::{label_file, ColumnNames};
use irrigate::train::{run_training, TrainConfig, SMOKE_READING};
use irrigate::{Action, FeatureRow, SensorReading};
use std::fmt::Write as _;
use std::path::Path;
use tempfile::TempDir;

/// Raw export in the tomato dataset layout, covering every rule branch
fn write_raw_export(path: &Path) {
    let mut csv = String::from("Date, Temperature [_ C] ,Humidity [%], Soil moisture ,Pump\n");
    let mut day = 0;
    for temp in [18.0, 24.0, 29.0, 31.0, 34.0, 38.0] {
        for hum in [30.0, 42.0, 48.0, 52.0, 65.0, 80.0] {
            for soil in (200..=800).step_by(20) {
                day += 1;
                writeln!(csv, "d{day},{temp},{hum},{soil},").unwrap();
            }
        }
    }
    std::fs::write(path, csv).unwrap();
}

fn labeled_and_trained(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let raw = dir.path().join("tomato irrigation dataset.csv");
    let dataset = dir.path().join("dataset_chuan.csv");
    let model = dir.path().join("policy.json");
    write_raw_export(&raw);

    let summary = label_file(&raw, &dataset, &ColumnNames::default()).unwrap();
    assert!(summary.pump_on > 0 && summary.pump_off > 0);

    let report = run_training(&dataset, &model, &TrainConfig::default()).unwrap();
    assert!(report.accuracy() > 0.9, "accuracy {}", report.accuracy());
    (dataset, model)
}

#[test]
fn test_end_to_end_hot_dry_reading_pumps() {
    let dir = TempDir::new().unwrap();
    let (_, model) = labeled_and_trained(&dir);

    let decision = run_inference(&model, &["35", "40", "400"]);
    assert_eq!(decision, Decision::model(Action::On));
    assert_eq!(decision.to_json(), r#"{"action":1,"reason":"AI Model Decision"}"#);
}

#[test]
fn test_smoke_test_matches_adapter() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw.csv");
    let dataset = dir.path().join("dataset.csv");
    let model = dir.path().join("policy.yaml");
    write_raw_export(&raw);
    label_file(&raw, &dataset, &ColumnNames::default()).unwrap();

    let report = run_training(&dataset, &model, &TrainConfig::default()).unwrap();
    let smoke = report.smoke_test.unwrap();
    let adapter = InferenceAdapter::load(&model).unwrap();
    assert_eq!(adapter.decide(&SMOKE_READING).action, smoke.action);
}

#[test]
fn test_training_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let (dataset, _) = labeled_and_trained(&dir);
    let other = dir.path().join("policy_again.json");

    let a = run_training(&dataset, dir.path().join("a.json"), &TrainConfig::default()).unwrap();
    let b = run_training(&dataset, &other, &TrainConfig::default()).unwrap();
    assert_eq!(a.accuracy(), b.accuracy());
    assert_eq!(a.evaluation, b.evaluation);
    assert_eq!(
        load_policy(dir.path().join("a.json")).unwrap().forest,
        load_policy(&other).unwrap().forest
    );
}

#[test]
fn test_retraining_replaces_artifact() {
    let dir = TempDir::new().unwrap();
    let (dataset, model) = labeled_and_trained(&dir);

    let config = TrainConfig {
        params: irrigate::forest::ForestParams {
            n_trees: 7,
            ..Default::default()
        },
        ..Default::default()
    };
    run_training(&dataset, &model, &config).unwrap();
    assert_eq!(load_policy(&model).unwrap().forest.n_trees(), 7);
}

#[test]
fn test_labeled_dataset_layout() {
    let dir = TempDir::new().unwrap();
    let (dataset, _) = labeled_and_trained(&dir);
    let header = std::fs::read_to_string(&dataset).unwrap();
    assert!(header.starts_with("temp,hum,soil,Pump_Action\n"));
    assert_eq!(read_dataset(&dataset).unwrap().len(), 6 * 6 * 31);
}

#[test]
fn test_column_identity_through_policy() {
    let dir = TempDir::new().unwrap();
    let (_, model) = labeled_and_trained(&dir);
    let policy = load_policy(&model).unwrap();

    let reading = SensorReading::new(20.0, 70.0, 250.0);
    let named = reading.to_features();
    let reordered: FeatureRow = [("soil", 250.0), ("hum", 70.0), ("temp", 20.0)]
        .into_iter()
        .collect();
    assert_eq!(policy.predict(&named).unwrap(), policy.predict(&reordered).unwrap());
    assert_eq!(policy.predict(&named).unwrap(), Action::On);

    // hum and soil values exchanged: a valid query with a different answer
    let swapped: FeatureRow = [("temp", 20.0), ("hum", 250.0), ("soil", 70.0)]
        .into_iter()
        .collect();
    assert!(policy.predict(&swapped).is_ok());
    let wet = SensorReading::new(20.0, 250.0, 700.0).to_features();
    let wet_swapped: FeatureRow = [("temp", 20.0), ("hum", 700.0), ("soil", 250.0)]
        .into_iter()
        .collect();
    assert_ne!(policy.predict(&wet).unwrap(), policy.predict(&wet_swapped).unwrap());
}

#[test]
fn test_missing_model_is_fail_safe() {
    let dir = TempDir::new().unwrap();
    let decision = run_inference(dir.path().join("absent.json"), &["35", "40", "400"]);
    assert_eq!(decision.action, Action::Off);
    assert_eq!(decision.error.as_deref(), Some(NO_MODEL));
}

#[test]
fn test_controller_parses_adapter_output() {
    let dir = TempDir::new().unwrap();
    let (_, model) = labeled_and_trained(&dir);
    let printed = run_inference(&model, &["35", "40", "400"]).to_json();
    assert_eq!(Decision::from_output(&printed).action, Action::On);
    assert_eq!(Decision::from_output("Segmentation fault").action, Action::Off);
}
