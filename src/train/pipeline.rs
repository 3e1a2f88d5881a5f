//! Split, fit, evaluate and persist a policy

use super::report::{SmokeTest, TrainingReport};
use crate::error::{Error, Result};
use crate::eval::ClassificationReport;
use crate::forest::{train_test_split, ForestParams, RandomForest};
use crate::io::{load_policy, read_dataset, save_policy, PolicyFormat, SaveConfig};
use crate::policy::Policy;
use crate::reading::{class_balance, LabeledSample, SensorReading};
use std::path::Path;
use std::time::Instant;

/// Reading classified by every freshly persisted policy.
pub const SMOKE_READING: SensorReading = SensorReading::new(35.0, 40.0, 400.0);

/// Class labels used in evaluation reports.
const CLASS_LABELS: [&str; 2] = ["0", "1"];

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub params: ForestParams,
    /// Share of the dataset held out for evaluation
    pub test_fraction: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            params: ForestParams::default(),
            test_fraction: 0.2,
        }
    }
}

/// Fits and evaluates policies on labeled datasets
///
/// # Example
///
/// ```no_run
/// use irrigate::io::read_dataset;
/// use irrigate::train::{TrainConfig, Trainer};
///
/// let dataset = read_dataset("dataset.csv").unwrap();
/// let (policy, report) = Trainer::new(TrainConfig::default()).fit(&dataset).unwrap();
/// println!("accuracy {:.3}", report.accuracy());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Split the dataset, fit a forest on the training partition and
    /// evaluate it on the rest.
    ///
    /// The policy is returned whatever its accuracy.
    pub fn fit(&self, dataset: &[LabeledSample]) -> Result<(Policy, TrainingReport)> {
        let start = Instant::now();
        if let Some(i) = dataset.iter().position(|s| !s.reading().is_finite()) {
            return Err(Error::TrainingInput(format!(
                "sample {} has a non-finite feature ({})",
                i + 1,
                dataset[i].reading()
            )));
        }
        let (train, test) =
            train_test_split(dataset, self.config.test_fraction, self.config.params.seed)?;

        let (x_train, y_train) = to_matrix(&train);
        let forest = RandomForest::fit(&x_train, &y_train, &self.config.params)?;

        let (x_test, y_test) = to_matrix(&test);
        let y_pred = forest.predict_batch(&x_test);
        let evaluation = ClassificationReport::from_predictions(&y_pred, &y_test, &CLASS_LABELS);

        let policy =
            Policy::new(forest, self.config.params, train.len()).with_accuracy(evaluation.accuracy);

        let report = TrainingReport {
            train_size: train.len(),
            test_size: test.len(),
            eval_balance: class_balance(&test),
            evaluation,
            model_path: None,
            smoke_test: None,
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        Ok((policy, report))
    }
}

/// Features in `temp, hum, soil` order, matching [`Policy::new`].
fn to_matrix(samples: &[LabeledSample]) -> (Vec<Vec<f64>>, Vec<usize>) {
    samples
        .iter()
        .map(|s| (vec![s.temp, s.hum, s.soil], s.action.class()))
        .unzip()
}

/// Train on the dataset at `dataset_path` and persist the policy to
/// `model_path`, replacing any previous artifact.
///
/// The saved artifact is reloaded and queried with [`SMOKE_READING`].
///
/// # Errors
///
/// Returns [`Error::TrainingInput`] if the dataset cannot be read or split,
/// and [`Error::ConfigError`] if `model_path` has no supported extension.
pub fn run_training(
    dataset_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    config: &TrainConfig,
) -> Result<TrainingReport> {
    let model_path = model_path.as_ref();
    let format = model_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(PolicyFormat::from_extension)
        .ok_or_else(|| {
            Error::ConfigError(format!(
                "model path {} must end in .json, .yaml or .yml",
                model_path.display()
            ))
        })?;

    let dataset = read_dataset(dataset_path)?;
    let (policy, mut report) = Trainer::new(*config).fit(&dataset)?;

    save_policy(&policy, model_path, &SaveConfig::new(format).with_pretty(true))?;
    report.model_path = Some(model_path.to_path_buf());

    let persisted = load_policy(model_path)?;
    report.smoke_test = Some(SmokeTest {
        reading: SMOKE_READING,
        action: persisted.predict_reading(&SMOKE_READING)?,
    });

    Ok(report)
}
