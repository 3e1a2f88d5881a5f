//! Classification metrics for policy evaluation
//!
//! Provides:
//! - Confusion matrix computation
//! - Per-class precision, recall, F1
//! - Macro and weighted averaging
//! - sklearn-style classification reports

use serde::Serialize;
use std::fmt;

/// Averaging strategy across classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Unweighted mean over classes
    Macro,
    /// Mean weighted by support (number of true instances per class)
    Weighted,
}

/// Confusion matrix for a fixed set of classes
///
/// Element [i][j] counts samples with true label i predicted as j
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Create an empty confusion matrix
    pub fn new(n_classes: usize) -> Self {
        Self {
            matrix: vec![vec![0; n_classes]; n_classes],
            n_classes,
        }
    }

    /// Create from predictions and ground truth
    ///
    /// Labels at or above `n_classes` are ignored.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        debug_assert_eq!(y_pred.len(), y_true.len());
        let mut cm = Self::new(n_classes);
        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            if pred < n_classes && truth < n_classes {
                cm.matrix[truth][pred] += 1;
            }
        }
        cm
    }

    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Get element at [true_label][predicted_label]
    pub fn get(&self, true_label: usize, predicted_label: usize) -> usize {
        self.matrix[true_label][predicted_label]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as `class` but labeled otherwise
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    /// Labeled `class` but predicted otherwise
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum()
    }

    /// Number of true instances of `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for j in 0..self.n_classes {
            write!(f, "{:>8}", format!("pred {j}"))?;
        }
        writeln!(f)?;
        for (i, row) in self.matrix.iter().enumerate() {
            write!(f, "{:>8}", format!("true {i}"))?;
            for count in row {
                write!(f, "{count:>8}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Precision, recall, F1 and support for one class or one average
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus accuracy and averages on an evaluation set
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    /// Build a report for classes `0..labels.len()`
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], labels: &[&str]) -> Self {
        let cm = ConfusionMatrix::from_predictions(y_pred, y_true, labels.len());

        let classes: Vec<ClassMetrics> = labels
            .iter()
            .enumerate()
            .map(|(class, label)| {
                let tp = cm.true_positives(class) as f64;
                let fp = cm.false_positives(class) as f64;
                let fn_ = cm.false_negatives(class) as f64;

                let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
                let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: (*label).to_string(),
                    precision,
                    recall,
                    f1,
                    support: cm.support(class),
                }
            })
            .collect();

        let macro_avg = average(&classes, Average::Macro);
        let weighted_avg = average(&classes, Average::Weighted);

        Self {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
            confusion: cm,
        }
    }

    /// Total number of evaluated samples
    pub fn support(&self) -> usize {
        self.confusion.total()
    }

    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }
}

fn average(classes: &[ClassMetrics], strategy: Average) -> ClassMetrics {
    let total_support: usize = classes.iter().map(|c| c.support).sum();
    let weights: Vec<f64> = match strategy {
        Average::Macro => vec![1.0 / classes.len().max(1) as f64; classes.len()],
        Average::Weighted if total_support == 0 => vec![0.0; classes.len()],
        Average::Weighted => classes
            .iter()
            .map(|c| c.support as f64 / total_support as f64)
            .collect(),
    };
    let weighted = |metric: fn(&ClassMetrics) -> f64| -> f64 {
        classes.iter().zip(&weights).map(|(c, w)| metric(c) * w).sum()
    };

    ClassMetrics {
        label: match strategy {
            Average::Macro => "macro avg".to_string(),
            Average::Weighted => "weighted avg".to_string(),
        },
        precision: weighted(|c| c.precision),
        recall: weighted(|c| c.recall),
        f1: weighted(|c| c.f1),
        support: total_support,
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for avg in [&self.macro_avg, &self.weighted_avg] {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                avg.label, avg.precision, avg.recall, avg.f1, avg.support
            )?;
        }
        Ok(())
    }
}
