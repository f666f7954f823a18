//! Pairing of class labels with model outputs for display.

use std::cmp::Ordering;

/// Probability assigned to one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScore {
    pub class_name: String,
    pub probability: f32,
}

/// Class scores in model output order.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub scores: Vec<ClassScore>,
}

impl Prediction {
    /// Zip labels with probabilities positionally; surplus entries on either
    /// side are dropped.
    pub fn new<S: AsRef<str>>(class_names: &[S], probabilities: &[f32]) -> Self {
        let scores = class_names
            .iter()
            .zip(probabilities)
            .map(|(name, probability)| ClassScore {
                class_name: name.as_ref().to_string(),
                probability: *probability,
            })
            .collect();
        Self { scores }
    }

    /// One `<class name>: <probability>` line per class.
    pub fn lines(&self) -> Vec<String> {
        self.scores
            .iter()
            .map(|score| format!("{}: {}", score.class_name, score.probability))
            .collect()
    }

    /// Highest-scoring class; NaN never wins.
    pub fn top(&self) -> Option<&ClassScore> {
        self.scores.iter().max_by(|a, b| compare_scores(a.probability, b.probability))
    }
}

fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
