//! JSON scoring entry point for serving the classifier behind a request body.
//!
//! Requests carry either one packed row (`[5.1, 3.5, 1.4, 0.2]`) or a list of
//! rows; the response is `{"scores": [...]}` for the first row. Every row must
//! match the model's input width even though only the first one is scored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{ClassifierError, FlowerClassifier};

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Invalid scoring payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Scoring payload contains no rows")]
    EmptyBatch,
    #[error("Row {row} has {actual} values, model expects {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreRequest {
    Row(Vec<f64>),
    Batch(Vec<Vec<f64>>),
}

/// Scores of the first row in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub scores: Vec<f32>,
}

/// Parse a request body into packed `f32` rows.
pub fn parse_rows(raw: &str) -> Result<Vec<Vec<f32>>, ScoreError> {
    let rows = match serde_json::from_str::<ScoreRequest>(raw)? {
        ScoreRequest::Row(row) if row.is_empty() => Vec::new(),
        ScoreRequest::Row(row) => vec![row],
        ScoreRequest::Batch(rows) => rows,
    };
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|value| value as f32).collect())
        .collect())
}

/// Score the first row of `raw` and serialize the response document.
pub fn score_json(classifier: &FlowerClassifier, raw: &str) -> Result<String, ScoreError> {
    let response = score(classifier, raw)?;
    Ok(serde_json::to_string(&response)?)
}

pub fn score(classifier: &FlowerClassifier, raw: &str) -> Result<ScoreResponse, ScoreError> {
    let rows = parse_rows(raw)?;
    check_row_widths(&rows, classifier.input_width())?;
    let first = rows.first().ok_or(ScoreError::EmptyBatch)?;
    let scores = classifier.evaluate(first)?;
    Ok(ScoreResponse { scores })
}

fn check_row_widths(rows: &[Vec<f32>], expected: usize) -> Result<(), ScoreError> {
    // The first row is left to the classifier so it reports its own mismatch.
    match rows
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.len() != expected)
    {
        Some((row, values)) => Err(ScoreError::RowWidth {
            row,
            expected,
            actual: values.len(),
        }),
        None => Ok(()),
    }
}
