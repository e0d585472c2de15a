//! Serialized model loading.
//!
//! Models live as JSON documents in the models directory, one file per
//! task. A missing or malformed file leaves that task's slot
//! `Unavailable`; the service keeps running on the fallback tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use super::predictor::{FeatureSchema, ModelSet, ModelSlot, PredictError, Prediction, Predictor};
use crate::models::ParseEnumError;

pub const EMERGENCY_MODEL_FILE: &str = "emergency_level_model.json";
pub const SPECIALTY_MODEL_FILE: &str = "recommended_specialty_model.json";
pub const WAIT_TIME_MODEL_FILE: &str = "wait_time_model.json";

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Model file not found: {0}")]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed model document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown feature in model schema: {0}")]
    Schema(#[from] ParseEnumError),
    #[error("Inconsistent model shape: {0}")]
    Shape(String),
}

/// On-disk model document.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelDocument {
    LinearClassifier {
        feature_names: Option<Vec<String>>,
        /// One coefficient row per class.
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        /// Class label for each row; defaults to the row index.
        classes: Option<Vec<i64>>,
    },
    LinearRegressor {
        feature_names: Option<Vec<String>>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

/// Multinomial linear classifier with softmax probabilities.
#[derive(Debug)]
pub struct LinearClassifier {
    schema: FeatureSchema,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    classes: Vec<i64>,
}

impl LinearClassifier {
    pub fn new(
        schema: FeatureSchema,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        classes: Option<Vec<i64>>,
    ) -> Result<Self, ModelLoadError> {
        if coefficients.is_empty() {
            return Err(ModelLoadError::Shape("classifier has no classes".into()));
        }
        if let Some(row) = coefficients.iter().position(|r| r.len() != schema.len()) {
            return Err(ModelLoadError::Shape(format!(
                "coefficient row {row} has {} weights, schema has {} features",
                coefficients[row].len(),
                schema.len()
            )));
        }
        if intercepts.len() != coefficients.len() {
            return Err(ModelLoadError::Shape(format!(
                "{} intercepts for {} classes",
                intercepts.len(),
                coefficients.len()
            )));
        }
        let classes = classes.unwrap_or_else(|| (0..coefficients.len() as i64).collect());
        if classes.len() != coefficients.len() {
            return Err(ModelLoadError::Shape(format!(
                "{} class labels for {} classes",
                classes.len(),
                coefficients.len()
            )));
        }

        Ok(Self {
            schema,
            coefficients,
            intercepts,
            classes,
        })
    }
}

impl Predictor for LinearClassifier {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, input: &[f64]) -> Result<Prediction, PredictError> {
        check_width(&self.schema, input)?;

        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| dot(row, input) + b)
            .collect();
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(PredictError::NonFinite);
        }

        let probabilities = softmax(&scores);
        let best = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .ok_or_else(|| PredictError::Inference("empty score vector".into()))?;

        Ok(Prediction {
            value: self.classes[best] as f64,
            probabilities: Some(probabilities),
        })
    }
}

/// Ordinary linear regressor.
#[derive(Debug)]
pub struct LinearRegressor {
    schema: FeatureSchema,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(
        schema: FeatureSchema,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ModelLoadError> {
        if coefficients.len() != schema.len() {
            return Err(ModelLoadError::Shape(format!(
                "{} weights, schema has {} features",
                coefficients.len(),
                schema.len()
            )));
        }
        Ok(Self {
            schema,
            coefficients,
            intercept,
        })
    }
}

impl Predictor for LinearRegressor {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, input: &[f64]) -> Result<Prediction, PredictError> {
        check_width(&self.schema, input)?;

        let value = dot(&self.coefficients, input) + self.intercept;
        if !value.is_finite() {
            return Err(PredictError::NonFinite);
        }
        Ok(Prediction {
            value,
            probabilities: None,
        })
    }
}

fn check_width(schema: &FeatureSchema, input: &[f64]) -> Result<(), PredictError> {
    if input.len() != schema.len() {
        return Err(PredictError::FeatureMismatch {
            expected: schema.len(),
            actual: input.len(),
        });
    }
    Ok(())
}

fn dot(weights: &[f64], input: &[f64]) -> f64 {
    weights.iter().zip(input).map(|(w, x)| w * x).sum()
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

/// Parse a model document from JSON text.
pub fn parse_model(json: &str) -> Result<Arc<dyn Predictor>, ModelLoadError> {
    let document: ModelDocument = serde_json::from_str(json)?;
    let model: Arc<dyn Predictor> = match document {
        ModelDocument::LinearClassifier {
            feature_names,
            coefficients,
            intercepts,
            classes,
        } => {
            let schema = FeatureSchema::from_declared(feature_names.as_deref())?;
            Arc::new(LinearClassifier::new(schema, coefficients, intercepts, classes)?)
        }
        ModelDocument::LinearRegressor {
            feature_names,
            coefficients,
            intercept,
        } => {
            let schema = FeatureSchema::from_declared(feature_names.as_deref())?;
            Arc::new(LinearRegressor::new(schema, coefficients, intercept)?)
        }
    };
    Ok(model)
}

/// Load one model file.
pub fn load_model(path: &Path) -> Result<Arc<dyn Predictor>, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::NotFound(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    parse_model(&json)
}

/// Load a task's model into a slot, logging the outcome once.
pub fn load_slot(path: &Path, task: &str) -> ModelSlot {
    match load_model(path) {
        Ok(model) => {
            tracing::info!(
                task,
                path = %path.display(),
                features = model.schema().len(),
                "Model loaded"
            );
            ModelSlot::Loaded(model)
        }
        Err(e) => {
            tracing::warn!(task, path = %path.display(), error = %e, "Model unavailable, using fallback rules");
            ModelSlot::unavailable(e.to_string())
        }
    }
}

/// Load all three task models from `dir`.
pub fn load_model_set(dir: &Path) -> ModelSet {
    ModelSet {
        emergency: load_slot(&dir.join(EMERGENCY_MODEL_FILE), "emergency_level"),
        specialty: load_slot(&dir.join(SPECIALTY_MODEL_FILE), "specialty"),
        wait_time: load_slot(&dir.join(WAIT_TIME_MODEL_FILE), "wait_time"),
    }
}
