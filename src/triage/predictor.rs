//! Model adapter: optional predictors with explicit feature schemas.
//!
//! A task's model is either `Loaded` or `Unavailable`. Inference returns
//! a `Result`; the adapter never substitutes a default value. Callers
//! decide what to do on failure.

use std::fmt;
use std::sync::Arc;

use super::features::{FeatureName, FeatureVector, DEFAULT_FEATURE_ORDER};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("Model not loaded: {0}")]
    Unavailable(String),
    #[error("Feature mismatch: model expects {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
    #[error("Model produced a non-finite output")]
    NonFinite,
    #[error("Model did not report class probabilities")]
    MissingProbabilities,
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Raw model output before label decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class index for classifiers, regression value otherwise.
    pub value: f64,
    /// Per-class probabilities, when the model reports them.
    pub probabilities: Option<Vec<f64>>,
}

impl Prediction {
    pub fn class_index(&self) -> i64 {
        self.value as i64
    }

    /// Highest class probability, if probabilities were reported.
    pub fn max_probability(&self) -> Option<f64> {
        self.probabilities
            .as_ref()?
            .iter()
            .copied()
            .reduce(f64::max)
    }
}

/// Ordered list of named inputs a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    features: Vec<FeatureName>,
}

impl FeatureSchema {
    pub fn new(features: Vec<FeatureName>) -> Self {
        Self { features }
    }

    /// Schema from a model's declared feature names, or the fixed
    /// 4-feature order when it declares none.
    pub fn from_declared(names: Option<&[String]>) -> Result<Self, crate::models::ParseEnumError> {
        match names {
            Some(names) if !names.is_empty() => {
                let features = names
                    .iter()
                    .map(|n| n.parse::<FeatureName>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self { features })
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> &[FeatureName] {
        &self.features
    }

    /// Pack a feature vector in this schema's order.
    pub fn pack(&self, features: &FeatureVector) -> Vec<f64> {
        self.features.iter().map(|name| features.get(*name)).collect()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURE_ORDER.to_vec())
    }
}

/// A pre-trained model. Inference takes `&self` so one instance can be
/// shared across concurrent requests.
pub trait Predictor: Send + Sync {
    fn schema(&self) -> &FeatureSchema;

    /// Run inference on an input already packed in `schema()` order.
    fn predict(&self, input: &[f64]) -> Result<Prediction, PredictError>;
}

/// One task's model: loaded, or unavailable with the reason.
#[derive(Clone)]
pub enum ModelSlot {
    Loaded(Arc<dyn Predictor>),
    Unavailable { reason: String },
}

impl ModelSlot {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Pack `features` for the model and run it.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        match self {
            Self::Unavailable { reason } => Err(PredictError::Unavailable(reason.clone())),
            Self::Loaded(model) => {
                let input = model.schema().pack(features);
                model.predict(&input)
            }
        }
    }
}

impl fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(model) => f
                .debug_tuple("Loaded")
                .field(&model.schema().names())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// The three task models used by the orchestrator.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub emergency: ModelSlot,
    pub specialty: ModelSlot,
    pub wait_time: ModelSlot,
}

impl ModelSet {
    /// All slots unavailable; every field uses the fallback tables.
    pub fn unavailable() -> Self {
        Self {
            emergency: ModelSlot::unavailable("not configured"),
            specialty: ModelSlot::unavailable("not configured"),
            wait_time: ModelSlot::unavailable("not configured"),
        }
    }
}
