//! Triage engine: feature preparation, model adapter and rule fallbacks.

pub mod fallback;
pub mod features;
pub mod loader;
pub mod orchestrator;
pub mod predictor;

pub use features::{prepare_features, FeatureName, FeatureVector};
pub use loader::{load_model_set, ModelLoadError};
pub use orchestrator::TriageOrchestrator;
pub use predictor::{ModelSet, ModelSlot, PredictError, Prediction, Predictor};
