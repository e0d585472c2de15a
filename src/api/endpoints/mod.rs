//! API endpoint handlers, one module per feature.

pub mod assessment;
pub mod facilities;
pub mod health;
pub mod verification;
