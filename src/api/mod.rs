//! HTTP API for the triage service.
//!
//! Routes are nested under `/api/`. `triage_api_router()` returns a
//! composable `Router` that can be mounted on any axum server.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::triage_api_router;
pub use server::{start_server_on, ApiSession, ServerError, TriageServer};
pub use types::ApiContext;
