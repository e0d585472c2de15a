//! API middleware.
//!
//! Only the access logger runs per request; CORS and cache headers are
//! tower-http layers applied in the router.

pub mod audit;
