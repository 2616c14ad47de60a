//! # API Shared
//!
//! Wire definitions shared by the REST server and the search client.
//!
//! Contains:
//! - JSON request/response bodies (`wire` module), annotated for OpenAPI generation
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` to answer requests and by `trips-sync` to decode them.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
