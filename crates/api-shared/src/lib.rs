//! # API Shared
//!
//! Wire definitions for the Receita HTTP API.
//!
//! Contains:
//! - JSON request/response types (`wire` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Field names follow the front end's camelCase JSON, including the `patientCPF` spelling.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
