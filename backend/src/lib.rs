//! Library lending backend.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities,
//! ports, and action engines; `inbound` adapts HTTP requests onto the
//! driving ports; `outbound` implements the driven ports over an
//! in-memory store.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
