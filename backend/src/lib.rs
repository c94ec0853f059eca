//! File-processing backend: decodes user-collection XML documents, computes
//! rate statistics over them, and merges newly supplied users into existing
//! documents with a persistence side effect.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped tracing middleware.
pub use middleware::Trace;
