//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! domain services and stay testable without I/O.

use crate::domain::MergeService;

/// Dependency bundle for HTTP handlers.
///
/// The persistence collaborator inside the merge service is constructed
/// once at process start and injected here; handlers hold no other state.
#[derive(Clone)]
pub struct HttpState {
    /// Merge operation over the durable user store.
    pub merge: MergeService,
}
