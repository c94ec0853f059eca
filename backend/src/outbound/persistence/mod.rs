//! PostgreSQL persistence for the merge side effect, via Diesel.
//!
//! The adapter is a thin translator: domain `NewUser` values become row
//! structs and diesel/pool failures become the port's error type. Nothing
//! here is read back to answer a request; the store is write-only from the
//! core's point of view.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
