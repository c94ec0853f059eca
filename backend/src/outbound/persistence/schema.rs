//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the database migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Users appended by the merge operation.
    ///
    /// The identifier comes from the request payload; the primary key is
    /// what rejects duplicate identifiers on concurrent merges.
    users (id) {
        /// Caller-supplied identifier.
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        rate -> Int4,
    }
}
