//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. The `diesel print-schema` command can regenerate them from a
//! live database when migrations change.

diesel::table! {
    /// Product catalog table.
    ///
    /// `name` carries a substring-search index on the read side; `active`
    /// marks records as logically present versus soft-deleted.
    products (id) {
        /// Primary key: UUID identifier owned by the store.
        id -> Uuid,
        /// Display name, filtered and ordered on the read side.
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Unit price.
        price -> Float8,
        /// Units currently in stock.
        stock_quantity -> Int4,
        /// Logically present (`true`) versus soft-deleted (`false`).
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
