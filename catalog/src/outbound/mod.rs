//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.
//!
//! - **persistence**: PostgreSQL-backed product repository using Diesel ORM,
//!   plus the unit-of-work session it operates through.

pub mod persistence;
