//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the product
//! repository port backed by PostgreSQL via the Diesel ORM with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: The repository only translates between Diesel models
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Caller-owned sessions**: Repositories share one [`UnitOfWork`], which
//!   holds the session connection and the staged mutations that become
//!   durable when the owner commits.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use catalog::outbound::persistence::{DbPool, PoolConfig, DieselProductRepository, UnitOfWork};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let unit_of_work = Arc::new(UnitOfWork::begin(&pool).await?);
//! let repo = DieselProductRepository::new(Arc::clone(&unit_of_work));
//! ```

pub(crate) mod diesel_helpers;
mod diesel_product_repository;
mod models;
mod pool;
mod schema;
mod unit_of_work;

pub use diesel_product_repository::DieselProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use unit_of_work::UnitOfWork;
