//! Catalog data-access library modules.

pub mod domain;
pub mod outbound;
