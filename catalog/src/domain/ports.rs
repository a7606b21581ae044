//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! The repository port exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use pagination::{PageRequest, PagedResult};
use thiserror::Error;

use super::{Product, ProductId};

/// Persistence errors raised by [`ProductRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductRepositoryError {
    /// Repository connection could not be established or has been released.
    #[error("product repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("product repository query failed: {message}")]
    Query { message: String },
}

impl ProductRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for the product catalog.
///
/// Reads are asynchronous calls against the session held by the owning unit
/// of work; dropping a read's future aborts the exchange. `add` and `update`
/// only stage work: nothing touches the store until that unit of work
/// commits, and staging failures therefore surface at commit time rather
/// than here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one page of products plus the total count matching the same
    /// filter, observed from a single snapshot.
    ///
    /// The filter matches every record when the request carries no term,
    /// otherwise records whose name contains the term case-insensitively.
    /// Active and inactive records are both returned. Ordering is ascending
    /// by name with the identifier as a deterministic tie-break; callers
    /// must not ascribe further meaning to the order of equal names.
    async fn search(
        &self,
        page: PageRequest,
    ) -> Result<PagedResult<Product>, ProductRepositoryError>;

    /// Fetch a product by primary identity.
    ///
    /// Does not filter on the active flag, unlike [`Self::get_by_ids`]. A
    /// miss is `Ok(None)`, never an error.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Fetch the active products named by a comma-separated identifier list.
    ///
    /// The list is parsed all-or-nothing: any malformed token yields an
    /// empty result without touching the store. Inactive matches are
    /// silently excluded. The returned products are detached values; the
    /// lookup stages nothing on the session.
    async fn get_by_ids(&self, ids: &str) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Stage an insert into the shared unit of work.
    fn add(&self, product: Product);

    /// Stage a full-entity update into the shared unit of work.
    ///
    /// Last write wins; there is no concurrency token.
    fn update(&self, product: Product);
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the port error surface and trait contract.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ProductDraft;

    #[rstest]
    fn constructors_accept_str_for_messages() {
        let connection = ProductRepositoryError::connection("database unavailable");
        let query = ProductRepositoryError::query("syntax error");

        assert_eq!(
            connection,
            ProductRepositoryError::Connection {
                message: "database unavailable".to_owned()
            }
        );
        assert!(connection.to_string().contains("database unavailable"));
        assert!(query.to_string().contains("syntax error"));
    }

    fn sample_product() -> Product {
        Product::new(ProductDraft {
            id: ProductId::parse("11111111-1111-1111-1111-111111111111").expect("valid id"),
            name: "Desk".to_owned(),
            description: String::new(),
            price: 10.0,
            stock_quantity: 1,
            active: true,
            created_at: Utc::now(),
        })
        .expect("valid product")
    }

    #[tokio::test]
    async fn port_is_object_safe_and_mockable() {
        let mut mock = MockProductRepository::new();
        let found = sample_product();
        let found_clone = found.clone();
        mock.expect_get_by_id()
            .returning(move |_| Ok(Some(found_clone.clone())));

        let repository: &dyn ProductRepository = &mock;
        let fetched = repository
            .get_by_id(found.id())
            .await
            .expect("mock lookup succeeds");

        assert_eq!(fetched, Some(found));
    }
}
