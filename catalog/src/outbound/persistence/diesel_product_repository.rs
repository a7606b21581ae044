//! PostgreSQL-backed product repository adapter.
//!
//! Implements the product repository port against the shared unit-of-work
//! session. Reads execute immediately; `add` and `update` stage mutations
//! on the unit of work for its owner to commit.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::{PageRequest, PagedResult};
use uuid::Uuid;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductId, ProductIdList};

use super::diesel_helpers::map_diesel_error;
use super::models::{row_to_product, ProductRow};
use super::schema::products;
use super::unit_of_work::UnitOfWork;

/// Diesel-backed implementation of the product repository port.
///
/// Several repositories may share one [`UnitOfWork`]; they then observe the
/// same session and the same commit/rollback boundary.
#[derive(Clone)]
pub struct DieselProductRepository {
    unit_of_work: Arc<UnitOfWork>,
}

impl DieselProductRepository {
    /// Create a repository reading and staging through `unit_of_work`.
    pub fn new(unit_of_work: Arc<UnitOfWork>) -> Self {
        Self { unit_of_work }
    }

    /// The shared transactional handle this repository stages into.
    ///
    /// Owned by the composition root; exposing it lets multiple
    /// repositories coordinate one commit/rollback boundary.
    pub fn unit_of_work(&self) -> Arc<UnitOfWork> {
        Arc::clone(&self.unit_of_work)
    }

    /// Release the shared session. No-op when already released.
    pub async fn dispose(&self) {
        self.unit_of_work.dispose().await;
    }
}

/// Escape LIKE metacharacters so the filter term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Build the shared filter predicate for one result set.
///
/// Both the page fetch and the count fetch call this with the same term, so
/// the two result sets are constrained by the same predicate. The term is
/// always bound as a parameter, never spliced into the query text.
fn filtered_products(term: Option<&str>) -> products::BoxedQuery<'static, Pg> {
    let mut query = products::table.into_boxed();
    if let Some(term) = term {
        query = query.filter(products::name.ilike(like_pattern(term)));
    }
    query
}

fn convert_rows(rows: Vec<ProductRow>) -> Result<Vec<Product>, ProductRepositoryError> {
    rows.into_iter()
        .map(row_to_product)
        .collect::<Result<Vec<_>, String>>()
        .map_err(ProductRepositoryError::query)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn search(
        &self,
        page: PageRequest,
    ) -> Result<PagedResult<Product>, ProductRepositoryError> {
        let mut session = self.unit_of_work.lease().await?;
        let conn: &mut AsyncPgConnection = &mut session;
        let term = page.filter_term();
        let (offset, limit) = (page.offset(), page.limit());

        // One transaction so the page and its count observe the same
        // snapshot of the filtered set.
        let (rows, total) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<ProductRow> = filtered_products(term)
                        .order_by(products::name.asc())
                        .then_order_by(products::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .select(ProductRow::as_select())
                        .load(conn)
                        .await?;
                    let total: i64 = filtered_products(term).count().get_result(conn).await?;
                    Ok::<_, diesel::result::Error>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| ProductRepositoryError::query("negative row count"))?;
        let items = convert_rows(rows)?;

        Ok(PagedResult::from_page(&page, items, total))
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut session = self.unit_of_work.lease().await?;
        let conn: &mut AsyncPgConnection = &mut session;

        let row: Option<ProductRow> = products::table
            .find(*id.as_uuid())
            .select(ProductRow::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_product)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn get_by_ids(&self, ids: &str) -> Result<Vec<Product>, ProductRepositoryError> {
        // All-or-nothing: a malformed token rejects the whole list, and a
        // rejected or empty list never reaches the store.
        let Some(id_list) = ProductIdList::parse(ids) else {
            return Ok(Vec::new());
        };
        if id_list.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self.unit_of_work.lease().await?;
        let conn: &mut AsyncPgConnection = &mut session;
        let uuids: Vec<Uuid> = id_list.uuids().collect();

        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(uuids))
            .filter(products::active.eq(true))
            .select(ProductRow::as_select())
            .load(conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows)
    }

    fn add(&self, product: Product) {
        self.unit_of_work.stage_insert(product);
    }

    fn update(&self, product: Product) {
        self.unit_of_work.stage_update(product);
    }
}
