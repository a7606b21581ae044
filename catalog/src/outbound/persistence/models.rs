//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Product, ProductDraft, ProductId};

use super::schema::products;

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for staging new product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub stock_quantity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for full-entity product updates.
///
/// Every non-key column is written; last write wins.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub stock_quantity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Product> for NewProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: *product.id().as_uuid(),
            name: product.name(),
            description: product.description(),
            price: product.price(),
            stock_quantity: product.stock_quantity(),
            active: product.is_active(),
            created_at: product.created_at(),
        }
    }
}

impl<'a> From<&'a Product> for ProductChangeset<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: product.name(),
            description: product.description(),
            price: product.price(),
            stock_quantity: product.stock_quantity(),
            active: product.is_active(),
            created_at: product.created_at(),
        }
    }
}

/// Convert a database row into a validated domain product.
pub(crate) fn row_to_product(row: ProductRow) -> Result<Product, String> {
    let ProductRow {
        id,
        name,
        description,
        price,
        stock_quantity,
        active,
        created_at,
    } = row;

    Product::new(ProductDraft {
        id: ProductId::from_uuid(id),
        name,
        description,
        price,
        stock_quantity,
        active,
        created_at,
    })
    .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    //! Row-to-domain conversion coverage.
    use rstest::rstest;

    use super::*;

    fn row(name: &str, price: f64) -> ProductRow {
        ProductRow {
            id: Uuid::nil(),
            name: name.to_owned(),
            description: "desc".to_owned(),
            price,
            stock_quantity: 2,
            active: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn converts_well_formed_rows() {
        let product = row_to_product(row("Desk", 10.0)).expect("row converts");

        assert_eq!(product.name(), "Desk");
        assert!(!product.is_active());
        assert_eq!(product.id(), &ProductId::from_uuid(Uuid::nil()));
    }

    #[rstest]
    fn surfaces_validation_failures_as_messages() {
        let err = row_to_product(row("", 10.0)).expect_err("blank name rejected");
        assert!(err.contains("name"));
    }

    #[rstest]
    fn insert_row_borrows_every_column_from_the_product() {
        let product = row_to_product(row("Desk", 10.0)).expect("row converts");
        let new_row = NewProductRow::from(&product);

        assert_eq!(new_row.name, "Desk");
        assert_eq!(new_row.price, 10.0);
        assert_eq!(new_row.id, Uuid::nil());
    }
}
