//! Product data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`Product::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    NonFinitePrice,
    NegativePrice,
    NegativeStock,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be blank"),
            Self::NonFinitePrice => write!(f, "product price must be a finite number"),
            Self::NegativePrice => write!(f, "product price must not be negative"),
            Self::NegativeStock => write!(f, "product stock quantity must not be negative"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Error returned when a textual token is not a valid product identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdParseError;

impl fmt::Display for ProductIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "product id must be a valid UUID")
    }
}

impl std::error::Error for ProductIdParseError {}

/// Stable product identifier stored as a UUID.
///
/// The store owns identity: this type only parses and carries existing
/// identifiers, it never mints them on behalf of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Parse an identifier from its canonical textual form.
    pub fn parse(token: impl AsRef<str>) -> Result<Self, ProductIdParseError> {
        Uuid::parse_str(token.as_ref())
            .map(Self)
            .map_err(|_| ProductIdParseError)
    }

    /// Wrap an identifier that already exists as a UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unvalidated field bundle used to construct a [`Product`].
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog product entity.
///
/// `name` drives filtering and ordering on the read side; `active` marks the
/// record as logically present (`true`) versus soft-deleted (`false`). The
/// remaining attributes are carried verbatim and are opaque to query logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: f64,
    stock_quantity: i32,
    active: bool,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validate and construct a product from a draft.
    pub fn new(draft: ProductDraft) -> Result<Self, ProductValidationError> {
        let ProductDraft {
            id,
            name,
            description,
            price,
            stock_quantity,
            active,
            created_at,
        } = draft;

        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if !price.is_finite() {
            return Err(ProductValidationError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(ProductValidationError::NegativePrice);
        }
        if stock_quantity < 0 {
            return Err(ProductValidationError::NegativeStock);
        }

        Ok(Self {
            id,
            name,
            description,
            price,
            stock_quantity,
            active,
            created_at,
        })
    }

    /// Product identity.
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name used for filtering and ordering.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units currently in stock.
    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    /// Whether the record is logically present rather than soft-deleted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Creation timestamp carried from the store.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Construction and validation coverage for the product model.
    use rstest::rstest;

    use super::*;

    fn draft(name: &str, price: f64, stock_quantity: i32) -> ProductDraft {
        ProductDraft {
            id: ProductId::parse("11111111-1111-1111-1111-111111111111").expect("valid id"),
            name: name.to_owned(),
            description: "A sample product".to_owned(),
            price,
            stock_quantity,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("", 9.99, 1, ProductValidationError::EmptyName)]
    #[case("   ", 9.99, 1, ProductValidationError::EmptyName)]
    #[case("Desk", f64::NAN, 1, ProductValidationError::NonFinitePrice)]
    #[case("Desk", f64::INFINITY, 1, ProductValidationError::NonFinitePrice)]
    #[case("Desk", -0.01, 1, ProductValidationError::NegativePrice)]
    #[case("Desk", 9.99, -1, ProductValidationError::NegativeStock)]
    fn rejects_invalid_drafts(
        #[case] name: &str,
        #[case] price: f64,
        #[case] stock_quantity: i32,
        #[case] expected: ProductValidationError,
    ) {
        let err = Product::new(draft(name, price, stock_quantity)).expect_err("draft rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn accepts_valid_draft() {
        let product = Product::new(draft("Desk Lamp", 24.5, 3)).expect("valid product");

        assert_eq!(product.name(), "Desk Lamp");
        assert_eq!(product.price(), 24.5);
        assert_eq!(product.stock_quantity(), 3);
        assert!(product.is_active());
    }

    #[rstest]
    fn serialises_with_stable_field_names() {
        let product = Product::new(draft("Desk Lamp", 24.5, 3)).expect("valid product");
        let json = serde_json::to_value(&product).expect("product serialises");

        assert_eq!(json["name"], "Desk Lamp");
        assert_eq!(json["active"], true);
        assert_eq!(json["id"], "11111111-1111-1111-1111-111111111111");
    }

    #[rstest]
    #[case("11111111-1111-1111-1111-111111111111", true)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    #[case("11111111-1111-1111-1111-11111111111", false)]
    fn parses_identifier_tokens(#[case] token: &str, #[case] ok: bool) {
        assert_eq!(ProductId::parse(token).is_ok(), ok);
    }

    #[rstest]
    fn identifier_displays_canonical_form() {
        let id = ProductId::parse("11111111-1111-1111-1111-111111111111").expect("valid id");
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }
}
