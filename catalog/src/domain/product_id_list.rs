//! Bulk-lookup identifier list parsing.
//!
//! Bulk lookups arrive as one comma-separated string of identifier tokens.
//! Each non-empty token is parsed on its own; the outcomes are aggregated
//! under an all-or-nothing policy so a single malformed token rejects the
//! whole list rather than producing a partially-correct lookup.

use uuid::Uuid;

use super::product::{ProductId, ProductIdParseError};

/// A fully parsed list of product identifiers for one bulk lookup.
///
/// Obtained through [`ProductIdList::parse`]; existence of a value means
/// every non-empty token in the input parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdList(Vec<ProductId>);

impl ProductIdList {
    /// Parse a comma-separated identifier list, all-or-nothing.
    ///
    /// Tokens are trimmed before parsing; empty and whitespace-only tokens
    /// are skipped. Returns `None` as soon as any remaining token fails to
    /// parse. An input with no non-empty tokens yields an empty list, which
    /// callers should treat as "nothing to look up" rather than a rejection.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ProductId::parse)
            .collect::<Result<Vec<_>, ProductIdParseError>>()
            .ok()
            .map(Self)
    }

    /// Whether the input held no identifiers at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of identifiers in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The parsed identifiers in input order.
    pub fn as_slice(&self) -> &[ProductId] {
        &self.0
    }

    /// Iterate the raw UUIDs, for binding into an `IN`-style predicate.
    pub fn uuids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.0.iter().map(|id| *id.as_uuid())
    }
}
