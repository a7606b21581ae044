//! Shared error mapping for the Diesel persistence layer.
//!
//! Pool and Diesel failures are translated into the domain port error here
//! so every adapter path reports the same variants: connection-shaped
//! failures map to `Connection`, everything else to `Query`. Debug context
//! is emitted through `tracing` at the point of translation.

use tracing::debug;

use crate::domain::ports::ProductRepositoryError;

use super::pool::PoolError;

/// Map pool errors to the domain repository error.
pub(crate) fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ProductRepositoryError::connection(message)
}

/// Map Diesel errors to the domain repository error.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ProductRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ProductRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(kind, _) => match kind {
            DatabaseErrorKind::ClosedConnection => {
                ProductRepositoryError::connection("database connection error")
            }
            _ => ProductRepositoryError::query("database error"),
        },
        _ => ProductRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Error translation coverage.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, ProductRepositoryError::connection("timed out"));

        let mapped = map_pool_error(PoolError::build("bad url"));
        assert_eq!(mapped, ProductRepositoryError::connection("bad url"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(mapped, ProductRepositoryError::query("record not found"));
    }
}
