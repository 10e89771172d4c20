//! Diesel and pool error mapping shared by the repositories.
//!
//! Repositories pass their port error constructors in, so each adapter keeps
//! its own error type while the classification lives in one place.

use tracing::debug;

use super::pool::PoolError;

/// Map pool failures through the repository's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Classify a Diesel error as a connection or query failure.
///
/// Only a closed connection counts as a connection failure. Database messages
/// are logged at debug level and replaced with fixed strings.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            query("database error")
        }
        DieselError::NotFound => query("record not found"),
        other => {
            debug!(error = %other, "diesel operation failed");
            query("database query error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ItemPersistenceError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn map(error: DieselError) -> ItemPersistenceError {
        map_basic_diesel_error(
            error,
            ItemPersistenceError::query,
            ItemPersistenceError::connection,
        )
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let err = map(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, ItemPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    #[case(DieselError::DatabaseError(
        DatabaseErrorKind::CheckViolation,
        Box::new("items_data_check".to_owned()),
    ))]
    fn other_errors_map_to_query(#[case] error: DieselError) {
        assert!(matches!(map(error), ItemPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err: ItemPersistenceError = map_basic_pool_error(
            PoolError::checkout("timed out"),
            ItemPersistenceError::connection,
        );
        assert_eq!(err, ItemPersistenceError::connection("timed out"));
    }
}
