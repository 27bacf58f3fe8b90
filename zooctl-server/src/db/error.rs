//! Repository error type
//!
//! Driver errors are classified once, in `From<sqlx::Error>`, so handlers
//! can tell a missing row from a broken connection.

use sqlx::error::ErrorKind;

use crate::models::ValidationError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("database unavailable: {0}")]
    Connection(sqlx::Error),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Query(sqlx::Error),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return Self::ConstraintViolation(db_err.message().to_owned());
            }
        }

        if matches!(
            err,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Protocol(_)
                | sqlx::Error::WorkerCrashed
        ) {
            return Self::Connection(err);
        }

        Self::Query(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_connection_error() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[test]
    fn io_error_is_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: DbError = sqlx::Error::Io(io).into();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[test]
    fn row_not_found_is_query_error() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Query(_)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("bird", 42);
        assert_eq!(err.to_string(), "not found: bird '42'");
    }
}
