//! Database error type

/// Failure while obtaining a connection or running a statement.
///
/// Callers never see the cause over HTTP; it is logged and mapped to a 500.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Every connection stayed busy for the whole acquire timeout
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// A connection could not be opened or handed out
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement itself failed (syntax, constraint, lost connection)
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    /// A result column could not be converted to JSON
    #[error("could not decode column '{column}': {source}")]
    Decode {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    /// Classify an error returned while acquiring from the pool.
    pub fn from_acquire(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::PoolExhausted,
            other => Self::Connection(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_timeout_is_pool_exhausted() {
        let err = DbError::from_acquire(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::PoolExhausted));
    }

    #[test]
    fn other_acquire_errors_are_connection_errors() {
        let err = DbError::from_acquire(sqlx::Error::PoolClosed);
        assert!(matches!(err, DbError::Connection(_)));
    }
}
