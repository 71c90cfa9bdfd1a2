//! Error types for Vuka.

use thiserror::Error;

/// Common error type for Vuka.
#[derive(Error, Debug)]
pub enum VukaError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant, except unique
    /// constraint violations which map to [`VukaError::ConstraintViolation`].
    #[error("database error: {0}")]
    Database(String),

    /// A uniqueness constraint rejected an insert or update.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Network or HTTP failure while fetching a feed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Feed document could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Item publish date did not match the expected format.
    #[error("invalid publish date {value:?}: {reason}")]
    DateParse {
        /// The raw date string from the feed.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Scheduler registration or lifecycle error.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl From<sqlx::Error> for VukaError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                VukaError::ConstraintViolation(db_err.message().to_string())
            }
            _ => VukaError::Database(e.to_string()),
        }
    }
}

impl From<tokio_cron_scheduler::JobSchedulerError> for VukaError {
    fn from(e: tokio_cron_scheduler::JobSchedulerError) -> Self {
        VukaError::Scheduler(e.to_string())
    }
}

/// Result type alias for Vuka operations.
pub type Result<T> = std::result::Result<T, VukaError>;
