use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested product does not exist upstream.
    #[error("not found")]
    NotFound,
    /// The feed failed; the message is shown verbatim in the error panel
    /// next to the retry affordance.
    #[error("{0}")]
    Feed(String),
    /// Query-parameter form validation failed.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
