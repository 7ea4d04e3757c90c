//! Error conversion glue between the crate's boundary error types.
//!
//! The feed layer raises typed failures; the presentation boundary consumes
//! a single user-facing summary. These impls keep the mapping in one place
//! so controllers and routes stay thin.

use crate::feed::FeedError;
use crate::forms::catalog::CatalogFormError;
use crate::services::ServiceError;

impl From<FeedError> for ServiceError {
    fn from(val: FeedError) -> Self {
        // Every hard feed failure surfaces as one message plus a retry
        // affordance; the original text is preserved for the error panel.
        ServiceError::Feed(val.to_string())
    }
}

impl From<CatalogFormError> for ServiceError {
    fn from(val: CatalogFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
