//! Remote transaction service.
//!
//! [`TransactionSource`] is the seam the controller's requests are executed
//! against; [`HttpSource`] is the real implementation over the service's
//! JSON API.

mod http;

pub(crate) use http::HttpSource;

use thiserror::Error;

use crate::models::{Transaction, TransactionDetail, TransactionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SourceError {
    /// The request could not complete: transport error, timeout or an
    /// unexpected HTTP status.
    #[error("network failure: {0}")]
    Network(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    pub(crate) fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

pub(crate) trait TransactionSource: Send + Sync {
    /// `GET /api/transactions`
    fn list(&self) -> Result<Vec<Transaction>, SourceError>;

    /// `GET /api/transactions/{id}`
    fn detail(&self, id: TransactionId) -> Result<TransactionDetail, SourceError>;

    /// `PATCH /api/transactions/{id}` with `{ "internal": bool }`
    fn set_internal(&self, id: TransactionId, internal: bool) -> Result<(), SourceError>;
}

#[cfg(test)]
pub(crate) mod fake;
