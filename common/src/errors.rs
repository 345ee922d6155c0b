use thiserror::Error;

/// Errors surfaced by an order store, local or remote.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No order exists with the requested identifier.
    #[error("Order not found: {0}")]
    NotFound(String),
    /// Transient failure; the next poll is expected to retry.
    #[error("Failed to load order: {0}")]
    FetchFailed(String),
    /// The push subscription could not be established.
    #[error("Failed to subscribe to order {0}")]
    SubscribeFailed(String),
    #[error("Connection to the order store was lost")]
    Disconnected,
}

impl StoreError {
    /// Whether retrying later can succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, StoreError::NotFound(_))
    }
}
