use crate::types::order_status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Snapshot of one order as stored by the backend.
///
/// Snapshots are never merged field by field: whoever receives a newer one
/// replaces the old copy entirely.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDTO {
    /// Opaque unique identifier.
    pub id: String,
    /// Short number shown to the customer at the counter.
    pub token_number: u32,
    /// Current stage. A missing or `null` status decodes as unknown.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl OrderDTO {
    pub fn new(
        id: impl Into<String>,
        token_number: u32,
        status: OrderStatus,
        total_price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            token_number,
            status,
            total_price,
            created_at,
        }
    }

    /// Copy of this snapshot with a different status.
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
