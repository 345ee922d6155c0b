//! Seam towards the order store.
//!
//! The tracker only ever talks to an [`OrderStore`]; the binary plugs in a
//! [`remote_store::RemoteStore`] and tests plug in in-memory fakes.

use crate::messages::internal_messages::OrderPushed;
use actix::Recipient;
use async_trait::async_trait;
use common::errors::StoreError;
use common::types::dtos::OrderDTO;

pub mod remote_store;

/// Identifies one live push subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub id: u64,
    pub order_id: String,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Current snapshot of `order_id`, or `Ok(None)` when the store has no
    /// such order.
    async fn fetch_order(&self, order_id: &str) -> Result<Option<OrderDTO>, StoreError>;

    /// Delivers an [`OrderPushed`] to `on_change` every time the order
    /// changes, until the returned handle is released.
    async fn subscribe(
        &self,
        order_id: &str,
        on_change: Recipient<OrderPushed>,
    ) -> Result<SubscriptionHandle, StoreError>;

    async fn unsubscribe(&self, handle: SubscriptionHandle);
}
