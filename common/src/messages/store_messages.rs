use crate::types::dtos::OrderDTO;
use serde::{Deserialize, Serialize};

/// Asks the store for the current snapshot of one order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchOrder {
    pub request_id: u64,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderFound {
    pub request_id: u64,
    pub order: OrderDTO,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNotFound {
    pub request_id: u64,
    pub order_id: String,
}

/// Transient failure answering a fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchFailed {
    pub request_id: u64,
    pub reason: String,
}

/// Opens a push subscription for one order id. The id is chosen by the
/// subscriber and is only unique within its connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscribe {
    pub subscription_id: u64,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscribeAck {
    pub subscription_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unsubscribe {
    pub subscription_id: u64,
}

/// Pushed to every subscriber of `order.id` whenever the record changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderUpdated {
    pub order: OrderDTO,
}
