use actix::prelude::*;
use common::errors::StoreError;
use common::messages::shared_messages::NetworkMessage;
use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;
use std::net::SocketAddr;

/////////////////////////////////////////////////////////////////////
// Session -> Storage
/////////////////////////////////////////////////////////////////////

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<OrderDTO, StoreError>")]
pub struct LookupOrder {
    pub order_id: String,
}

/// Registers `sender` to receive `OrderUpdated` for `order_id`.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct AddSubscriber {
    pub session: SocketAddr,
    pub subscription_id: u64,
    pub order_id: String,
    pub sender: Recipient<NetworkMessage>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RemoveSubscriber {
    pub session: SocketAddr,
    pub subscription_id: u64,
}

/// Forgets every subscription opened by a closed connection.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct DropSession {
    pub session: SocketAddr,
}

/////////////////////////////////////////////////////////////////////
// Kitchen / operator -> Storage
/////////////////////////////////////////////////////////////////////

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<OrderDTO, StoreError>")]
pub struct SetOrderStatus {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Moves the least advanced undelivered order one stage forward.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<OrderDTO>")]
pub struct AdvanceOneOrder;

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct InsertOrders {
    pub orders: Vec<OrderDTO>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<OrderDTO>")]
pub struct ListOrders;
