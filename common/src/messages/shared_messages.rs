use crate::messages::store_messages::*;
use actix::prelude::*;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Every message exchanged between the tracker and the order store.
///
/// Sent as one JSON object per line, tagged by `type`.
#[derive(Serialize, Deserialize, Debug, Message, Clone, PartialEq)]
#[serde(tag = "type")]
#[rtype(result = "()")]
pub enum NetworkMessage {
    // Fetch path
    FetchOrder(FetchOrder),
    OrderFound(OrderFound),
    OrderNotFound(OrderNotFound),
    FetchFailed(FetchFailed),

    // Push path
    Subscribe(Subscribe),
    SubscribeAck(SubscribeAck),
    Unsubscribe(Unsubscribe),
    OrderUpdated(OrderUpdated),

    /// Local only: the peer closed the socket.
    ConnectionClosed(ConnectionClosed),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConnectionClosed {
    pub remote_addr: SocketAddr,
}

/// Stops a network actor.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Shutdown;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::order_status::OrderStatus;

    #[test]
    fn messages_are_tagged_by_type() {
        let msg = NetworkMessage::FetchOrder(FetchOrder {
            request_id: 7,
            order_id: "abc123".to_string(),
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"FetchOrder\""));
        assert!(json.contains("\"order_id\":\"abc123\""));
    }

    #[test]
    fn pushes_carry_the_full_snapshot() {
        let line = serde_json::json!({
            "type": "OrderUpdated",
            "order": {
                "id": "abc123",
                "token_number": 42,
                "status": "ready",
                "total_price": 250,
                "created_at": "2024-05-01T12:30:00Z"
            }
        })
        .to_string();
        let msg: NetworkMessage = serde_json::from_str(&line).unwrap();
        match msg {
            NetworkMessage::OrderUpdated(OrderUpdated { order }) => {
                assert_eq!(order.status, OrderStatus::Ready);
                assert_eq!(order.token_number, 42);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }
}
