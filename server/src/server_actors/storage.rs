use crate::messages::internal_messages::{
    AddSubscriber, AdvanceOneOrder, DropSession, InsertOrders, ListOrders, LookupOrder,
    RemoveSubscriber, SetOrderStatus,
};
use actix::prelude::*;
use colored::Color;
use common::errors::StoreError;
use common::logger::Logger;
use common::messages::shared_messages::NetworkMessage;
use common::messages::store_messages::OrderUpdated;
use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;
use common::utils::random_bool_by_given_probability;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Subscriptions are keyed by connection, since subscription ids are only
/// unique within one connection.
type SubscriberKey = (SocketAddr, u64);

/// The `Storage` actor holds every order and the push subscriptions on them.
///
/// # Responsibilities
/// - Answers fetches, occasionally failing on purpose to mimic a flaky backend.
/// - Applies status changes and pushes the new snapshot to the subscribers of
///   that order, and only to them.
/// - Forgets the subscriptions of connections that went away.
pub struct Storage {
    /// Orders by id.
    pub orders: HashMap<String, OrderDTO>,
    /// Order id -> subscribers waiting for its updates.
    pub subscribers: HashMap<String, HashMap<SubscriberKey, Recipient<NetworkMessage>>>,
    /// Chance of answering a fetch instead of failing it.
    pub fetch_success_probability: f32,
    pub logger: Logger,
}

impl Storage {
    pub fn new(fetch_success_probability: f32) -> Self {
        Self {
            orders: HashMap::new(),
            subscribers: HashMap::new(),
            fetch_success_probability,
            logger: Logger::new("Storage", Color::White),
        }
    }

    fn publish(&self, order: &OrderDTO) {
        let Some(subscribers) = self.subscribers.get(&order.id) else {
            return;
        };
        self.logger.info(format!(
            "Pushing order {} ({}) to {} subscriber(s)",
            order.id,
            order.status,
            subscribers.len()
        ));
        for sender in subscribers.values() {
            sender.do_send(NetworkMessage::OrderUpdated(OrderUpdated {
                order: order.clone(),
            }));
        }
    }

    fn update_status(&mut self, order_id: &str, status: OrderStatus) -> Result<OrderDTO, StoreError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;
        order.status = status;
        let updated = order.clone();
        self.publish(&updated);
        Ok(updated)
    }
}

impl Actor for Storage {
    type Context = Context<Self>;
}

impl Handler<LookupOrder> for Storage {
    type Result = Result<OrderDTO, StoreError>;

    fn handle(&mut self, msg: LookupOrder, _ctx: &mut Self::Context) -> Self::Result {
        if !random_bool_by_given_probability(self.fetch_success_probability) {
            self.logger
                .warn(format!("Simulating a failed fetch for {}", msg.order_id));
            return Err(StoreError::FetchFailed("backend temporarily unavailable".to_string()));
        }
        self.orders
            .get(&msg.order_id)
            .cloned()
            .ok_or(StoreError::NotFound(msg.order_id))
    }
}

impl Handler<SetOrderStatus> for Storage {
    type Result = Result<OrderDTO, StoreError>;

    fn handle(&mut self, msg: SetOrderStatus, _ctx: &mut Self::Context) -> Self::Result {
        self.update_status(&msg.order_id, msg.status)
    }
}

impl Handler<AdvanceOneOrder> for Storage {
    type Result = Option<OrderDTO>;

    fn handle(&mut self, _msg: AdvanceOneOrder, _ctx: &mut Self::Context) -> Self::Result {
        let (order_id, next) = self
            .orders
            .values()
            .filter_map(|order| order.status.next().map(|next| (order, next)))
            .min_by_key(|(order, _)| (order.status.step(), order.token_number))
            .map(|(order, next)| (order.id.clone(), next))?;
        self.update_status(&order_id, next).ok()
    }
}

impl Handler<AddSubscriber> for Storage {
    type Result = ();

    fn handle(&mut self, msg: AddSubscriber, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "{} subscribed to order {}",
            msg.session, msg.order_id
        ));
        self.subscribers
            .entry(msg.order_id)
            .or_default()
            .insert((msg.session, msg.subscription_id), msg.sender);
    }
}

impl Handler<RemoveSubscriber> for Storage {
    type Result = ();

    fn handle(&mut self, msg: RemoveSubscriber, _ctx: &mut Self::Context) -> Self::Result {
        let key = (msg.session, msg.subscription_id);
        for subscribers in self.subscribers.values_mut() {
            subscribers.remove(&key);
        }
        self.subscribers.retain(|_, subscribers| !subscribers.is_empty());
    }
}

impl Handler<DropSession> for Storage {
    type Result = ();

    fn handle(&mut self, msg: DropSession, _ctx: &mut Self::Context) -> Self::Result {
        for subscribers in self.subscribers.values_mut() {
            subscribers.retain(|(session, _), _| *session != msg.session);
        }
        self.subscribers.retain(|_, subscribers| !subscribers.is_empty());
    }
}

impl Handler<InsertOrders> for Storage {
    type Result = ();

    fn handle(&mut self, msg: InsertOrders, _ctx: &mut Self::Context) -> Self::Result {
        for order in msg.orders {
            self.orders.insert(order.id.clone(), order);
        }
    }
}

impl Handler<ListOrders> for Storage {
    type Result = MessageResult<ListOrders>;

    fn handle(&mut self, _msg: ListOrders, _ctx: &mut Self::Context) -> Self::Result {
        let mut orders: Vec<OrderDTO> = self.orders.values().cloned().collect();
        orders.sort_by_key(|order| order.token_number);
        MessageResult(orders)
    }
}
