use crate::messages::internal_messages::{
    CloseSubscription, OpenSubscription, OrderPushed, RequestOrder,
};
use crate::store::SubscriptionHandle;
use actix::fut::wrap_future;
use actix::prelude::*;
use colored::Color;
use common::constants::{RECONNECT_ATTEMPTS, RECONNECT_DELAY};
use common::errors::StoreError;
use common::logger::Logger;
use common::messages::shared_messages::NetworkMessage;
use common::messages::store_messages::{FetchOrder, Subscribe, Unsubscribe};
use common::network::communicator::Communicator;
use common::types::dtos::OrderDTO;
use futures_channel::oneshot;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

type FetchReply = Result<Option<OrderDTO>, StoreError>;

/// Owns the TCP connection to the order store.
///
/// Fetches are matched to their answers by `request_id`; pushes are fanned
/// out to every local subscriber of the pushed order. When the store drops
/// the socket, fetches in flight fail and the connection is re-established,
/// re-sending every live subscription.
pub struct StoreConnection {
    /// Communicator with the store, created once the actor has an address.
    pub communicator: Option<Communicator>,
    /// Holds the stream until the actor starts.
    pub pending_stream: Option<TcpStream>,
    pub peer_addr: SocketAddr,
    pending_fetches: HashMap<u64, oneshot::Sender<FetchReply>>,
    subscriptions: HashMap<u64, (String, Recipient<OrderPushed>)>,
    next_request_id: u64,
    next_subscription_id: u64,
    request_timeout: Duration,
    reconnecting: bool,
    pub logger: Logger,
}

/// Tries to reach the store a few times before giving up.
pub async fn try_to_connect(addr: SocketAddr) -> Option<TcpStream> {
    for attempt in 1..=RECONNECT_ATTEMPTS {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Some(stream),
            Err(_) if attempt < RECONNECT_ATTEMPTS => tokio::time::sleep(RECONNECT_DELAY).await,
            Err(_) => {}
        }
    }
    None
}

impl StoreConnection {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr, request_timeout: Duration) -> Self {
        Self {
            communicator: None,
            pending_stream: Some(stream),
            peer_addr,
            pending_fetches: HashMap::new(),
            subscriptions: HashMap::new(),
            next_request_id: 1,
            next_subscription_id: 1,
            request_timeout,
            reconnecting: false,
            logger: Logger::new("Store link", Color::Magenta),
        }
    }

    fn attach(&mut self, stream: TcpStream, ctx: &mut Context<Self>) {
        self.communicator = Some(Communicator::new(
            stream,
            self.peer_addr,
            ctx.address().recipient(),
        ));
        self.logger
            .info(format!("Connected to the order store at {}", self.peer_addr));
    }

    fn send(&self, msg: NetworkMessage) {
        if let Some(communicator) = &self.communicator {
            communicator.send(msg);
        }
    }

    fn resubscribe(&self) {
        let Some(communicator) = &self.communicator else {
            return;
        };
        for (subscription_id, (order_id, _)) in &self.subscriptions {
            communicator.send(NetworkMessage::Subscribe(Subscribe {
                subscription_id: *subscription_id,
                order_id: order_id.clone(),
            }));
        }
    }

    fn reconnect(&mut self, ctx: &mut Context<Self>) {
        if self.reconnecting {
            return;
        }
        self.reconnecting = true;
        let addr = self.peer_addr;
        let fut = wrap_future::<_, Self>(try_to_connect(addr)).map(|stream, act, ctx| {
            act.reconnecting = false;
            match stream {
                Some(stream) => {
                    act.attach(stream, ctx);
                    act.resubscribe();
                }
                None => act.logger.error(format!(
                    "Unable to reconnect to {}, will retry on the next request",
                    act.peer_addr
                )),
            }
        });
        ctx.spawn(fut);
    }

    fn resolve(&mut self, request_id: u64, reply: FetchReply) {
        match self.pending_fetches.remove(&request_id) {
            Some(tx) => {
                // The requester may have timed out already.
                let _ = tx.send(reply);
            }
            None => self
                .logger
                .debug(format!("Late answer for request {}", request_id)),
        }
    }

    fn fan_out(&mut self, order: OrderDTO) {
        let mut closed = Vec::new();
        for (subscription_id, (order_id, recipient)) in &self.subscriptions {
            if *order_id != order.id {
                continue;
            }
            match recipient.try_send(OrderPushed {
                order: order.clone(),
            }) {
                Ok(()) => {}
                Err(SendError::Closed(_)) => closed.push(*subscription_id),
                Err(SendError::Full(_)) => self.logger.warn(format!(
                    "Subscriber {} is full, dropping update for {}",
                    subscription_id, order.id
                )),
            }
        }
        // Subscribers that went away without unsubscribing.
        for subscription_id in closed {
            self.drop_subscription(subscription_id);
        }
    }

    fn drop_subscription(&mut self, subscription_id: u64) {
        if self.subscriptions.remove(&subscription_id).is_some() {
            self.send(NetworkMessage::Unsubscribe(Unsubscribe { subscription_id }));
        }
    }

    fn connection_lost(&mut self, ctx: &mut Context<Self>) {
        self.logger
            .warn(format!("Lost connection to the order store at {}", self.peer_addr));
        for (_, tx) in self.pending_fetches.drain() {
            let _ = tx.send(Err(StoreError::Disconnected));
        }
        if let Some(communicator) = self.communicator.take() {
            communicator.shutdown();
        }
        self.reconnect(ctx);
    }
}

impl Actor for StoreConnection {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if let Some(stream) = self.pending_stream.take() {
            self.attach(stream, ctx);
        } else {
            self.logger.error("No stream available");
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(communicator) = self.communicator.take() {
            communicator.shutdown();
        }
    }
}

impl Handler<RequestOrder> for StoreConnection {
    type Result = ResponseFuture<FetchReply>;

    fn handle(&mut self, msg: RequestOrder, ctx: &mut Self::Context) -> Self::Result {
        if self.communicator.is_none() {
            self.reconnect(ctx);
            return Box::pin(async { Err(StoreError::Disconnected) });
        }
        self.pending_fetches.retain(|_, tx| !tx.is_canceled());

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let (tx, rx) = oneshot::channel();
        self.pending_fetches.insert(request_id, tx);
        self.send(NetworkMessage::FetchOrder(FetchOrder {
            request_id,
            order_id: msg.order_id,
        }));

        let timeout = self.request_timeout;
        Box::pin(async move {
            match tokio::time::timeout(timeout, rx).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(_)) => Err(StoreError::Disconnected),
                Err(_) => Err(StoreError::FetchFailed(format!(
                    "no answer within {:?}",
                    timeout
                ))),
            }
        })
    }
}

impl Handler<OpenSubscription> for StoreConnection {
    type Result = Result<SubscriptionHandle, StoreError>;

    fn handle(&mut self, msg: OpenSubscription, ctx: &mut Self::Context) -> Self::Result {
        let subscription_id = self.next_subscription_id;
        self.next_subscription_id += 1;
        if self.communicator.is_some() {
            self.send(NetworkMessage::Subscribe(Subscribe {
                subscription_id,
                order_id: msg.order_id.clone(),
            }));
        } else {
            // Sent by `resubscribe` once the link is back.
            self.reconnect(ctx);
        }
        self.subscriptions
            .insert(subscription_id, (msg.order_id.clone(), msg.on_change));
        Ok(SubscriptionHandle {
            id: subscription_id,
            order_id: msg.order_id,
        })
    }
}

impl Handler<CloseSubscription> for StoreConnection {
    type Result = ();

    fn handle(&mut self, msg: CloseSubscription, _ctx: &mut Self::Context) -> Self::Result {
        self.drop_subscription(msg.handle.id);
    }
}

impl Handler<NetworkMessage> for StoreConnection {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::OrderFound(found) => self.resolve(found.request_id, Ok(Some(found.order))),
            NetworkMessage::OrderNotFound(missing) => self.resolve(missing.request_id, Ok(None)),
            NetworkMessage::FetchFailed(failed) => self.resolve(
                failed.request_id,
                Err(StoreError::FetchFailed(failed.reason)),
            ),
            NetworkMessage::OrderUpdated(update) => self.fan_out(update.order),
            NetworkMessage::SubscribeAck(ack) => self
                .logger
                .debug(format!("Store confirmed subscription {}", ack.subscription_id)),
            NetworkMessage::ConnectionClosed(_) => self.connection_lost(ctx),
            other => self
                .logger
                .warn(format!("Unexpected message from the store: {:?}", other)),
        }
    }
}
