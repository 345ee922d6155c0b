use crate::messages::internal_messages::{
    AddSubscriber, DropSession, LookupOrder, RemoveSubscriber,
};
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::errors::StoreError;
use common::logger::Logger;
use common::messages::shared_messages::NetworkMessage;
use common::messages::store_messages::{
    FetchFailed, FetchOrder, OrderFound, OrderNotFound, Subscribe, SubscribeAck, Unsubscribe,
};
use common::network::communicator::Communicator;
use std::net::SocketAddr;
use tokio::net::TcpStream;

/// One connected tracker.
///
/// Answers its fetches from the `Storage` and registers its subscriptions
/// there, so pushes go straight from the `Storage` to this connection's
/// sender.
pub struct Session {
    pub peer_addr: SocketAddr,
    pub communicator: Communicator,
    pub storage: Addr<Storage>,
    pub logger: Logger,
}

impl Session {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr, storage: Addr<Storage>) -> Addr<Self> {
        Session::create(move |ctx| Session {
            peer_addr,
            communicator: Communicator::new(stream, peer_addr, ctx.address().recipient()),
            storage,
            logger: Logger::new(format!("Session {}", peer_addr), Color::Blue),
        })
    }

    fn answer_fetch(&mut self, msg: FetchOrder, ctx: &mut Context<Self>) {
        self.logger
            .debug(format!("Fetch #{} for order {}", msg.request_id, msg.order_id));
        let request_id = msg.request_id;
        let lookup = self.storage.send(LookupOrder {
            order_id: msg.order_id.clone(),
        });
        ctx.spawn(lookup.into_actor(self).map(move |result, act, _ctx| {
            let reply = match result {
                Ok(Ok(order)) => NetworkMessage::OrderFound(OrderFound { request_id, order }),
                Ok(Err(StoreError::NotFound(order_id))) => {
                    NetworkMessage::OrderNotFound(OrderNotFound {
                        request_id,
                        order_id,
                    })
                }
                Ok(Err(e)) => NetworkMessage::FetchFailed(FetchFailed {
                    request_id,
                    reason: e.to_string(),
                }),
                Err(e) => NetworkMessage::FetchFailed(FetchFailed {
                    request_id,
                    reason: e.to_string(),
                }),
            };
            act.communicator.send(reply);
        }));
    }

    fn open_subscription(&mut self, msg: Subscribe) {
        self.storage.do_send(AddSubscriber {
            session: self.peer_addr,
            subscription_id: msg.subscription_id,
            order_id: msg.order_id,
            sender: self.communicator.sender.clone().recipient(),
        });
        self.communicator
            .send(NetworkMessage::SubscribeAck(SubscribeAck {
                subscription_id: msg.subscription_id,
            }));
    }

    fn close_subscription(&mut self, msg: Unsubscribe) {
        self.storage.do_send(RemoveSubscriber {
            session: self.peer_addr,
            subscription_id: msg.subscription_id,
        });
    }
}

impl Actor for Session {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("Tracker connected");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.storage.do_send(DropSession {
            session: self.peer_addr,
        });
        self.communicator.shutdown();
    }
}

impl Handler<NetworkMessage> for Session {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::FetchOrder(fetch) => self.answer_fetch(fetch, ctx),
            NetworkMessage::Subscribe(subscribe) => self.open_subscription(subscribe),
            NetworkMessage::Unsubscribe(unsubscribe) => self.close_subscription(unsubscribe),
            NetworkMessage::ConnectionClosed(_) => {
                self.logger.info("Tracker disconnected");
                ctx.stop();
            }
            other => self
                .logger
                .warn(format!("Ignoring unexpected message {:?}", other)),
        }
    }
}
