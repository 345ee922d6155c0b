use crate::client_actors::store_connection::StoreConnection;
use crate::messages::internal_messages::{
    CloseSubscription, OpenSubscription, OrderPushed, RequestOrder,
};
use crate::store::{OrderStore, SubscriptionHandle};
use actix::prelude::*;
use async_trait::async_trait;
use common::errors::StoreError;
use common::types::dtos::OrderDTO;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// [`OrderStore`] backed by the order store server over TCP.
#[derive(Clone)]
pub struct RemoteStore {
    connection: Addr<StoreConnection>,
}

impl RemoteStore {
    /// Connects to `addr`. Must run inside an actix system.
    pub async fn connect(addr: SocketAddr, request_timeout: Duration) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let peer_addr = stream.peer_addr()?;
        Ok(Self {
            connection: StoreConnection::new(stream, peer_addr, request_timeout).start(),
        })
    }
}

#[async_trait]
impl OrderStore for RemoteStore {
    async fn fetch_order(&self, order_id: &str) -> Result<Option<OrderDTO>, StoreError> {
        self.connection
            .send(RequestOrder {
                order_id: order_id.to_string(),
            })
            .await
            .map_err(|e| StoreError::FetchFailed(e.to_string()))?
    }

    async fn subscribe(
        &self,
        order_id: &str,
        on_change: Recipient<OrderPushed>,
    ) -> Result<SubscriptionHandle, StoreError> {
        self.connection
            .send(OpenSubscription {
                order_id: order_id.to_string(),
                on_change,
            })
            .await
            .map_err(|_| StoreError::SubscribeFailed(order_id.to_string()))?
    }

    async fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.connection.do_send(CloseSubscription { handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::messages::shared_messages::NetworkMessage;
    use common::messages::store_messages::*;
    use common::types::order_status::OrderStatus;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    fn order(id: &str, status: OrderStatus) -> OrderDTO {
        OrderDTO::new(id, 42, status, 250.0, Utc::now())
    }

    type Reply = fn(NetworkMessage) -> Vec<NetworkMessage>;

    /// Answers every request read from `stream` with `reply`.
    async fn serve(stream: TcpStream, reply: Reply, log: Arc<Mutex<Vec<NetworkMessage>>>) {
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let msg: NetworkMessage = serde_json::from_str(&line).unwrap();
            log.lock().unwrap().push(msg.clone());
            for answer in reply(msg) {
                let out = format!("{}\n", serde_json::to_string(&answer).unwrap());
                if write.write_all(out.as_bytes()).await.is_err() {
                    return;
                }
            }
        }
    }

    /// One-connection store that answers every request with `reply`.
    async fn fake_store(reply: Reply) -> (SocketAddr, Arc<Mutex<Vec<NetworkMessage>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();
        actix::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            serve(stream, reply, log).await;
        });
        (addr, received)
    }

    fn answer_known_orders(msg: NetworkMessage) -> Vec<NetworkMessage> {
        match msg {
            NetworkMessage::FetchOrder(FetchOrder {
                request_id,
                order_id,
            }) if order_id == "abc123" => vec![NetworkMessage::OrderFound(OrderFound {
                request_id,
                order: order("abc123", OrderStatus::Queued),
            })],
            NetworkMessage::FetchOrder(FetchOrder {
                request_id,
                order_id,
            }) => vec![NetworkMessage::OrderNotFound(OrderNotFound {
                request_id,
                order_id,
            })],
            NetworkMessage::Subscribe(Subscribe {
                subscription_id,
                order_id,
            }) => vec![
                NetworkMessage::SubscribeAck(SubscribeAck { subscription_id }),
                NetworkMessage::OrderUpdated(OrderUpdated {
                    order: order("other", OrderStatus::Ready),
                }),
                NetworkMessage::OrderUpdated(OrderUpdated {
                    order: order(&order_id, OrderStatus::Ready),
                }),
            ],
            _ => Vec::new(),
        }
    }

    struct PushRecorder {
        pushes: Arc<Mutex<Vec<OrderDTO>>>,
    }

    impl Actor for PushRecorder {
        type Context = Context<Self>;
    }

    impl Handler<OrderPushed> for PushRecorder {
        type Result = ();

        fn handle(&mut self, msg: OrderPushed, _ctx: &mut Self::Context) {
            self.pushes.lock().unwrap().push(msg.order);
        }
    }

    #[actix_rt::test]
    async fn fetch_distinguishes_found_and_not_found() {
        let (addr, _) = fake_store(answer_known_orders).await;
        let store = RemoteStore::connect(addr, Duration::from_secs(1)).await.unwrap();

        let found = store.fetch_order("abc123").await.unwrap();
        assert_eq!(found.unwrap().status, OrderStatus::Queued);
        assert_eq!(store.fetch_order("zzz").await, Ok(None));
    }

    #[actix_rt::test]
    async fn unanswered_fetch_times_out_as_transient() {
        let (addr, _) = fake_store(|_| Vec::new()).await;
        let store = RemoteStore::connect(addr, Duration::from_millis(100)).await.unwrap();

        match store.fetch_order("abc123").await {
            Err(StoreError::FetchFailed(_)) => {}
            other => panic!("expected a transient failure, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn backend_failures_are_reported() {
        let (addr, _) = fake_store(|msg| match msg {
            NetworkMessage::FetchOrder(fetch) => vec![NetworkMessage::FetchFailed(FetchFailed {
                request_id: fetch.request_id,
                reason: "hiccup".to_string(),
            })],
            _ => Vec::new(),
        })
        .await;
        let store = RemoteStore::connect(addr, Duration::from_secs(1)).await.unwrap();

        assert_eq!(
            store.fetch_order("abc123").await,
            Err(StoreError::FetchFailed("hiccup".to_string()))
        );
    }

    #[actix_rt::test]
    async fn pushes_reach_only_subscribers_of_that_order() {
        let (addr, received) = fake_store(answer_known_orders).await;
        let store = RemoteStore::connect(addr, Duration::from_secs(1)).await.unwrap();
        let pushes = Arc::new(Mutex::new(Vec::new()));
        let recorder = PushRecorder {
            pushes: pushes.clone(),
        }
        .start();

        let handle = store
            .subscribe("abc123", recorder.recipient())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let pushed = pushes.lock().unwrap().clone();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].id, "abc123");
        assert_eq!(pushed[0].status, OrderStatus::Ready);

        store.unsubscribe(handle.clone()).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(received.lock().unwrap().contains(&NetworkMessage::Unsubscribe(
            Unsubscribe {
                subscription_id: handle.id
            }
        )));
    }

    #[actix_rt::test]
    async fn closed_connection_fails_fetches() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        actix::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            drop(stream);
        });
        let store = RemoteStore::connect(addr, Duration::from_millis(200)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.fetch_order("abc123").await.is_err());
    }

    #[actix_rt::test]
    async fn link_recovers_when_the_store_drops_the_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();
        actix::spawn(async move {
            // The first connection is closed without reading from it.
            let (first, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
            drop(first);
            while let Ok((stream, _)) = listener.accept().await {
                actix::spawn(serve(stream, answer_known_orders, log.clone()));
            }
        });
        let store = RemoteStore::connect(addr, Duration::from_secs(1)).await.unwrap();
        let pushes = Arc::new(Mutex::new(Vec::new()));
        let recorder = PushRecorder {
            pushes: pushes.clone(),
        }
        .start();
        let handle = store
            .subscribe("abc123", recorder.recipient())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(300)).await;

        for _ in 0..3 {
            let found = store.fetch_order("abc123").await.unwrap();
            assert_eq!(found.unwrap().status, OrderStatus::Queued);
        }
        assert!(received.lock().unwrap().contains(&NetworkMessage::Subscribe(
            Subscribe {
                subscription_id: handle.id,
                order_id: "abc123".to_string(),
            }
        )));
        let pushed = pushes.lock().unwrap().clone();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].status, OrderStatus::Ready);
    }
}
