use crate::messages::shared_messages::{NetworkMessage, Shutdown};
use crate::network::tcp_receiver::TCPReceiver;
use crate::network::tcp_sender::TCPSender;
use actix::prelude::*;
use std::net::SocketAddr;
use tokio::io::split;
use tokio::net::TcpStream;

/// Both halves of one TCP connection, each driven by its own actor.
///
/// Incoming messages go to the `destination` recipient given at creation.
/// Must be created from inside a running actix system.
#[derive(Clone)]
pub struct Communicator {
    pub sender: Addr<TCPSender>,
    pub receiver: Addr<TCPReceiver>,
    pub peer_addr: SocketAddr,
}

impl Communicator {
    pub fn new(
        tcp_stream: TcpStream,
        peer_addr: SocketAddr,
        destination: Recipient<NetworkMessage>,
    ) -> Self {
        let (read_half, write_half) = split(tcp_stream);
        Self {
            sender: TCPSender::new(write_half).start(),
            receiver: TCPReceiver::new(read_half, peer_addr, destination).start(),
            peer_addr,
        }
    }

    pub fn send(&self, msg: NetworkMessage) {
        self.sender.do_send(msg);
    }

    pub fn shutdown(&self) {
        self.sender.do_send(Shutdown);
        self.receiver.do_send(Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::store_messages::{FetchOrder, SubscribeAck};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    struct Inbox {
        received: Arc<Mutex<Vec<NetworkMessage>>>,
    }

    impl Actor for Inbox {
        type Context = Context<Self>;
    }

    impl Handler<NetworkMessage> for Inbox {
        type Result = ();

        fn handle(&mut self, msg: NetworkMessage, _ctx: &mut Self::Context) {
            self.received.lock().unwrap().push(msg);
        }
    }

    fn inbox() -> (Recipient<NetworkMessage>, Arc<Mutex<Vec<NetworkMessage>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let addr = Inbox {
            received: received.clone(),
        }
        .start();
        (addr.recipient(), received)
    }

    async fn socket_pair() -> (TcpStream, TcpStream, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        (client, server, addr)
    }

    #[actix_rt::test]
    async fn messages_cross_the_wire_in_order() {
        let (client, server, addr) = socket_pair().await;
        let (client_inbox, _) = inbox();
        let (server_inbox, received) = inbox();
        let client = Communicator::new(client, addr, client_inbox);
        let _server = Communicator::new(server, addr, server_inbox);

        for request_id in 1..=3 {
            client.send(NetworkMessage::FetchOrder(FetchOrder {
                request_id,
                order_id: "abc123".to_string(),
            }));
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        let ids: Vec<u64> = received
            .lock()
            .unwrap()
            .iter()
            .filter_map(|msg| match msg {
                NetworkMessage::FetchOrder(fetch) => Some(fetch.request_id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[actix_rt::test]
    async fn garbage_is_skipped_and_close_is_reported() {
        let (mut client, server, addr) = socket_pair().await;
        let (server_inbox, received) = inbox();
        let _server = Communicator::new(server, addr, server_inbox);

        let ack = serde_json::to_string(&NetworkMessage::SubscribeAck(SubscribeAck {
            subscription_id: 9,
        }))
        .unwrap();
        client
            .write_all(format!("not json\n\n{}\n", ack).as_bytes())
            .await
            .unwrap();
        client.write_all(b"\xff\xfe{}\n").await.unwrap();
        client
            .write_all(format!("{}\r\n", ack).as_bytes())
            .await
            .unwrap();
        drop(client);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let received = received.lock().unwrap().clone();
        let ack = NetworkMessage::SubscribeAck(SubscribeAck { subscription_id: 9 });
        assert_eq!(received.len(), 3);
        assert_eq!(received[0], ack);
        assert_eq!(received[1], ack);
        assert!(matches!(received[2], NetworkMessage::ConnectionClosed(_)));
    }
}
