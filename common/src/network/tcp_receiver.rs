use crate::logger::Logger;
use crate::messages::shared_messages::{ConnectionClosed, NetworkMessage, Shutdown};
use actix::prelude::*;
use colored::Color;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, BufReader, ReadHalf};
use tokio::net::TcpStream;
use tokio_stream::wrappers::SplitStream;

/// Reads JSON lines from the peer and forwards each decoded
/// [`NetworkMessage`] to `destination`. When the peer closes the socket the
/// destination receives a `ConnectionClosed`.
pub struct TCPReceiver {
    remote_addr: SocketAddr,
    reader: Option<BufReader<ReadHalf<TcpStream>>>,
    destination: Recipient<NetworkMessage>,
    logger: Logger,
}

impl TCPReceiver {
    pub fn new(
        reader: ReadHalf<TcpStream>,
        remote_addr: SocketAddr,
        destination: Recipient<NetworkMessage>,
    ) -> Self {
        Self {
            remote_addr,
            reader: Some(BufReader::new(reader)),
            destination,
            logger: Logger::new("TCPReceiver", Color::White),
        }
    }

    fn close(&mut self, ctx: &mut Context<Self>) {
        self.destination
            .do_send(NetworkMessage::ConnectionClosed(ConnectionClosed {
                remote_addr: self.remote_addr,
            }));
        ctx.stop();
    }
}

impl Actor for TCPReceiver {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if let Some(reader) = self.reader.take() {
            ctx.add_stream(SplitStream::new(reader.split(b'\n')));
        }
    }
}

impl StreamHandler<Result<Vec<u8>, io::Error>> for TCPReceiver {
    fn handle(&mut self, item: Result<Vec<u8>, io::Error>, ctx: &mut Self::Context) {
        let bytes = match item {
            Ok(bytes) => bytes,
            Err(e) => {
                self.logger
                    .warn(format!("Error reading from {}: {}", self.remote_addr, e));
                self.close(ctx);
                return;
            }
        };
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                self.logger.warn(format!(
                    "Discarding non UTF-8 line from {}: {}",
                    self.remote_addr, e
                ));
                return;
            }
        };
        if line.trim().is_empty() {
            return;
        }
        match serde_json::from_str::<NetworkMessage>(&line) {
            Ok(msg) => self.destination.do_send(msg),
            Err(e) => self.logger.warn(format!(
                "Discarding undecodable line from {}: {} ({})",
                self.remote_addr, line, e
            )),
        }
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        self.logger
            .debug(format!("Connection closed by {}", self.remote_addr));
        self.close(ctx);
    }
}

impl Handler<Shutdown> for TCPReceiver {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) {
        ctx.stop();
    }
}
