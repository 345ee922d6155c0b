use crate::server_actors::session::Session;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accepts tracker connections and hands each one to a new `Session`.
pub struct Acceptor {
    pub addr: SocketAddr,
    pub storage: Addr<Storage>,
    pub logger: Arc<Logger>,
}

impl Acceptor {
    pub fn new(addr: SocketAddr, storage: Addr<Storage>) -> Self {
        Self {
            addr,
            storage,
            logger: Arc::new(Logger::new("Acceptor", Color::Green)),
        }
    }

    pub async fn start(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.logger
            .info(format!("Acceptor started, listening on {}", self.addr));
        self.accept_connections(listener).await
    }

    async fn accept_connections(&self, listener: TcpListener) -> std::io::Result<()> {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    self.logger
                        .info(format!("Accepted connection from {}", peer_addr));
                    Session::new(stream, peer_addr, self.storage.clone());
                }
                Err(e) => {
                    self.logger
                        .warn(format!("Failed to accept connection: {}", e));
                }
            }
        }
    }
}
