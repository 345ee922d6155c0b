mod commands;
mod messages;
mod seed;
mod server_acceptor;
mod server_actors;

use crate::commands::{OperatorCommand, parse_operator_command};
use crate::messages::internal_messages::{InsertOrders, ListOrders, SetOrderStatus};
use crate::seed::demo_orders;
use crate::server_acceptor::acceptor::Acceptor;
use crate::server_actors::kitchen::Kitchen;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::constants::{DEMO_ORDERS, FETCH_SUCCESS_PROBABILITY, STATUS_ADVANCE_SECONDS};
use common::logger::Logger;
use common::utils::default_store_addr;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

async fn run_operator_command(storage: &Addr<Storage>, logger: &Logger, command: OperatorCommand) {
    match command {
        OperatorCommand::SetStatus { order_id, status } => {
            match storage.send(SetOrderStatus { order_id, status }).await {
                Ok(Ok(order)) => logger.success(format!("Order {} is now {}", order.id, order.status)),
                Ok(Err(e)) => logger.warn(e.to_string()),
                Err(e) => logger.error(format!("Storage unreachable: {}", e)),
            }
        }
        OperatorCommand::List => match storage.send(ListOrders).await {
            Ok(orders) => {
                for order in orders {
                    logger.info(format!(
                        "#{:<4} {:<10} {}",
                        order.token_number, order.id, order.status
                    ));
                }
            }
            Err(e) => logger.error(format!("Storage unreachable: {}", e)),
        },
        OperatorCommand::Invalid(raw) if raw.is_empty() => {}
        OperatorCommand::Invalid(raw) => logger.warn(format!(
            "Invalid command `{}` (try `set <id> <status>` or `list`)",
            raw
        )),
        OperatorCommand::Quit => {}
    }
}

#[actix::main]
async fn main() -> std::io::Result<()> {
    let logger = Logger::new("Order store", Color::Green);
    let args: Vec<String> = env::args().collect();
    let addr: SocketAddr = match args.get(1) {
        Some(port) => match port.parse::<u16>() {
            Ok(port) => SocketAddr::new(default_store_addr().ip(), port),
            Err(_) => {
                eprintln!("Usage: {} [port]", args[0]);
                std::process::exit(1);
            }
        },
        None => default_store_addr(),
    };

    let storage = Storage::new(FETCH_SUCCESS_PROBABILITY).start();
    let orders = demo_orders(DEMO_ORDERS);
    for order in &orders {
        logger.info(format!(
            "Seeded order {} (#{}, {})",
            order.id, order.token_number, order.status
        ));
    }
    if storage.send(InsertOrders { orders }).await.is_err() {
        logger.error("Storage stopped before seeding");
        return Ok(());
    }
    let _kitchen =
        Kitchen::new(storage.clone(), Duration::from_secs(STATUS_ADVANCE_SECONDS)).start();

    let acceptor = Acceptor::new(addr, storage.clone());
    let accepting = acceptor.start();
    tokio::pin!(accepting);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            result = &mut accepting => {
                if let Err(e) = &result {
                    logger.error(format!("Unable to listen on {}: {}", addr, e));
                }
                System::current().stop();
                return result;
            }
            _ = ctrl_c() => {
                logger.info("Ctrl-C received, shutting down...");
                break;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_operator_command(&line) {
                    OperatorCommand::Quit => break,
                    command => run_operator_command(&storage, &logger, command).await,
                },
                Ok(None) | Err(_) => stdin_open = false,
            },
        }
    }

    System::current().stop();
    Ok(())
}
