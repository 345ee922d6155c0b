use actix::prelude::*;
use client::client_actors::order_tracker::OrderTracker;
use client::client_actors::ui_handler::UIHandler;
use client::commands::{Command, parse_command};
use client::config::TrackerConfig;
use client::messages::internal_messages::{GoBack, TrackOrder};
use client::navigator::ConsoleNavigator;
use client::notifier::ConsoleNotifier;
use client::store::remote_store::RemoteStore;
use colored::Color;
use common::logger::Logger;
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;
use tokio::sync::Notify;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = match TrackerConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} <order_id> [store_addr]", args[0]);
            std::process::exit(1);
        }
    };
    let logger = Logger::new("Client", Color::Cyan);

    let store = match RemoteStore::connect(config.store_addr, config.request_timeout).await {
        Ok(store) => store,
        Err(e) => {
            logger.error(format!(
                "Unable to reach the order store at {}: {}",
                config.store_addr, e
            ));
            return Err(e);
        }
    };

    let back_to_menu = Arc::new(Notify::new());
    let ui = UIHandler::new().start();
    let tracker = OrderTracker::new(
        config.order_id.clone(),
        Arc::new(store),
        Arc::new(ConsoleNotifier::new()),
        Arc::new(ConsoleNavigator::new(back_to_menu.clone())),
    )
    .with_poll_interval(config.poll_interval)
    .with_view_sink(ui.recipient())
    .start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = ctrl_c() => {
                logger.info("Ctrl-C received, shutting down...");
                break;
            }
            _ = back_to_menu.notified() => break,
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Command::Back => tracker.do_send(GoBack),
                    Command::Track(order_id) => tracker.do_send(TrackOrder { order_id }),
                    Command::Quit => break,
                    Command::Unknown(raw) if raw.is_empty() => {}
                    Command::Unknown(raw) => logger.warn(format!("Unknown command `{}`", raw)),
                },
                Ok(None) | Err(_) => stdin_open = false,
            },
        }
    }

    System::current().stop();
    Ok(())
}
