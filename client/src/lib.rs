pub mod client_actors;
pub mod commands;
pub mod config;
pub mod messages;
pub mod navigator;
pub mod notifier;
pub mod store;
pub mod ui;
