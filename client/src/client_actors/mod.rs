pub mod order_tracker;
pub mod store_connection;
pub mod ui_handler;
