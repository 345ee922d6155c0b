pub mod shared_messages;
pub mod store_messages;

pub use shared_messages::*;
pub use store_messages::*;
