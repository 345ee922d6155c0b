pub mod kitchen;
pub mod session;
pub mod storage;
