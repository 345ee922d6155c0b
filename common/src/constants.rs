use std::time::Duration;

pub const SERVER_IP_ADDRESS: &str = "127.0.0.1";
pub const BASE_PORT: u16 = 8080;

/// How often the tracker re-fetches the order it is watching.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Max wait for the store to answer a single fetch.
pub const TIMEOUT_SECONDS: u64 = 2;
/// Connection attempts made after the store drops the socket.
pub const RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_DELAY: Duration = Duration::from_millis(500);

/// Probability that the reference store answers a fetch instead of
/// simulating a transient backend failure.
pub const FETCH_SUCCESS_PROBABILITY: f32 = 0.9;
/// Seconds between two status advances performed by the store's kitchen.
pub const STATUS_ADVANCE_SECONDS: u64 = 8;
/// Extra randomly named orders seeded by the store at startup.
pub const DEMO_ORDERS: usize = 2;

pub const CURRENCY_SYMBOL: &str = "₹";
/// Number of stages along the status sequence (queued .. delivered).
pub const TOTAL_STEPS: u8 = 4;
pub const PROGRESS_BAR_WIDTH: usize = 20;

pub const POLL_INTERVAL_ENV: &str = "TRACKER_POLL_MS";
pub const STORE_ADDR_ENV: &str = "STORE_ADDR";
pub const LOG_VERBOSE_ENV: &str = "LOG_VERBOSE";
