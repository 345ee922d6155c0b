use chrono::{Duration, Utc};
use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;
use uuid::Uuid;

/// Orders the store starts with: two well-known ones plus `extra`
/// randomly named ones.
pub fn demo_orders(extra: usize) -> Vec<OrderDTO> {
    let now = Utc::now();
    let mut orders = vec![
        OrderDTO::new(
            "abc123",
            42,
            OrderStatus::Queued,
            250.0,
            now - Duration::minutes(5),
        ),
        OrderDTO::new(
            "def456",
            43,
            OrderStatus::Preparing,
            120.5,
            now - Duration::minutes(12),
        ),
    ];
    for i in 0..extra {
        let id = Uuid::new_v4().simple().to_string()[..8].to_string();
        orders.push(OrderDTO::new(
            id,
            44 + i as u32,
            OrderStatus::Queued,
            99.0 + 10.0 * i as f64,
            now,
        ));
    }
    orders
}
