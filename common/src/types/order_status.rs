use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an order is along the kitchen sequence.
///
/// The four known stages are ordered `Queued < Preparing < Ready < Delivered`.
/// Anything else the backend sends, including an empty value, is kept
/// verbatim in `Unknown` so decoding never fails on a new status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Accepted, waiting for the kitchen.
    Queued,
    /// Being cooked.
    Preparing,
    /// Waiting at the counter for pickup.
    Ready,
    /// Handed over to the customer.
    Delivered,
    Unknown(String),
}

impl OrderStatus {
    /// Known stages in progression order.
    pub const STAGES: [OrderStatus; 4] = [
        OrderStatus::Queued,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Wire representation, lowercase.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Queued => "queued",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unknown(raw) => raw,
        }
    }

    /// Position along the sequence, `1..=4` for known stages and `0` otherwise.
    pub fn step(&self) -> u8 {
        match self {
            OrderStatus::Queued => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Unknown(_) => 0,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            OrderStatus::Queued => Color::BrightYellow,
            OrderStatus::Preparing => Color::BrightBlue,
            OrderStatus::Ready => Color::BrightGreen,
            OrderStatus::Delivered => Color::BrightMagenta,
            OrderStatus::Unknown(_) => Color::BrightBlack,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OrderStatus::Queued => "⏱",
            OrderStatus::Preparing => "🍳",
            OrderStatus::Ready => "📦",
            OrderStatus::Delivered => "✅",
            OrderStatus::Unknown(_) => "❔",
        }
    }

    /// Human label used for stage names.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Queued => "Queued",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Unknown(_) => "Unknown",
        }
    }

    /// Following stage, `None` once delivered or when the status is unknown.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Queued => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Unknown(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OrderStatus::Ready)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Unknown(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => OrderStatus::Queued,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Unknown(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Unknown(raw) if !raw.is_empty() => write!(f, "{}", raw),
            other => write!(f, "{}", other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::test_case;

    #[test_case(0, 1)]
    #[test_case(1, 2)]
    #[test_case(2, 3)]
    #[test_case(3, 4)]
    fn known_stages_have_their_documented_step(index: usize, expected: u8) {
        assert_eq!(OrderStatus::STAGES[index].step(), expected);
    }

    #[test]
    fn steps_increase_along_the_sequence() {
        let steps: Vec<u8> = OrderStatus::STAGES.iter().map(|s| s.step()).collect();
        assert!(steps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn unrecognised_values_map_to_step_zero() {
        for raw in ["", "cancelled", "READY", "ready "] {
            let status = OrderStatus::from(raw);
            assert_eq!(status, OrderStatus::Unknown(raw.to_string()));
            assert_eq!(status.step(), 0);
            assert_eq!(status.icon(), "❔");
            assert_eq!(status.color(), Color::BrightBlack);
        }
    }

    #[test]
    fn serde_uses_lowercase_strings() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }

    #[test]
    fn unknown_status_survives_a_decode() {
        let parsed: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unknown("on_hold".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"on_hold\"");
    }

    #[test]
    fn next_stops_after_delivered() {
        assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::default().next(), None);
    }

    #[test]
    fn display_falls_back_to_unknown_label() {
        assert_eq!(OrderStatus::Ready.to_string(), "Ready");
        assert_eq!(OrderStatus::default().to_string(), "Unknown");
        assert_eq!(OrderStatus::from("on_hold").to_string(), "on_hold");
    }
}
