use chrono::{DateTime, Local, Utc};
use common::constants::{CURRENCY_SYMBOL, TOTAL_STEPS};
use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;

/// Everything the tracking page can show.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerView {
    /// No order id to track.
    Idle,
    /// Waiting for the first fetch to resolve.
    Loading,
    /// The store has no order with this id. Only action: back to menu.
    NotFound { order_id: String },
    Showing(OrderCard),
}

impl TrackerView {
    pub fn card(&self) -> Option<&OrderCard> {
        match self {
            TrackerView::Showing(card) => Some(card),
            _ => None,
        }
    }
}

/// A snapshot plus the progress state derived from its status.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub order: OrderDTO,
    pub progress: ProgressView,
}

impl OrderCard {
    pub fn new(order: OrderDTO) -> Self {
        let progress = ProgressView::from_status(&order.status);
        Self { order, progress }
    }

    pub fn title(&self) -> String {
        format!("Order #{}", self.order.token_number)
    }

    pub fn total(&self) -> String {
        format_price(self.order.total_price)
    }

    pub fn ordered_at(&self) -> String {
        format_created_at(&self.order.created_at)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub step: u8,
    /// `step / 4 * 100`.
    pub fill_percent: f32,
    pub stages: [StageLabel; 4],
    /// Celebration banner, shown only while the order is ready.
    pub show_banner: bool,
}

impl ProgressView {
    pub fn from_status(status: &OrderStatus) -> Self {
        let step = status.step();
        Self {
            step,
            fill_percent: fill_percent(step),
            stages: OrderStatus::STAGES.map(|stage| StageLabel {
                name: stage.label(),
                step: stage.step(),
                reached: step >= stage.step(),
            }),
            show_banner: status.is_ready(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLabel {
    pub name: &'static str,
    pub step: u8,
    pub reached: bool,
}

pub fn fill_percent(step: u8) -> f32 {
    f32::from(step) / f32::from(TOTAL_STEPS) * 100.0
}

/// Amount with the currency prefix, exactly as precise as the backend sent it.
pub fn format_price(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, amount)
}

/// Creation time in the host's local timezone and default format.
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%c").to_string()
}
