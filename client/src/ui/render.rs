use crate::ui::view_state::{OrderCard, TrackerView};
use colored::*;
use common::constants::PROGRESS_BAR_WIDTH;

pub const READY_BANNER: &str = "🎉 Your order is ready! Please collect it from the counter.";
pub const NOT_FOUND_HINT: &str =
    "The order you're looking for doesn't exist or you don't have access to it.";
pub const BACK_ACTION: &str = "[b] Back to Menu";

/// Text for one full screen of the tracking page.
pub fn render_view(view: &TrackerView) -> String {
    match view {
        TrackerView::Idle => "No order selected. Use `track <order_id>`.".dimmed().to_string(),
        TrackerView::Loading => "Loading...".dimmed().to_string(),
        TrackerView::NotFound { order_id } => [
            format!("{}", "Order not found".bold()),
            format!("{} ({})", NOT_FOUND_HINT, order_id),
            BACK_ACTION.to_string(),
        ]
        .join("\n"),
        TrackerView::Showing(card) => render_card(card),
    }
}

fn render_card(card: &OrderCard) -> String {
    let status = &card.order.status;
    let color = status.color();
    let mut lines = vec![
        BACK_ACTION.dimmed().to_string(),
        format!("{}  {}", status.icon(), card.title().bold()),
        format!("Status: {}", status.to_string().bold().color(color)),
        String::new(),
    ];

    let stages: Vec<String> = card
        .progress
        .stages
        .iter()
        .map(|stage| {
            if stage.reached {
                stage.name.bold().color(color).to_string()
            } else {
                stage.name.dimmed().to_string()
            }
        })
        .collect();
    lines.push(stages.join("  ›  "));
    lines.push(format!(
        "{} {}%",
        progress_bar(card.progress.fill_percent, PROGRESS_BAR_WIDTH).color(color),
        card.progress.fill_percent
    ));

    if card.progress.show_banner {
        lines.push(String::new());
        lines.push(READY_BANNER.bold().bright_green().to_string());
    }

    lines.push(String::new());
    lines.push(format!("Total Amount  {}", card.total().bold()));
    lines.push(format!("Order Time    {}", card.ordered_at()));
    lines.push(String::new());
    lines.push(
        "This page updates automatically. No need to refresh!"
            .dimmed()
            .to_string(),
    );
    lines.join("\n")
}

/// `width` cells, filled proportionally to `fill_percent`.
pub fn progress_bar(fill_percent: f32, width: usize) -> String {
    let ratio = (fill_percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
