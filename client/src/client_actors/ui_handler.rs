use crate::messages::internal_messages::ShowView;
use crate::ui::render::render_view;
use crate::ui::view_state::TrackerView;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;

/// Actor UIHandler: prints the tracking page whenever the view changes.
pub struct UIHandler {
    last_view: Option<TrackerView>,
    pub logger: Logger,
}

impl UIHandler {
    pub fn new() -> Self {
        UIHandler {
            last_view: None,
            logger: Logger::new("UI", Color::Blue),
        }
    }

    /// Whether `view` differs from what is already on screen.
    fn is_new(&self, view: &TrackerView) -> bool {
        self.last_view.as_ref() != Some(view)
    }
}

impl Default for UIHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.debug("UIHandler started");
    }
}

impl Handler<ShowView> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: ShowView, _ctx: &mut Self::Context) {
        if !self.is_new(&msg.view) {
            return;
        }
        println!("\n{}\n", render_view(&msg.view));
        println!("Commands: [b]ack to menu, track <order_id>, [q]uit");
        self.last_view = Some(msg.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_views_are_not_reprinted() {
        let mut handler = UIHandler::new();
        assert!(handler.is_new(&TrackerView::Loading));
        handler.last_view = Some(TrackerView::Loading);
        assert!(!handler.is_new(&TrackerView::Loading));
        assert!(handler.is_new(&TrackerView::Idle));
    }
}
