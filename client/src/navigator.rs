use colored::Color;
use common::logger::Logger;
use std::sync::Arc;
use tokio::sync::Notify;

pub trait Navigator: Send + Sync {
    fn go_to_menu(&self);
}

/// Signals the binary's main loop that the user left the tracking page.
pub struct ConsoleNavigator {
    back_to_menu: Arc<Notify>,
    logger: Logger,
}

impl ConsoleNavigator {
    pub fn new(back_to_menu: Arc<Notify>) -> Self {
        Self {
            back_to_menu,
            logger: Logger::new("Navigator", Color::Cyan),
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn go_to_menu(&self) {
        self.logger.info("Returning to the menu");
        self.back_to_menu.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[actix_rt::test]
    async fn going_back_wakes_the_main_loop() {
        let back = Arc::new(Notify::new());
        ConsoleNavigator::new(back.clone()).go_to_menu();
        let woke = tokio::time::timeout(Duration::from_millis(200), back.notified()).await;
        assert!(woke.is_ok());
    }
}
