use colored::Color;
use common::logger::Logger;

pub const READY_MESSAGE: &str = "🎉 Your order is ready for pickup!";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load order";

/// Best-effort user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints toasts to the terminal.
pub struct ConsoleNotifier {
    logger: Logger,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            logger: Logger::new("Toast", Color::Green),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        self.logger.success(message);
    }

    fn error(&self, message: &str) {
        self.logger.error(message);
    }
}
