use crate::constants::LOG_VERBOSE_ENV;
use chrono::Local;
use colored::*;

/// Named console logger shared by every actor in the workspace.
///
/// Each line looks like `[12:00:05][INFO][TRACKER] → message`. Debug lines are
/// only printed when `LOG_VERBOSE` is set in the environment.
#[derive(Debug, Clone)]
pub struct Logger {
    pub name: String,
    pub info_color: Color,
    pub verbose: bool,
}

impl Logger {
    pub fn new(name: impl Into<String>, info_color: Color) -> Self {
        Self {
            name: name.into().to_uppercase(),
            info_color,
            verbose: std::env::var_os(LOG_VERBOSE_ENV).is_some(),
        }
    }

    fn timestamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    /// Builds the uncoloured `[time][LEVEL][NAME]` prefix.
    pub fn prefix(&self, level: &str) -> String {
        format!("[{}][{}][{}]", Self::timestamp(), level, self.name)
    }

    fn line(&self, header: ColoredString, msg: &str) -> String {
        format!("{} {} {}", header, "→".dimmed(), msg)
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.verbose {
            println!("{}", self.line(self.prefix("DEBUG").dimmed(), msg.as_ref()));
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        println!(
            "{}",
            self.line(
                self.prefix("INFO").bold().color(self.info_color),
                msg.as_ref()
            )
        );
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        println!(
            "{}",
            self.line(self.prefix("OK").bold().bright_green(), msg.as_ref())
        );
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        println!(
            "{}",
            self.line(self.prefix("WARN").bold().yellow(), msg.as_ref())
        );
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        eprintln!(
            "{}",
            self.line(self.prefix("ERROR").bold().bright_red(), msg.as_ref())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_uppercased_into_the_prefix() {
        let logger = Logger::new("Tracker abc123", Color::Cyan);
        let prefix = logger.prefix("INFO");
        assert!(prefix.ends_with("[INFO][TRACKER ABC123]"));
        assert!(prefix.starts_with('['));
    }
}
