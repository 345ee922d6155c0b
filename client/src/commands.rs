/// A line typed by the user on the tracking page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Back,
    Track(String),
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("b" | "back" | "menu"), None) => Command::Back,
        (Some("t" | "track"), Some(order_id)) => Command::Track(order_id.to_string()),
        (Some("q" | "quit" | "exit"), None) => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_page_actions() {
        assert_eq!(parse_command("b"), Command::Back);
        assert_eq!(parse_command("  menu "), Command::Back);
        assert_eq!(
            parse_command("track abc123"),
            Command::Track("abc123".to_string())
        );
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(parse_command("track"), Command::Unknown("track".to_string()));
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
        assert_eq!(
            parse_command("b now"),
            Command::Unknown("b now".to_string())
        );
    }
}
