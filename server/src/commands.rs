use common::types::order_status::OrderStatus;

/// A line typed by the store operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorCommand {
    SetStatus { order_id: String, status: OrderStatus },
    List,
    Quit,
    Invalid(String),
}

pub fn parse_operator_command(line: &str) -> OperatorCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["set", order_id, status] => match OrderStatus::from(*status) {
            OrderStatus::Unknown(raw) => {
                OperatorCommand::Invalid(format!("unknown status `{}`", raw))
            }
            status => OperatorCommand::SetStatus {
                order_id: order_id.to_string(),
                status,
            },
        },
        ["list" | "ls"] => OperatorCommand::List,
        ["quit" | "q"] => OperatorCommand::Quit,
        _ => OperatorCommand::Invalid(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_changes() {
        assert_eq!(
            parse_operator_command("set abc123 ready"),
            OperatorCommand::SetStatus {
                order_id: "abc123".to_string(),
                status: OrderStatus::Ready,
            }
        );
        assert_eq!(parse_operator_command(" list "), OperatorCommand::List);
        assert_eq!(parse_operator_command("q"), OperatorCommand::Quit);
    }

    #[test]
    fn rejects_unknown_statuses_and_garbage() {
        assert_eq!(
            parse_operator_command("set abc123 cooking"),
            OperatorCommand::Invalid("unknown status `cooking`".to_string())
        );
        assert_eq!(
            parse_operator_command("set abc123"),
            OperatorCommand::Invalid("set abc123".to_string())
        );
    }
}
