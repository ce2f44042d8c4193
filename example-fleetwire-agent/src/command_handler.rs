use fleetwire::payload::{CommandPayload, CommandResultPayload, PayloadMap};
use fleetwire::utils::now_millis;
use serde_json::Value;
use std::time::Instant;

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// Runs one server-issued command and builds the result to report back.
///
/// Supported actions are `ping` and `echo`. Anything else is answered with a
/// `failed` result rather than ignored, so the server can close it out.
pub fn handle_command(command: &CommandPayload) -> CommandResultPayload {
    let started = Instant::now();
    let mut result = PayloadMap::new();

    let status = match command.action.as_str() {
        "ping" => {
            result.insert(
                "output".into(),
                Value::String(format!("Pong: {}ms", started.elapsed().as_millis())),
            );
            STATUS_COMPLETED
        }
        "echo" => {
            result.insert("output".into(), Value::Object(command.params.clone()));
            STATUS_COMPLETED
        }
        other => {
            tracing::warn!(command_id = %command.command_id, action = other, "unsupported command");
            result.insert(
                "error".into(),
                Value::String(format!("unsupported action {other:?}")),
            );
            STATUS_FAILED
        }
    };

    CommandResultPayload {
        command_id: command.command_id.clone(),
        result,
        status: status.to_string(),
        timestamp_ms: now_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ping_answers_with_pong() {
        let result = handle_command(&CommandPayload::new("CMD-123456", "ping"));

        assert_eq!(result.command_id, "CMD-123456");
        assert_eq!(result.status, STATUS_COMPLETED);
        assert!(result.result["output"].as_str().unwrap().starts_with("Pong: "));
    }

    #[test]
    fn echo_returns_its_params() {
        let mut command = CommandPayload::new("CMD-2", "echo");
        command.params = json!({ "x": 1 }).as_object().cloned().unwrap();

        let result = handle_command(&command);
        assert_eq!(result.result["output"], json!({ "x": 1 }));
    }

    #[test]
    fn unknown_action_fails_without_panicking() {
        let result = handle_command(&CommandPayload::new("CMD-3", "reboot"));

        assert_eq!(result.status, STATUS_FAILED);
        assert!(result.result.contains_key("error"));
    }
}
