pub mod cards;
pub mod config;
pub mod doctor;
pub mod sticker;

use anyhow::Context;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn render_document(command: &str, document: &impl Serialize, pretty: bool) -> CommandResult {
    let serialized = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };

    match serialized {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure(command, "serialization", error.to_string(), 5),
    }
}

fn read_input(input: &str, what: &str) -> anyhow::Result<String> {
    use std::io::Read;

    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| format!("could not read {what} from stdin"))?;
        return Ok(buffer);
    }

    std::fs::read_to_string(input).with_context(|| format!("could not read {what} from `{input}`"))
}
