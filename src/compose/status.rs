use regex::Regex;
use std::sync::LazyLock;

/// One observed lifecycle state for a service's container, extracted from a
/// `docker compose ps <service>` status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Up,
    Exited(i32),
    Other(String),
}

// Grammar: a leading container-name token, anything, then a lifecycle
// keyword. Compose pads its columns with spaces and may wrap a long
// container name onto a second line; wrapped fragments, headers and
// separator rows never match and are ignored. Each query is scoped to a
// single service, so the name token itself does not need to be interpreted.
static STATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[A-Za-z0-9][\w.-]*\s.*?\b(?:(?P<up>Up)\b|(?P<exit>Exit(?:ed)?)\b\s*\(?(?P<code>\d+)?\)?|(?P<other>Restarting|Paused|Dead)\b)",
    )
    .unwrap()
});

/// Extract every recognizable container state from raw status output.
///
/// An empty result is not an error; it means the container has not shown up
/// in the table yet.
pub fn extract_states(output: &str) -> Vec<ServiceState> {
    STATE_LINE
        .captures_iter(output.trim())
        .map(|caps| {
            if caps.name("up").is_some() {
                ServiceState::Up
            } else if let Some(code) = caps.name("code") {
                match code.as_str().parse::<i32>() {
                    Ok(n) => ServiceState::Exited(n),
                    Err(_) => ServiceState::Other(format!("Exit {}", code.as_str())),
                }
            } else if let Some(exit) = caps.name("exit") {
                // An exit keyword without a readable code is still an exit.
                ServiceState::Other(exit.as_str().to_string())
            } else {
                let raw = caps
                    .name("other")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                ServiceState::Other(raw)
            }
        })
        .collect()
}
