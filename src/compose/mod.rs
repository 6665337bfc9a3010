pub mod status;
pub mod workdir;

use std::future::Future;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::compose::workdir::WorkdirError;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Workdir(#[from] WorkdirError),

    #[error("could not run docker compose")]
    Spawn(#[source] std::io::Error),

    #[error("docker compose {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },
}

/// The seam to the orchestration tool. One call runs one
/// `docker compose <args>` invocation and returns its stdout.
pub trait Compose: Send + Sync + 'static {
    fn run(&self, args: &[&str]) -> impl Future<Output = Result<String, ComposeError>> + Send;
}

/// Shells out to the docker compose plugin inside a validated workdir.
#[derive(Debug, Clone)]
pub struct ComposeCli {
    workdir: PathBuf,
}

impl ComposeCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl Compose for ComposeCli {
    async fn run(&self, args: &[&str]) -> Result<String, ComposeError> {
        workdir::validate(&self.workdir)?;

        debug!(args = ?args, workdir = %self.workdir.display(), "running docker compose");
        let output = tokio::process::Command::new("docker")
            .arg("compose")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(ComposeError::Spawn)?;

        if !output.status.success() {
            return Err(ComposeError::CommandFailed {
                args: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// One container reported by `docker compose ps --format json`.
#[derive(Debug, Deserialize)]
pub struct ComposeService {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(default, rename = "Publishers")]
    pub publishers: Vec<ComposePublisher>,
}

#[derive(Debug, Deserialize)]
pub struct ComposePublisher {
    #[serde(rename = "TargetPort")]
    pub target_port: u16,
    #[serde(default, rename = "PublishedPort")]
    pub published_port: u16,
}

/// Parse `docker compose ps --format json` output. Depending on the compose
/// version this is either a JSON array or one object per line.
pub fn parse_stack(stdout: &str) -> anyhow::Result<Vec<ComposeService>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(services) = serde_json::from_str::<Vec<ComposeService>>(trimmed) {
        return Ok(services);
    }

    let mut services = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let svc: ComposeService =
            serde_json::from_str(line).context("parsing docker compose ps output")?;
        services.push(svc);
    }

    Ok(services)
}

/// List every container of the stack in one pass.
pub async fn list_stack<C: Compose>(compose: &C) -> anyhow::Result<Vec<ComposeService>> {
    let stdout = compose
        .run(&["ps", "--format", "json"])
        .await
        .context("listing stack containers")?;
    parse_stack(&stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stack_json_array() {
        let out = r#"[
            {"Name":"stack-web-ui-1","Service":"web-ui","State":"running",
             "Publishers":[{"TargetPort":8088,"PublishedPort":8088}]},
            {"Name":"stack-gitcollector-1","Service":"gitcollector","State":"exited"}
        ]"#;

        let services = parse_stack(out).unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].service, "web-ui");
        assert_eq!(services[0].publishers[0].published_port, 8088);
        assert_eq!(services[1].state, "exited");
        assert!(services[1].publishers.is_empty());
    }

    #[test]
    fn parse_stack_ndjson() {
        let out = concat!(
            r#"{"Name":"stack-web-ui-1","Service":"web-ui","State":"running"}"#,
            "\n",
            r#"{"Name":"stack-bblfsh-1","Service":"bblfsh","State":"running"}"#,
            "\n",
        );

        let services = parse_stack(out).unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[1].name, "stack-bblfsh-1");
    }

    #[test]
    fn parse_stack_empty() {
        assert!(parse_stack("").unwrap().is_empty());
        assert!(parse_stack("  \n ").unwrap().is_empty());
    }

    #[test]
    fn parse_stack_garbage_errors() {
        assert!(parse_stack("not json at all").is_err());
    }
}
