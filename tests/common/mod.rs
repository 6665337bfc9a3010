#![allow(dead_code)]
use std::path::Path;
use tempfile::TempDir;

/// A throwaway compose working directory.
pub struct TestStack {
    pub dir: TempDir,
}

impl TestStack {
    pub fn new(compose_yaml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("docker-compose.yml"), compose_yaml).unwrap();
        Self { dir }
    }

    /// A directory with no compose file at all.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A minimal but valid compose file with no long-running services, so the
/// tests never leave containers behind.
pub const IDLE_STACK: &str = "\
services:
  web-ui:
    image: alpine:3
    command: [\"true\"]
";
