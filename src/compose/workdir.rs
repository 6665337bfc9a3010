use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// The recognized ways a compose working directory can be unusable. These are
/// checked before every compose invocation, so a broken setup surfaces
/// immediately instead of burning a wait timeout.
#[derive(Debug, Error)]
pub enum WorkdirError {
    #[error("workdir {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("workdir {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("workdir {} does not contain a {COMPOSE_FILE}", .0.display())]
    NoComposeFile(PathBuf),
}

/// Walk up the directory tree from `start`, looking for a directory that
/// contains the compose file. Returns None if the root is reached first.
pub fn find_workdir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(COMPOSE_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the compose working directory. An explicit directory (flag or env
/// var) wins and is taken as-is; validation happens at invocation time so the
/// caller sees the precise environment error kind. Otherwise search upward
/// from the current directory.
pub fn resolve_workdir(cli_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = cli_dir {
        return Ok(dir.to_path_buf());
    }

    let cwd = std::env::current_dir()?;
    find_workdir(&cwd).ok_or_else(|| {
        anyhow::anyhow!(
            "no {} found in {} or any parent directory",
            COMPOSE_FILE,
            cwd.display()
        )
    })
}

/// Check that `dir` is a directory holding a compose file.
pub fn validate(dir: &Path) -> Result<(), WorkdirError> {
    if !dir.exists() {
        return Err(WorkdirError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(WorkdirError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.join(COMPOSE_FILE).is_file() {
        return Err(WorkdirError::NoComposeFile(dir.to_path_buf()));
    }
    Ok(())
}
