use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::compose::{workdir, ComposeCli};
use crate::web::{self, ready::SystemBrowser};

pub async fn run(cli_workdir: Option<&Path>, timeout: Duration) -> Result<()> {
    let dir = workdir::resolve_workdir(cli_workdir)?;
    let compose = Arc::new(ComposeCli::new(dir));
    web::open_ui(compose, Arc::new(SystemBrowser), timeout).await?;
    Ok(())
}
