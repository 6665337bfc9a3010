use std::path::Path;

use anyhow::Result;

use crate::compose::{self, workdir, ComposeCli};

pub async fn run(cli_workdir: Option<&Path>) -> Result<()> {
    let dir = workdir::resolve_workdir(cli_workdir)?;
    let compose = ComposeCli::new(dir);
    let services = compose::list_stack(&compose).await?;

    if services.is_empty() {
        println!("No containers found.");
        println!("Run `docker compose up -d` in the stack directory first.");
        return Ok(());
    }

    println!("  {:<28} {:<16} {:<12} PORTS", "NAME", "SERVICE", "STATE");
    println!("  {}", "-".repeat(72));

    for svc in &services {
        let ports = svc
            .publishers
            .iter()
            .filter(|p| p.published_port != 0)
            .map(|p| format!("{}->{}", p.published_port, p.target_port))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:<28} {:<16} {:<12} {}",
            svc.name,
            svc.service,
            svc.state,
            if ports.is_empty() { "-" } else { ports.as_str() },
        );
    }
    println!();

    Ok(())
}
