use clap::Parser;
use stackrig::cli::{Cli, Commands};
use stackrig::commands;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env-filter support.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Web { timeout } => {
            commands::web::run(cli.global.workdir.as_deref(), timeout).await
        }
        Commands::Status => commands::status::run(cli.global.workdir.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
