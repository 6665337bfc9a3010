use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "stackrig",
    version,
    about = "Manage a docker-compose code-analysis stack"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Run against a specific compose working directory
    #[arg(short = 'C', long = "workdir", global = true, env = "STACKRIG_WORKDIR")]
    pub workdir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the web interface in your browser, by default at:
    /// http://127.0.0.1:8088 user:admin pass:admin
    Web {
        /// How long to wait for the stack to become reachable
        #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
        timeout: Duration,
    },
    /// Show the state of every service in the stack
    Status,
}
