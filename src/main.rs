// TermBridge - Interactive serial console for embedded devices
use anyhow::Context;
use clap::Parser;
use termbridge::cli::{execute_command, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let command = match &args.command {
        termbridge::cli::Command::Console(console) => format!("console on {}", console.port),
        termbridge::cli::Command::Config(_) => "config".to_string(),
    };

    execute_command(args)
        .await
        .with_context(|| format!("termbridge {} failed", command))
}
