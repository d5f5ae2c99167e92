use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::config::{ConsoleDefaults, SessionConfig};

/// Command line arguments for TermBridge
#[derive(Parser, Debug)]
#[command(
    name = "termbridge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive serial console for embedded devices",
    long_about = concat!(
        "Bridges the local terminal to a device's serial console: prints sanitized, ",
        "optionally timestamped device output and forwards keystrokes to the device."
    )
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open an interactive console on a serial port
    Console(ConsoleArgs),
    /// Configuration management commands
    Config(ConfigArgs),
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// TOML output
    Toml,
}

/// Console session arguments
///
/// Options left out fall back to the configuration file.
#[derive(ClapArgs, Debug, Default)]
pub struct ConsoleArgs {
    /// Serial port path
    #[arg(short, long)]
    pub port: String,

    /// Serial port speed [default: 115200]
    #[arg(short, long)]
    pub baud_rate: Option<u32>,

    /// Enable hardware flow control (CTS/RTS)
    #[arg(long)]
    pub hw_flow_control: bool,

    /// Do not read from stdin, only print device output to stdout
    #[arg(long)]
    pub no_input: bool,

    /// Set RTS and DTR explicitly once the port is open
    #[arg(long)]
    pub set_control_lines: Option<bool>,

    /// Drive RTS and DTR high instead of low
    #[arg(long)]
    pub invert_control_lines: bool,

    /// Prepend each line with a timestamp: "yes"/"true" for UNIX epoch with
    /// microseconds, a layout name such as StampMilli or RFC3339, a strftime
    /// template such as "%H:%M:%S", or a reference-time layout such as
    /// "15:04:05.000". An empty value disables timestamps.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub timestamp: Option<String>,
}

impl ConsoleArgs {
    /// Overlay these arguments on the configured defaults.
    pub fn to_session_config(&self, defaults: &ConsoleDefaults) -> SessionConfig {
        let mut config = SessionConfig::from_defaults(self.port.clone(), defaults);

        if let Some(baud_rate) = self.baud_rate {
            config.baud_rate = baud_rate;
        }
        if let Some(set_control_lines) = self.set_control_lines {
            config.set_control_lines = set_control_lines;
        }
        if let Some(timestamp) = &self.timestamp {
            config.timestamp = timestamp.clone();
        }
        config.hw_flow_control |= self.hw_flow_control;
        config.no_input |= self.no_input;
        config.invert_control_lines |= self.invert_control_lines;

        config
    }
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Create a default project configuration
    Init {
        /// Directory to create `.termbridge/config.toml` in
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Show configuration file locations
    Path,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
        }
    }
}
