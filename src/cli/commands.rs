use crate::cli::args::{Args, Command, ConfigCommand, ConsoleArgs};
use crate::cli::output::{ConfigPaths, ConsoleWriter, OutputWriter};
use crate::core::console::SessionController;
use crate::domain::config::TermBridgeConfig;
use crate::domain::error::TermBridgeError;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging;
use std::io::Stdout;
use tracing::debug;

/// Execute CLI command
pub async fn execute_command(args: Args) -> Result<(), TermBridgeError> {
    let writer = ConsoleWriter::new(args.output);

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path)?
    } else {
        config_manager.load_config()?
    };

    if !args.quiet {
        logging::init_logging(&config.global.log_level, args.verbose)?;
    }

    match args.command {
        Command::Console(console_args) => execute_console_command(console_args, &config).await,
        Command::Config(config_args) => {
            execute_config_command(config_args.command, &writer, &config, &config_manager)
        }
    }
}

async fn execute_console_command(
    args: ConsoleArgs,
    config: &TermBridgeConfig,
) -> Result<(), TermBridgeError> {
    let session_config = args.to_session_config(&config.console);
    debug!(?session_config, "Starting console session");

    SessionController::new(session_config).run().await
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter<Stdout>,
    config: &TermBridgeConfig,
    config_manager: &ConfigManager,
) -> Result<(), TermBridgeError> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
        }
        ConfigCommand::Init { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let path = config_manager.init_project_config(&dir)?;
            writer.write_message(&format!("Created {}", path.display()))?;
        }
        ConfigCommand::Path => {
            writer.write_paths(&ConfigPaths {
                global: config_manager.get_global_config_path_ref().clone(),
                project: config_manager.get_project_config_path().cloned(),
            })?;
        }
    }
    Ok(())
}
