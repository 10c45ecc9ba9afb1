//! scrubline CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use scrubline::cli::{git_sha, Cli, Commands, ConfigCommands};
use scrubline::logging;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The viewer logs to a file once it owns the terminal
    if !matches!(cli.command, Commands::View(_)) {
        logging::init_stderr();
    }
    debug!(version = env!("CARGO_PKG_VERSION"), commit = git_sha(), "starting");

    let config_override = cli.config.as_deref();
    match cli.command {
        Commands::View(args) => {
            let config = commands::load_config(config_override)?;
            commands::view::handle(&args, &config)
        }
        Commands::Thumbs(args) => {
            let config = commands::load_config(config_override)?;
            commands::thumbs::handle(&args, &config)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(config_override),
            ConfigCommands::Path => commands::config::handle_path(config_override),
            ConfigCommands::Init { force } => commands::config::handle_init(config_override, force),
        },
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
