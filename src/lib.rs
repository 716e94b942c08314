pub mod balancing;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::handlers::{handle_database, handle_player, handle_teams};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn execute(command: &Command) -> Result<()> {
    if let Command::Completions { shell } = command {
        return handle_completions(*shell);
    }

    let config = AppConfig::load()?;
    match command {
        Command::Player { command } => handle_player(&config, command),
        Command::Teams { command } => handle_teams(&config, command),
        Command::Database { command } => handle_database(&config, command),
        Command::Completions { .. } => Ok(()),
    }
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
