use anyhow::Result;
use colored::Colorize;

use super::open_store;
use crate::cli::DatabaseCommand;
use crate::config::AppConfig;
use crate::services::TransferService;

pub fn handle_database(config: &AppConfig, command: &DatabaseCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let transfer = TransferService::new(config.clone());

    match command {
        DatabaseCommand::Clear => {
            transfer.clear(&mut store.conn)?;
            println!("All data has been removed from the database.");
        }
        DatabaseCommand::Export { file } => {
            let count = transfer.export(&store.conn, file)?;
            println!("{} Exported {} players to {}", "✔".green(), count, file.display());
        }
        DatabaseCommand::Import { file } => {
            let count = transfer.import(&mut store.conn, file)?;
            println!("{} Imported {} players from {}", "✔".green(), count, file.display());
        }
    }
    Ok(())
}
