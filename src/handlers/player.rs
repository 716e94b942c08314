use anyhow::Result;
use colored::Colorize;

use super::open_store;
use crate::cli::PlayerCommand;
use crate::config::AppConfig;
use crate::domain::Attribute;
use crate::services::{RankKey, RosterService, UpdateOutcome};

pub fn handle_player(config: &AppConfig, command: &PlayerCommand) -> Result<()> {
    let store = open_store(config)?;
    let conn = &store.conn;
    let roster = RosterService::new(config.clone());

    match command {
        PlayerCommand::Add {
            name,
            shooting,
            dribbling,
            passing,
            tackling,
            fitness,
            goalkeeping,
        } => {
            let scores = [
                shooting.as_str(),
                dribbling.as_str(),
                passing.as_str(),
                tackling.as_str(),
                fitness.as_str(),
                goalkeeping.as_str(),
            ];
            let record = roster.add_player_from_input(conn, name, scores)?;
            println!("{} Player '{}' added!", "✔".green(), record.player.name);
        }
        PlayerCommand::Remove { name } => {
            roster.remove_player(conn, name)?;
            println!("Player '{name}' removed.");
        }
        PlayerCommand::Update {
            name,
            attribute,
            value,
        } => match roster.update_player(conn, name, attribute, value)? {
            UpdateOutcome::Attribute { attribute, value } => {
                println!("Updated {attribute} of '{name}' to {value}.");
            }
            UpdateOutcome::Form(form) => println!("Updated form of '{name}' to {form}."),
        },
        PlayerCommand::Rating { name } => {
            let rating = roster.rating(conn, name)?;
            println!("{}'s Rating: {}", name.bold(), format!("{rating:.2}").yellow());
        }
        PlayerCommand::List => print_player_table(&roster, conn)?,
        PlayerCommand::Attributes { name } => {
            let record = roster.player(conn, name)?;
            println!("\n{}", format!("{name} Attributes:").bold());
            for (attribute, score) in record.player.attributes.iter() {
                println!("- {}: {}", attribute.label(), score);
            }
            println!("- Form: {}", record.player.form);
            println!("- Rating: {:.2}", record.player.overall_rating(roster.model()));
        }
        PlayerCommand::Rank { key } => {
            let keys = match key {
                Some(raw) => vec![raw.parse::<RankKey>()?],
                None => RankKey::all(),
            };
            for key in keys {
                println!("\n{}", format!("Ranking by {}:", key.title()).bold());
                for (position, entry) in roster.rank(conn, key)?.iter().enumerate() {
                    println!("{:>3}. {:<20} {:.2}", position + 1, entry.name, entry.value);
                }
            }
        }
    }
    Ok(())
}

fn print_player_table(roster: &RosterService, conn: &rusqlite::Connection) -> Result<()> {
    let records = roster.list(conn)?;
    if records.is_empty() {
        println!("{}", "No players found in the database.".red());
        return Ok(());
    }

    println!("\n{}", "Players in Database:".bold());
    print!("{:<20} {:<10}", "Name", "Form");
    for attribute in Attribute::ALL {
        print!(" {:<12}", attribute.label());
    }
    println!(" {:<10}", "Rating");
    println!("{}", "-".repeat(120));

    for record in &records {
        let player = &record.player;
        print!("{:<20} {:<10}", player.name, player.form);
        for (_, score) in player.attributes.iter() {
            print!(" {:<12}", score);
        }
        println!(" {:<10.2}", player.overall_rating(roster.model()));
    }
    Ok(())
}
