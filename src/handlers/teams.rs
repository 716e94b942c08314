use anyhow::Result;
use colored::Colorize;

use super::open_store;
use crate::cli::TeamsCommand;
use crate::config::AppConfig;
use crate::domain::{Team, TeamLabel};
use crate::rating::RatingModel;
use crate::services::TeamService;

pub fn handle_teams(config: &AppConfig, command: &TeamsCommand) -> Result<()> {
    let mut store = open_store(config)?;
    let service = TeamService::new(config.clone());

    match command {
        TeamsCommand::Create {
            players,
            team1_size,
        } => {
            let (team1, team2) = service.create_teams(&mut store.conn, players, *team1_size)?;
            println!("{}", "Teams created successfully!".green());
            print_team(TeamLabel::Team1, &team1, service.model());
            print_team(TeamLabel::Team2, &team2, service.model());
        }
        TeamsCommand::Result { winner } => {
            let outcome = service.record_result(&mut store.conn, *winner)?;
            println!(
                "{} Match recorded: {} won! ({} players updated)",
                "✔".green(),
                winner.title(),
                outcome.participants.len()
            );
        }
        TeamsCommand::Attributes { team } => {
            let averages = service.team_attributes(&store.conn, *team)?;
            println!("\n{}", format!("{} Attributes:", team.title()).bold());
            for (attribute, average) in averages {
                println!("- {}: {:.2}", attribute.label(), average);
            }
        }
        TeamsCommand::Rating { team } => {
            let rating = service.team_rating(&store.conn, *team)?;
            println!(
                "\n{} {}",
                format!("{} Overall Rating:", team.title()).bold(),
                format!("{rating:.2}").yellow()
            );
        }
        TeamsCommand::History { limit } => {
            let history = service.history(&store.conn, *limit)?;
            if history.is_empty() {
                println!("No matches recorded yet.");
            }
            for outcome in history {
                println!(
                    "\n{} {} won",
                    format!(
                        "Match #{} ({}):",
                        outcome.record.id,
                        outcome.record.played_at.format("%Y-%m-%d %H:%M")
                    )
                    .bold(),
                    outcome.record.winner.title()
                );
                for participant in outcome.participants {
                    println!(
                        "  {} {:<20} form {} -> {}",
                        participant.team.title(),
                        participant.player_name,
                        participant.form_before,
                        participant.form_after
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_team(label: TeamLabel, team: &Team, model: &RatingModel) {
    println!("\n{}", format!("{}:", label.title()).bold());
    println!(
        "  Rating: {:.2} Bonus: {}\n",
        team.overall_rating(model),
        team.bonus
    );
    for player in &team.players {
        println!("- {} (Rating: {:.2})", player.name, player.overall_rating(model));
    }
}
