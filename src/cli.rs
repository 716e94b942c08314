use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::TeamLabel;

#[derive(Parser, Debug)]
#[command(author, version, about = "Football team manager")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Manage players
    Player {
        #[clap(subcommand)]
        command: PlayerCommand,
    },
    /// Manage teams and matches
    Teams {
        #[clap(subcommand)]
        command: TeamsCommand,
    },
    /// Manage the database
    Database {
        #[clap(subcommand)]
        command: DatabaseCommand,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum PlayerCommand {
    /// Add a new player
    Add {
        /// Player's name
        name: String,
        #[arg(short = 's', long, allow_hyphen_values = true)]
        shooting: String,
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        dribbling: String,
        #[arg(short = 'p', long, allow_hyphen_values = true)]
        passing: String,
        #[arg(short = 't', long, allow_hyphen_values = true)]
        tackling: String,
        #[arg(short = 'f', long, allow_hyphen_values = true)]
        fitness: String,
        #[arg(short = 'g', long, allow_hyphen_values = true)]
        goalkeeping: String,
    },
    /// Remove a player
    Remove {
        /// Player's name
        name: String,
    },
    /// Update one attribute or the form of a player
    Update {
        /// Player's name
        name: String,
        /// Attribute name, its first letter, or "form"
        attribute: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show a player's overall rating
    Rating {
        /// Player's name
        name: String,
    },
    /// List all players
    List,
    /// Show every attribute of one player
    Attributes {
        /// Player's name
        name: String,
    },
    /// Rank players by overall rating or by one attribute
    Rank {
        /// "overall", an attribute name or its first letter; all of them when omitted
        key: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum TeamsCommand {
    /// Create two balanced teams from the given players
    Create {
        /// Names of the players taking part
        #[arg(required = true, num_args = 1..)]
        players: Vec<String>,
        /// Size of team 1 (defaults to the larger half)
        #[arg(long = "team1-size")]
        team1_size: Option<usize>,
    },
    /// Record the winner of the last created teams
    Result {
        #[arg(value_enum)]
        winner: TeamLabel,
    },
    /// Show the average attributes of a last created team
    Attributes {
        #[arg(value_enum)]
        team: TeamLabel,
    },
    /// Show the overall rating of a last created team
    Rating {
        #[arg(value_enum)]
        team: TeamLabel,
    },
    /// Show recorded matches, latest first
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum DatabaseCommand {
    /// Remove every player, match and team snapshot
    Clear,
    /// Write all players to a CSV file
    Export {
        file: PathBuf,
    },
    /// Add players from a CSV file
    Import {
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_player_add_with_short_flags() {
        let command = parse(&[
            "football", "player", "add", "John", "-s", "80", "-d", "70", "-p", "75", "-t", "60", "-f",
            "85", "-g", "50",
        ]);
        assert_eq!(
            command,
            Command::Player {
                command: PlayerCommand::Add {
                    name: "John".to_string(),
                    shooting: "80".to_string(),
                    dribbling: "70".to_string(),
                    passing: "75".to_string(),
                    tackling: "60".to_string(),
                    fitness: "85".to_string(),
                    goalkeeping: "50".to_string(),
                }
            }
        );
    }

    #[test]
    fn test_player_add_requires_every_attribute() {
        assert!(Cli::try_parse_from(["football", "player", "add", "John", "-s", "80"]).is_err());
    }

    #[test]
    fn test_teams_create_collects_names() {
        let command = parse(&["football", "teams", "create", "A", "B", "C", "--team1-size", "2"]);
        assert_eq!(
            command,
            Command::Teams {
                command: TeamsCommand::Create {
                    players: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                    team1_size: Some(2),
                }
            }
        );
    }

    #[test]
    fn test_team_labels() {
        assert_eq!(
            parse(&["football", "teams", "result", "team2"]),
            Command::Teams {
                command: TeamsCommand::Result {
                    winner: TeamLabel::Team2
                }
            }
        );
        assert!(Cli::try_parse_from(["football", "teams", "rating", "team3"]).is_err());
    }

    #[test]
    fn test_history_limit_default() {
        assert_eq!(
            parse(&["football", "teams", "history"]),
            Command::Teams {
                command: TeamsCommand::History { limit: 10 }
            }
        );
    }
}
