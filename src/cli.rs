// src/cli.rs
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Log running and cycling workouts by clicking a map", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq).
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a tracking session, reading map/form events line by line
    Session {
        /// Read events from this file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Current position as LAT,LNG (overrides `location` in the config)
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true, value_parser = parse_lat_lng)]
        at: Option<(f64, f64)>,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Generate shell completion script
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// One line of session input.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Click the map at a coordinate
    Click {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Switch the visible cadence/elevation field
    Toggle,
    /// Submit the form. Values are passed through unparsed.
    Submit {
        kind: String,
        #[arg(allow_hyphen_values = true)]
        distance: String,
        #[arg(allow_hyphen_values = true)]
        duration: String,
        /// Cadence for running, elevation gain for cycling
        #[arg(allow_hyphen_values = true)]
        metric: String,
    },
    /// Close the form without logging anything
    Cancel,
    /// Print all workouts logged so far
    List,
    /// End the session
    Quit,
}

fn parse_lat_lng(s: &str) -> Result<(f64, f64), String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("'{s}' is not in LAT,LNG form"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok((lat, lng))
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> Result<SessionLine, clap::Error> {
        SessionLine::try_parse_from(s.split_whitespace())
    }

    #[test]
    fn parses_click_with_negative_coordinates() {
        assert_eq!(
            line("click -33.9 18.4").unwrap().command,
            SessionCommand::Click { lat: -33.9, lng: 18.4 }
        );
    }

    #[test]
    fn submit_keeps_raw_values() {
        assert_eq!(
            line("submit running abc 30 -5").unwrap().command,
            SessionCommand::Submit {
                kind: "running".into(),
                distance: "abc".into(),
                duration: "30".into(),
                metric: "-5".into(),
            }
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(line("jump 1 2").is_err());
        assert!(line("click 1").is_err());
    }

    #[test]
    fn lat_lng_flag() {
        assert_eq!(parse_lat_lng("51.5, -0.12"), Ok((51.5, -0.12)));
        assert!(parse_lat_lng("51.5").is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        build_cli_command().debug_assert();
    }
}
