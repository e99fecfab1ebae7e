//src/main.rs
mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, stdout, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use map_workout_lib::{Config, Controller, Coords, Event, FormFields, MapStatus, SubmitOutcome};

use crate::cli::{SessionCommand, SessionLine};
use crate::terminal::{print_workout_table, FixedPosition, TerminalUi};

fn main() -> Result<()> {
    let cli_args = cli::parse_args();
    init_logging(cli_args.verbose, cli_args.quiet);

    match cli_args.command {
        cli::Commands::GenerateCompletion { shell } => {
            let mut cmd = cli::build_cli_command();
            let bin_name = cmd.get_name().to_string();

            eprintln!("Generating completion script for {}...", shell);
            clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        }
        cli::Commands::ConfigPath => {
            let path = map_workout_lib::get_config_path_util()
                .context("Failed to determine configuration file path")?;
            println!("{}", path.display());
        }
        cli::Commands::Session { script, at } => {
            let config_path = map_workout_lib::get_config_path_util()
                .context("Failed to determine configuration file path")?;
            let config = map_workout_lib::load_config_util(&config_path)
                .with_context(|| format!("Failed to load config from {config_path:?}"))?;

            let position = at.map(|(lat, lng)| Coords::new(lat, lng)).or(config.location);
            match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open script {}", path.display()))?;
                    run_session(&config, position, BufReader::new(file), &path)?;
                }
                None => run_session(&config, position, io::stdin().lock(), Path::new("<stdin>"))?,
            }
        }
    }

    Ok(())
}

fn run_session<R: BufRead>(
    config: &Config,
    position: Option<Coords>,
    input: R,
    source: &Path,
) -> Result<()> {
    let header_color = config.header_color()?;
    let ui = TerminalUi::new(
        header_color,
        config.map.tile_url.clone(),
        config.map.attribution.clone(),
    );
    let mut controller = Controller::new(ui, config);
    controller.locate(&mut FixedPosition(position));

    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", source.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed = match SessionLine::try_parse_from(trimmed.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}:{}: skipping '{}'", source.display(), index + 1, trimmed);
                eprintln!("{}", e.render());
                continue;
            }
        };

        let event = match parsed.command {
            SessionCommand::Click { lat, lng } => Event::MapClick(Coords::new(lat, lng)),
            SessionCommand::Toggle => Event::KindToggle,
            SessionCommand::Submit {
                kind,
                distance,
                duration,
                metric,
            } => Event::Submit(FormFields {
                kind,
                distance,
                duration,
                cadence: metric.clone(),
                elevation: metric,
            }),
            SessionCommand::Cancel => Event::Cancel,
            SessionCommand::List => {
                print_workout_table(controller.workouts(), header_color);
                continue;
            }
            SessionCommand::Quit => break,
        };

        match controller.handle(event) {
            Some(SubmitOutcome::Created(id)) => debug!(%id, "logged"),
            Some(SubmitOutcome::Ignored) => eprintln!("{}", ignored_submit_notice(controller.map_status())),
            Some(SubmitOutcome::Rejected(_)) | None => {}
        }
    }

    println!("Session ended with {} workout(s) logged.", controller.workouts().len());
    Ok(())
}

fn ignored_submit_notice(map: MapStatus) -> &'static str {
    match map {
        MapStatus::Unavailable => {
            "The map is unavailable because your position could not be determined; workouts cannot be logged."
        }
        MapStatus::Locating | MapStatus::Ready => "Click on the map before submitting a workout.",
    }
}

// Widened to i16 so `-v`/`-q` counts up to u8::MAX cannot overflow.
fn level_for(verbose: u8, quiet: u8) -> &'static str {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    }
}

/// Initialize logging to stderr. Default level is INFO; `RUST_LOG` wins if set.
fn init_logging(verbose: u8, quiet: u8) {
    let level = level_for(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,map_workout_lib={level},map_workout={level}")));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .compact()
        .init();
}
