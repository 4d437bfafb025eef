//! Staring contest CLI: play rounds from landmark recordings and show the
//! leaderboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use staring_contest::app::{Presenter, RoundOutcome, StaringApp};
use staring_contest::capture::RecordedFaceStream;
use staring_contest::config::{Config, EXAMPLE_CONFIG};
use staring_contest::leaderboard::JsonFileStore;
use staring_contest::ranking::RankedEntry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Path of the leaderboard file (overrides config)
    #[arg(short, long)]
    leaderboard: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one round from a landmark recording
    Play {
        /// JSON-lines landmark recording to drive the round
        #[arg(short, long)]
        input: PathBuf,

        /// Display name (must be unique on the leaderboard)
        #[arg(short, long)]
        username: String,

        /// Team to compete for
        #[arg(short, long)]
        team: String,

        /// Playback rate in frames per second (0 replays unpaced,
        /// overrides config)
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Print the ranked leaderboard
    Leaderboard,
    /// Write an example configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "staring-contest.yaml")]
        output: PathBuf,
    },
}

/// Renders round progress on the terminal
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn countdown_tick(&mut self, value: u32) {
        println!("Starting in {value}...");
    }

    fn go(&mut self) {
        println!("Go!");
    }

    fn blink(&mut self, elapsed_seconds: f64, username: &str) {
        println!("Blink detected at {elapsed_seconds:.2} seconds, {username}!");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let mut config = if let Some(config_path) = &args.config {
        info!("loading configuration from {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to load config file: {e}; using defaults");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(path) = args.leaderboard {
        config.leaderboard.path = path;
    }

    match args.command {
        Command::Play {
            input,
            username,
            team,
            fps,
        } => {
            if let Some(fps) = fps {
                config.capture.playback_fps = fps;
            }
            let fps = config.capture.playback_fps;
            let store = JsonFileStore::open(&config.leaderboard.path)?;
            let app = StaringApp::new(config, Box::new(store))?;

            let mut stream = RecordedFaceStream::from_path(&input, fps)?;
            let outcome = app.run_round(&mut stream, &username, &team, &mut ConsolePresenter)?;

            match outcome {
                RoundOutcome::Scored(entry) => {
                    println!(
                        "{} ranked #{} ({}) with {:.2} seconds",
                        entry.record.username, entry.rank, entry.tier, entry.record.score
                    );
                    print_leaderboard(&app.ranked_leaderboard()?);
                }
                RoundOutcome::Abandoned => {
                    println!("Round abandoned: no blink was observed.");
                }
            }
        }
        Command::Leaderboard => {
            let store = JsonFileStore::open(&config.leaderboard.path)?;
            let app = StaringApp::new(config, Box::new(store))?;
            print_leaderboard(&app.ranked_leaderboard()?);
        }
        Command::InitConfig { output } => {
            std::fs::write(&output, EXAMPLE_CONFIG)?;
            println!("wrote example configuration to {}", output.display());
        }
    }

    Ok(())
}

fn print_leaderboard(entries: &[RankedEntry]) {
    if entries.is_empty() {
        println!("Leaderboard is empty.");
        return;
    }

    println!("{:<5} {:<12} {:<20} {:<20} {:>8}", "Rank", "Tier", "Username", "Team", "Score");
    for entry in entries {
        println!(
            "{:<5} {:<12} {:<20} {:<20} {:>8.2}",
            entry.rank,
            entry.tier.to_string(),
            entry.record.username,
            entry.record.team,
            entry.record.score
        );
    }
}
