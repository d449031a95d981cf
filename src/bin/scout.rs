use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use boardscout::{
    Credentials, DefaultSideFactory, MaterialOracle, PageSnapshot, Player, Scout, ScoutError,
    ScrapeStrategy, SnapshotDriver,
};

#[derive(Parser)]
#[command(name = "boardscout")]
#[command(about = "Reconstructs a chess.com board from a page snapshot and reports or plays scored moves")]
struct Cli {
    /// Recorded page snapshot (JSON) to run against.
    #[arg(long, global = true, default_value = "snapshot.json")]
    snapshot: PathBuf,

    /// Which page layout to assume: auto, bot or pvp.
    #[arg(long, global = true, default_value = "auto")]
    layout: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the snapshot once and print both sides' move costs.
    Parse {
        /// How many of the best moves to show per side.
        #[arg(long, default_value_t = 3)]
        n_best: usize,
        /// How many of the worst moves to show per side.
        #[arg(long, default_value_t = 3)]
        n_worst: usize,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Pick the best move for the bottom side, act it out and print it.
    Move,
}

fn strategy(layout: &str) -> Result<ScrapeStrategy> {
    match layout {
        "auto" => Ok(ScrapeStrategy::Universal),
        "bot" => Ok(ScrapeStrategy::VsBot),
        "pvp" => Ok(ScrapeStrategy::VsPlayer),
        other => anyhow::bail!("unknown layout '{}', expected auto, bot or pvp", other),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let snapshot = PageSnapshot::load(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;
    let url = if snapshot.url.is_empty() {
        "https://www.chess.com/".to_string()
    } else {
        snapshot.url.clone()
    };
    let driver = SnapshotDriver::new(snapshot);
    let strategy = strategy(&cli.layout)?;

    match cli.command {
        Commands::Parse {
            n_best,
            n_worst,
            username,
            password,
        } => {
            let mut scout = Scout::new(driver, MaterialOracle, DefaultSideFactory, &url)
                .with_strategy(strategy)
                .with_truncation(n_best, n_worst);
            if let (Some(username), Some(password)) = (username, password) {
                scout = scout.with_credentials(Credentials { username, password });
            }
            scout.open()?;
            match scout.parse() {
                Ok(report) => println!("{}", report),
                Err(ScoutError::BoardNotFound) => println!("{}", ScoutError::BoardNotFound),
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Move => {
            let scout = Scout::new(driver.clone(), MaterialOracle, DefaultSideFactory, &url)
                .with_strategy(strategy);
            scout.open()?;
            let player = Player::new(scout);
            match player.make_move() {
                Ok(mv) => {
                    println!("{}", mv);
                    for action in driver.actions() {
                        log::debug!("page action: {:?}", action);
                    }
                }
                Err(err @ (ScoutError::BoardNotFound | ScoutError::NoMoves(_))) => {
                    println!("{}", err)
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}
