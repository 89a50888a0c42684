use bigboard::commands;
use bigboard::commands::add::AddAt;
use bigboard::config;
use bigboard::data_provider::ScoutDataProvider;
use bigboard::file_store::FileStore;
use bigboard::registry::WeightingMode;
use bigboard::types::{BigBoardView, PlayerId};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "bigboard")]
#[command(about = "Personal draft big board", long_about = "Personal draft big board\n\nRank prospects from several ranking sources and keep your own ordered board per view.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Store file (overrides data_file from the config)
    #[arg(short = 'D', long, global = true)]
    data: Option<PathBuf>,

    /// Work on a positional board (e.g. WR) instead of the overall board
    #[arg(short, long, global = true)]
    position: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Every visible board counts once
    Equal,
    /// Boards count by their configured weight
    Weighted,
}

impl Mode {
    fn to_weighting_mode(self) -> WeightingMode {
        match self {
            Mode::Equal => WeightingMode::Equal,
            Mode::Weighted => WeightingMode::Weighted,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display the big board
    Board,
    /// Suggest players to add to the board
    Candidates {
        /// Name filter
        query: Option<String>,
    },
    /// Add a player to the board
    Add {
        /// Player ID
        player_id: PlayerId,

        /// Board position (1 = top); ranks past the end go to the bottom
        #[arg(short, long, conflicts_with = "bottom")]
        rank: Option<String>,

        /// Add at the bottom of the board
        #[arg(short, long)]
        bottom: bool,
    },
    /// Move a player to another board position
    Move {
        /// Player ID
        player_id: PlayerId,

        /// New board position (1 = top)
        rank: String,
    },
    /// Remove a player from the board
    Remove {
        /// Player ID
        player_id: PlayerId,
    },
    /// Reorder the whole board by grade
    Autosort {
        /// Confirm replacing the manual order
        #[arg(short, long)]
        yes: bool,
    },
    /// List ranking sources and their share of the consensus
    Boards {
        /// Switch weighting mode (equal resets all weights to 1)
        #[arg(short, long)]
        mode: Option<Mode>,
    },
    /// Set a ranking source's weight
    Weight {
        /// Board key
        board_key: String,
        /// Weight (0 or more)
        weight: f64,
    },
    /// Make a ranking source the primary one
    Primary {
        /// Board key
        board_key: String,
    },
    /// Show or hide a ranking source
    Visibility {
        /// Board key
        board_key: String,
        /// true to show, false to hide
        #[arg(action = clap::ArgAction::Set)]
        visible: bool,
    },
    /// Display a player report
    Player {
        /// Player ID
        player_id: PlayerId,
    },
    /// Write sample prospects and boards into the store
    Seed {
        /// Replace an existing store
        #[arg(short, long)]
        force: bool,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    let data_path = cfg
        .data_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "Unable to determine data path".to_string());

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("data_file: {}{}", data_path, if cfg.data_file.is_none() { " (default)" } else { "" });
    println!("use_custom_weights: {}", cfg.use_custom_weights);
    println!("show_consensus_on_board: {}", cfg.show_consensus_on_board);
    println!("candidate_limit: {}", cfg.candidate_limit);
    println!();
    println!("[drag]");
    println!("slot_padding: {}", cfg.drag.slot_padding);
    println!("dead_zone: {}", cfg.drag.dead_zone);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Open the store named on the command line, or the configured one
fn create_store(data: Option<PathBuf>, config: &config::Config) -> anyhow::Result<FileStore> {
    let path = data
        .or_else(|| config.data_path())
        .context("Unable to determine data path; pass --data")?;
    tracing::debug!("STORE: using {}", path.display());
    FileStore::open(&path).with_context(|| format!("Failed to open store {}", path.display()))
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    store: Arc<FileStore>,
    config: &config::Config,
    view: BigBoardView,
    command: Commands,
) -> anyhow::Result<()> {
    let client: Arc<dyn ScoutDataProvider> = store.clone();
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Board => commands::board::run(client, config, view).await,
        Commands::Candidates { query } => {
            commands::candidates::run(client, config, view, query).await
        }
        Commands::Add { player_id, rank, bottom } => {
            let at = AddAt::from_args(rank, bottom);
            commands::add::run(client, config, view, player_id, at).await
        }
        Commands::Move { player_id, rank } => {
            commands::reorder::run(client, config, view, player_id, rank).await
        }
        Commands::Remove { player_id } => {
            commands::remove::run(client, config, view, player_id).await
        }
        Commands::Autosort { yes } => commands::autosort::run(client, config, view, yes).await,
        Commands::Boards { mode } => {
            let mode = mode.map(Mode::to_weighting_mode);
            commands::settings::run_list(client, config, mode).await
        }
        Commands::Weight { board_key, weight } => {
            commands::settings::run_weight(client, config, &board_key, weight).await
        }
        Commands::Primary { board_key } => {
            commands::settings::run_primary(client, config, &board_key).await
        }
        Commands::Visibility { board_key, visible } => {
            commands::settings::run_visibility(client, config, &board_key, visible).await
        }
        Commands::Player { player_id } => commands::player::run(client, config, player_id).await,
        Commands::Seed { force } => commands::seed::run(&store, force).await,
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // Handle Config command separately (doesn't need a store)
    if let Commands::Config = cli.command {
        handle_config_command();
        return;
    }

    let view = commands::parse_view(cli.position.clone());
    let result = match create_store(cli.data.clone(), &config) {
        Ok(store) => execute_command(Arc::new(store), &config, view, cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
