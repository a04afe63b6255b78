// Brand Factory CLI — entry point.
// Interview talent, extract brand DNA, generate ideas and scripts from the
// terminal, plus offline snapshot and config tools.

mod render;
mod repl;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, LevelFilter};

use brandfactory_lib::commands;
use brandfactory_lib::engine::config::{default_config_path, load_config};
use brandfactory_lib::{FactoryConfig, FactoryState};

#[derive(Parser)]
#[command(name = "brandfactory")]
#[command(version, about = "Brand Factory: talent interviews, brand DNA, video ideas and scripts", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/brandfactory/config.toml)
    #[arg(long, global = true, env = "BRANDFACTORY_CONFIG")]
    config: Option<PathBuf>,

    /// API key for the text and transcription services. Overrides the
    /// config file; OPENAI_API_KEY only fills an empty key.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: interview, extract, ideate, script
    Chat {
        /// Snapshot to import before the session starts
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Offline snapshot tools
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },

    /// Configuration tools
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Validate a snapshot file and summarise its contents
    Check { file: PathBuf },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (API key masked)
    Show,
    /// Write a starter config file
    Init,
}

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// File (or defaults) first, then the environment fallback, then `--api-key`.
fn effective_config(path: Option<&Path>, api_key: Option<String>) -> Result<FactoryConfig, String> {
    let mut config = load_config(path).map_err(|e| e.to_string())?;
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.provider.api_key = key.trim().to_string();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Snapshot { action: SnapshotAction::Check { file } } => {
            let summary = commands::snapshot::check_snapshot(&file)?;
            println!("{} is a valid snapshot", file.display());
            render::print_summary(&summary);
            Ok(())
        }
        Commands::Config { action: ConfigAction::Init } => {
            let path = cli
                .config
                .or_else(default_config_path)
                .ok_or("no config directory on this platform; pass --config")?;
            commands::config::init_config(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Config { action: ConfigAction::Show } => {
            let config = effective_config(cli.config.as_deref(), cli.api_key)?;
            print!("{}", commands::config::show_config(&config)?);
            Ok(())
        }
        Commands::Chat { snapshot } => {
            let config = effective_config(cli.config.as_deref(), cli.api_key)?;
            let mut state = FactoryState::from_config(config).map_err(|e| e.to_string())?;
            if let Some(path) = snapshot {
                let summary = commands::snapshot::import_snapshot(&mut state, &path)?;
                render::print_summary(&summary);
            }
            repl::run(&mut state).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
