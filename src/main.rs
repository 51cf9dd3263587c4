//! Gomoku - command-line entry point.
//!
//! Reports go to stdout; logs go to stderr, filtered by `RUST_LOG`.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;
use strictly_gomoku_cli::{
    CommandError, Commentator, GameCommands, GomokuConfig, JsonFileStore, MOVE_FORMAT_HELP,
    RenderArtifact,
};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_gomoku=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!(?config, "Effective configuration");

    let commands = GameCommands::new(
        JsonFileStore::new(config.state_path()),
        config.render_target().map(|path| RenderArtifact::new(path.to_path_buf())),
    );

    match run(&cli.command, &commands, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.rejection().is_some() {
                eprintln!("\n{}", MOVE_FORMAT_HELP);
            }
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

/// Loads the config file and applies command-line overrides.
#[instrument(skip_all, fields(path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<GomokuConfig> {
    let mut config = GomokuConfig::load_or_default(&cli.config)?;
    if let Some(state) = &cli.state {
        config = config.with_state_path(state.clone());
    }
    if cli.no_render {
        config = config.without_render();
    } else if let Some(render) = &cli.render {
        config = config.with_render_path(render.clone());
    }
    Ok(config)
}

/// Dispatches one command and prints its report.
#[instrument(skip_all)]
async fn run(
    command: &Command,
    commands: &GameCommands<JsonFileStore>,
    config: &GomokuConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Move { text } => println!("{}", commands.play(text)?),
        Command::Status => println!("{}", commands.status()?),
        Command::History => println!("{}", commands.history()?),
        Command::Analyze => {
            let rule = "=".repeat(80);
            println!("Analyzing current position...");
            println!("{}", rule);
            let report = commands
                .analyze(|| config.provider_settings().map(Commentator::connect))
                .await?;
            println!("{}", report);
            println!("{}", rule);
        }
        Command::Reset => {
            if commands.reset()? {
                println!("Game reset. White moves first.");
            } else {
                println!("No game in progress.");
            }
        }
    }
    Ok(())
}
