//! Command-line interface for gomoku.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gomoku - five in a row on a 15x15 board
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Five-in-a-row game simulator with AI commentary", long_about = None)]
#[command(version)]
#[command(after_help = "\
Move Format:
  <Column>-<Row>-<Piece>
  Column: A-O (A=leftmost, O=rightmost)
  Row: 01-15 (01=top, 15=bottom)
  Piece: X=Black, O=White
  Example: H-08-X (Black stone at center)

Notes:
  - Game auto-initializes on first move
  - Board render updates automatically after each move
  - White moves first")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gomoku.toml", global = true)]
    pub config: PathBuf,

    /// Override the game state file
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Override the board render file
    #[arg(long, global = true, conflicts_with = "no_render")]
    pub render: Option<PathBuf>,

    /// Do not write a board render after moves
    #[arg(long, global = true)]
    pub no_render: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make a move (e.g. gomoku move H-08-X)
    Move {
        /// Move text: <Column>-<Row>-<Piece>
        #[arg(value_name = "MOVE")]
        text: String,
    },

    /// Show current game status and board
    Status,

    /// Show complete move history
    History,

    /// AI strategic analysis (requires an API key)
    Analyze,

    /// Discard the current game
    Reset,
}
