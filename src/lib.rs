//! Gomoku command-line application.
//!
//! Game rules live in [`strictly_gomoku`]; this crate adds what surrounds
//! them: a JSON snapshot store, a text board render, LLM commentary cached
//! by board hash, and the command handlers the `gomoku` binary dispatches to.
//!
//! # Example
//!
//! ```no_run
//! use strictly_gomoku_cli::{GameCommands, JsonFileStore, RenderArtifact};
//!
//! # fn example() -> Result<(), strictly_gomoku_cli::CommandError> {
//! let commands = GameCommands::new(
//!     JsonFileStore::new("gamestate.json"),
//!     Some(RenderArtifact::new("gomoku.txt".into())),
//! );
//! println!("{}", commands.play("H-08-O")?);
//! println!("{}", commands.history()?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod analysis;
mod commands;
mod config;
mod providers;
mod render;
mod storage;

// Crate-level exports - Analysis
pub use analysis::{
    AnalysisError, AnalysisReport, Analyst, CACHED_PREFIX, SYSTEM_PROMPT, analysis_prompt,
    request_analysis,
};

// Crate-level exports - Commands
pub use commands::{
    CommandError, GameCommands, MOVE_FORMAT_HELP, MoveReport, history_report, status_report,
};

// Crate-level exports - Configuration
pub use config::{AnalysisConfig, ConfigError, GomokuConfig};

// Crate-level exports - Providers
pub use providers::{
    AnthropicCommentator, Commentator, OpenAiCommentator, Provider, ProviderError,
    ProviderSettings,
};

// Crate-level exports - Rendering
pub use render::{RenderArtifact, RenderStatus, render_board};

// Crate-level exports - Storage
pub use storage::{JsonFileStore, StateStore, StorageError};
