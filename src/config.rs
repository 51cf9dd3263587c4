//! Configuration loaded from `gomoku.toml`.

use crate::providers::{Provider, ProviderSettings};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Top-level configuration.
///
/// Every field has a default, so a missing or empty file is valid.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GomokuConfig {
    /// Where the game snapshot is persisted.
    #[serde(default = "default_state_path")]
    state_path: PathBuf,

    /// Whether a text board render is written after each move.
    #[serde(default = "default_render")]
    render: bool,

    /// Where the board render goes.
    #[serde(default = "default_render_path")]
    render_path: PathBuf,

    /// Analysis provider settings.
    #[serde(default)]
    analysis: AnalysisConfig,
}

/// LLM settings for the `analyze` command.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// LLM provider (anthropic or openai).
    #[serde(default = "default_provider")]
    provider: Provider,

    /// Model name.
    #[serde(default = "default_model")]
    model: String,

    /// Maximum tokens for the response.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    temperature: f32,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("gamestate.json")
}

fn default_render() -> bool {
    true
}

fn default_render_path() -> PathBuf {
    PathBuf::from("gomoku.txt")
}

fn default_provider() -> Provider {
    Provider::Anthropic
}

fn default_model() -> String {
    "claude-3-7-sonnet-20250219".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.6
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for GomokuConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            render: default_render(),
            render_path: default_render_path(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl GomokuConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(state_path = %config.state_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the snapshot path.
    pub fn with_state_path(mut self, path: PathBuf) -> Self {
        self.state_path = path;
        self
    }

    /// Renders to `path`, enabling rendering.
    pub fn with_render_path(mut self, path: PathBuf) -> Self {
        self.render = true;
        self.render_path = path;
        self
    }

    /// Turns rendering off.
    pub fn without_render(mut self) -> Self {
        self.render = false;
        self
    }

    /// The render file, or `None` when rendering is off.
    pub fn render_target(&self) -> Option<&Path> {
        self.render.then_some(self.render_path.as_path())
    }

    /// Provider settings for analysis, with the API key read from the
    /// provider's environment variable.
    #[instrument(skip(self), fields(provider = %self.analysis.provider, model = %self.analysis.model))]
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let var = self.analysis.provider.api_key_var();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "AI analysis not available - {} environment variable not set",
                    var
                ))
            })?;

        Ok(ProviderSettings::new(
            self.analysis.provider,
            api_key,
            self.analysis.model.clone(),
            self.analysis.max_tokens,
            self.analysis.temperature,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GomokuConfig = toml::from_str("").unwrap();
        assert_eq!(config.state_path(), &PathBuf::from("gamestate.json"));
        assert_eq!(config.render_target(), Some(Path::new("gomoku.txt")));
        assert_eq!(*config.analysis().provider(), Provider::Anthropic);
        assert_eq!(*config.analysis().max_tokens(), 1000);
    }

    #[test]
    fn test_partial_analysis_section() {
        let config: GomokuConfig = toml::from_str(
            r#"
            state_path = "games/current.json"

            [analysis]
            provider = "openai"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.state_path(), &PathBuf::from("games/current.json"));
        assert_eq!(*config.analysis().provider(), Provider::OpenAI);
        assert_eq!(config.analysis().model(), "gpt-4o-mini");
        assert_eq!(*config.analysis().max_tokens(), 1000);
    }

    #[test]
    fn test_unknown_provider_fails() {
        let result: Result<GomokuConfig, _> = toml::from_str("[analysis]\nprovider = \"bedrock\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_render_can_be_disabled_in_file() {
        let config: GomokuConfig = toml::from_str("render = false").unwrap();
        assert_eq!(config.render_target(), None);

        let config = config.with_render_path(PathBuf::from("out/board.txt"));
        assert_eq!(config.render_target(), Some(Path::new("out/board.txt")));
        assert_eq!(config.without_render().render_target(), None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = GomokuConfig::load_or_default("/nonexistent/gomoku.toml").unwrap();
        assert_eq!(config.state_path(), &PathBuf::from("gamestate.json"));
    }
}
