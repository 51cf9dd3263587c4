//! Position commentary from an LLM, gated by the board content hash.

use async_trait::async_trait;
use derive_more::{Display, Error, From};
use strictly_gomoku::GameState;
use tracing::{debug, info, instrument};

use crate::config::ConfigError;
use crate::providers::ProviderError;

/// System prompt for the commentator.
pub const SYSTEM_PROMPT: &str = "You are a professional Gomoku (Five in a Row) game analyst and commentator. \
Provide strategic insights like a sports commentator, analyzing the current position, \
player advantages and disadvantages, and tactical opportunities. \
Be clear, engaging, and educational in your analysis.";

/// Prefix marking a reused analysis.
pub const CACHED_PREFIX: &str = "[CACHED ANALYSIS]";

/// Something that turns a prompt into commentary.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Produces analysis text for `prompt` under `system`.
    async fn analyze(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Analysis text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisReport {
    /// Reused from the snapshot; the board has not changed since.
    Cached(String),
    /// Produced by the analyst for this request.
    Fresh(String),
}

impl AnalysisReport {
    /// The analysis text without any prefix.
    pub fn text(&self) -> &str {
        match self {
            AnalysisReport::Cached(text) | AnalysisReport::Fresh(text) => text,
        }
    }

    /// True when no analyst was consulted.
    pub fn is_cached(&self) -> bool {
        matches!(self, AnalysisReport::Cached(_))
    }
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisReport::Cached(text) => write!(f, "{}\n{}", CACHED_PREFIX, text),
            AnalysisReport::Fresh(text) => f.write_str(text),
        }
    }
}

/// Why analysis could not be produced.
#[derive(Debug, Clone, Display, Error, From)]
pub enum AnalysisError {
    /// No analyst could be configured.
    #[display("{}", _0)]
    Unavailable(ConfigError),
    /// The analyst was reached but failed.
    #[display("{}", _0)]
    Failed(ProviderError),
}

/// Returns analysis for the current board, consulting an analyst only on a
/// cache miss.
///
/// `connect` is invoked lazily, so a cached result is served even when no
/// analyst is configured. A fresh result is stored in `state` under the
/// current board hash.
#[instrument(skip_all, fields(moves = state.moves().len()))]
pub async fn request_analysis<A, F>(
    state: &mut GameState,
    connect: F,
) -> Result<AnalysisReport, AnalysisError>
where
    A: Analyst,
    F: FnOnce() -> Result<A, ConfigError>,
{
    if let Some(text) = state.cached_analysis() {
        info!(hash = %state.current_hash(), "Serving cached analysis");
        return Ok(AnalysisReport::Cached(text.to_string()));
    }

    let analyst = connect()?;
    let prompt = analysis_prompt(state);
    debug!(prompt_len = prompt.len(), "Requesting fresh analysis");
    let text = analyst.analyze(SYSTEM_PROMPT, &prompt).await?;

    let stored = state.store_analysis(text).to_string();
    info!(len = stored.len(), "Analysis cached");
    Ok(AnalysisReport::Fresh(stored))
}

/// Builds the user prompt: legend, board, history, status and the questions.
pub fn analysis_prompt(state: &GameState) -> String {
    let history = if state.moves().is_empty() {
        "No moves played yet - empty board".to_string()
    } else {
        state
            .moves()
            .iter()
            .map(|record| {
                format!(
                    "{}. {} = {} ({} player)",
                    record.number(),
                    record.position(),
                    record.piece(),
                    record.player()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let recommendation = if state.is_over() {
        String::new()
    } else {
        format!(
            "\n6. **Recommended Move**: Best next move for {} with detailed reasoning",
            state.current_turn()
        )
    };

    format!(
        r#"You are analyzing a Gomoku (Five in a Row) board. ACCURACY IS CRITICAL - read the board very carefully.

**BOARD SYMBOLS:**
- '+' = Empty intersection
- 'O' = WHITE stone
- 'X' = BLACK stone

**COORDINATE SYSTEM:**
- Columns: A-O (left to right)
- Rows: 01-15 (top to bottom)
- Example: H-08 means column H, row 8

**CURRENT BOARD POSITION:**
{board}
**MOVE HISTORY FOR VERIFICATION:**
{history}

**GAME STATUS:** {status}
**TOTAL MOVES:** {total}

**STEP 1: BOARD VERIFICATION (REQUIRED)**
Before analysis, verify the board by listing ALL stone positions:
- List each WHITE stone position (O) with its coordinates
- List each BLACK stone position (X) with its coordinates
- Cross-check these positions against the move history above
- If any discrepancies are found, note them clearly

**STEP 2: STRATEGIC ANALYSIS**
After verifying the board, provide comprehensive analysis:

1. **Position Summary**: Describe stone formations and patterns
2. **BLACK's Position**: Analyze advantages, threats, opportunities
3. **WHITE's Position**: Analyze advantages, threats, opportunities
4. **Tactical Assessment**: Immediate threats and key intersections
5. **Strategic Outlook**: Who has the better position and why{recommendation}

**CRITICAL REMINDERS:**
- Double-check each stone position against coordinates
- 'O' = WHITE, 'X' = BLACK - do not confuse these
- Verify your stone counts match the move history
- Be extremely careful with coordinate mapping (A-O columns, 01-15 rows)
"#,
        board = state.board(),
        history = history,
        status = state.status_line(),
        total = state.moves().len(),
        recommendation = recommendation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_history_and_recommendation() {
        let state = GameState::replay(["H-08-O", "I-08-X"]).unwrap();
        let prompt = analysis_prompt(&state);
        assert!(prompt.contains("1. H-08 = O (WHITE player)"));
        assert!(prompt.contains("2. I-08 = X (BLACK player)"));
        assert!(prompt.contains("**GAME STATUS:** WHITE to move"));
        assert!(prompt.contains("**TOTAL MOVES:** 2"));
        assert!(prompt.contains("Best next move for WHITE"));
    }

    #[test]
    fn test_prompt_empty_board() {
        let prompt = analysis_prompt(&GameState::new());
        assert!(prompt.contains("No moves played yet - empty board"));
        assert!(prompt.contains("**TOTAL MOVES:** 0"));
        assert!(prompt.contains("**Recommended Move**: Best next move for WHITE"));
    }

    #[test]
    fn test_prompt_omits_recommendation_when_over() {
        let state = GameState::replay([
            "A-01-O", "A-02-X", "B-01-O", "B-02-X", "C-01-O", "C-02-X", "D-01-O", "D-02-X",
            "E-01-O",
        ])
        .unwrap();
        let prompt = analysis_prompt(&state);
        assert!(prompt.contains("Game Over - WHITE wins!"));
        assert!(!prompt.contains("Recommended Move"));
    }

    #[test]
    fn test_cached_report_display() {
        let report = AnalysisReport::Cached("Even game.".to_string());
        assert_eq!(report.to_string(), "[CACHED ANALYSIS]\nEven game.");
        assert_eq!(AnalysisReport::Fresh("x".into()).to_string(), "x");
    }
}
