//! Replay command - apply a recorded list of edges to a fresh game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_moves(), replay_moves(), report
//! - Level 3: apply_move()
//! - Level 4: formatting utilities (see render.rs)

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dots_core::{Edge, GameConfig, GameEngine};

use crate::render::{describe_claim, render_frame};
use crate::setup::SetupArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON array of edges, e.g. [{"orientation":"horizontal","row":0,"col":0}]
    #[arg(long, value_name = "FILE")]
    pub moves: PathBuf,

    #[command(flatten)]
    pub setup: SetupArgs,

    /// Print each claim result as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Skip rejected moves instead of stopping
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Options for a replay run
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplayOptions {
    pub json: bool,
    pub skip_invalid: bool,
}

/// Counts from a finished replay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub skipped: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load config and moves
/// 2. Apply moves in order
/// 3. Print the final board (to stderr in JSON mode)
pub fn run(args: ReplayArgs) -> Result<()> {
    let config = args.setup.resolve()?;
    let moves = load_moves(&args.moves)?;

    tracing::info!(
        "Replaying {} moves on a {}x{} board",
        moves.len(),
        config.grid_size,
        config.grid_size
    );

    let options = ReplayOptions {
        json: args.json,
        skip_invalid: args.skip_invalid,
    };
    let mut game = config.new_game()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = replay_moves(&mut game, &moves, options, &mut out)?;
    report_final(&game, &config, options, &mut out, &mut io::stderr())?;

    tracing::info!("Applied {} moves, skipped {}", summary.applied, summary.skipped);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read a JSON array of edges
pub fn load_moves(path: &Path) -> Result<Vec<Edge>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read moves: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse moves: {}", path.display()))
}

/// Apply `moves` in order, writing one line per accepted claim
pub fn replay_moves<W: Write>(
    game: &mut GameEngine,
    moves: &[Edge],
    options: ReplayOptions,
    out: &mut W,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, &edge) in moves.iter().enumerate() {
        if apply_move(game, index, edge, options, out)? {
            summary.applied += 1;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

/// Final board and status. JSON mode keeps `out` to JSON lines only.
pub fn report_final<W: Write, E: Write>(
    game: &GameEngine,
    config: &GameConfig,
    options: ReplayOptions,
    out: &mut W,
    diagnostics: &mut E,
) -> Result<()> {
    let frame = render_frame(game, config);
    if options.json {
        writeln!(diagnostics, "{}", frame)?;
    } else {
        writeln!(out, "{}", frame)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Returns false when the move was rejected and skipped
fn apply_move<W: Write>(
    game: &mut GameEngine,
    index: usize,
    edge: Edge,
    options: ReplayOptions,
    out: &mut W,
) -> Result<bool> {
    match game.claim_edge(edge) {
        Ok(result) => {
            if options.json {
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
            } else {
                writeln!(out, "{}", describe_claim(&result))?;
            }
            Ok(true)
        }
        Err(err) if options.skip_invalid && !err.is_fatal() => {
            tracing::warn!("Skipping move {} ({}): {}", index, edge, err);
            Ok(false)
        }
        Err(err) => Err(err).with_context(|| format!("Move {} ({}) rejected", index, edge)),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dots_core::{ClaimResult, GameError, GameStatus, Winner, Player};

    fn single_cell_moves() -> Vec<Edge> {
        vec![
            Edge::horizontal(0, 0),
            Edge::horizontal(1, 0),
            Edge::vertical(0, 0),
            Edge::vertical(0, 1),
        ]
    }

    #[test]
    fn test_replay_text() {
        let mut game = GameEngine::new(1).unwrap();
        let mut out = Vec::new();
        let summary =
            replay_moves(&mut game, &single_cell_moves(), ReplayOptions::default(), &mut out).unwrap();

        assert_eq!(summary, ReplaySummary { applied: 4, skipped: 0 });
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next(), Some("Player 1 claimed h(0,0)"));
    }

    #[test]
    fn test_replay_json() {
        let mut game = GameEngine::new(1).unwrap();
        let mut out = Vec::new();
        let options = ReplayOptions { json: true, skip_invalid: false };
        replay_moves(&mut game, &single_cell_moves(), options, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let last: ClaimResult = serde_json::from_str(text.lines().last().unwrap()).unwrap();
        assert_eq!(last.status, GameStatus::Over(Winner::Player(Player::Two)));
        assert_eq!(last.completed_cells.len(), 1);
    }

    #[test]
    fn test_final_board_in_json_mode() {
        let config = GameConfig::with_size(1);
        let mut game = config.new_game().unwrap();
        let options = ReplayOptions { json: true, skip_invalid: false };
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();

        replay_moves(&mut game, &single_cell_moves(), options, &mut out).unwrap();
        report_final(&game, &config, options, &mut out, &mut diagnostics).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out
            .lines()
            .all(|line| serde_json::from_str::<ClaimResult>(line).is_ok()));
        let diagnostics = String::from_utf8(diagnostics).unwrap();
        assert!(diagnostics.contains("|P2 |"));
        assert!(diagnostics.ends_with("Game Over! P2 (Player 2) Wins!\n"));
    }

    #[test]
    fn test_final_board_in_text_mode() {
        let config = GameConfig::with_size(1);
        let game = config.new_game().unwrap();
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();

        report_final(&game, &config, ReplayOptions::default(), &mut out, &mut diagnostics).unwrap();

        assert!(diagnostics.is_empty());
        assert!(String::from_utf8(out).unwrap().ends_with("Player 1's Turn\n"));
    }

    #[test]
    fn test_rejection_stops_replay() {
        let mut game = GameEngine::new(1).unwrap();
        let moves = vec![Edge::horizontal(0, 0), Edge::horizontal(0, 0), Edge::vertical(0, 0)];
        let err = replay_moves(&mut game, &moves, ReplayOptions::default(), &mut Vec::new())
            .unwrap_err();

        assert!(err.to_string().contains("Move 1 (h(0,0)) rejected"));
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::AlreadyClaimed(Edge::horizontal(0, 0)))
        );
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_skip_invalid() {
        let mut game = GameEngine::new(1).unwrap();
        let mut moves = single_cell_moves();
        moves.insert(1, Edge::vertical(4, 4));
        moves.push(Edge::horizontal(0, 0));

        let options = ReplayOptions { json: false, skip_invalid: true };
        let summary = replay_moves(&mut game, &moves, options, &mut Vec::new()).unwrap();
        assert_eq!(summary, ReplaySummary { applied: 4, skipped: 2 });
        assert!(game.is_over());
    }

    #[test]
    fn test_load_moves() {
        let path = std::env::temp_dir().join(format!("dots-moves-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"orientation":"horizontal","row":0,"col":0},{"orientation":"vertical","row":0,"col":1}]"#,
        )
        .unwrap();
        let moves = load_moves(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(moves, vec![Edge::horizontal(0, 0), Edge::vertical(0, 1)]);
    }
}
