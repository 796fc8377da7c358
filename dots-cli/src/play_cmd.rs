//! Play command - interactive two-player game on the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session() - read/claim/render loop
//! - Level 3: handle_line() - one line of input
//! - Level 4: rendering (see render.rs)

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use dots_core::{Edge, GameConfig, GameEngine};

use crate::render::{describe_claim, render_frame};
use crate::setup::SetupArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
}

const HELP: &str = "Enter an edge as `h <row> <col>` or `v <row> <col>`; `quit` to leave.
Horizontal edges: row 0..=N, col 0..N. Vertical edges: row 0..N, col 0..=N.";

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.setup.resolve()?;
    let game = config.new_game()?;

    tracing::info!("Starting {}x{} game", config.grid_size, config.grid_size);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let game = play_session(game, &config, stdin.lock(), stdout.lock())?;

    tracing::info!(
        "Session ended after {} claims (over: {})",
        game.history().len(),
        game.is_over()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - SESSION LOOP
// ============================================================================

/// Read edges from `input` until the game ends, input runs out, or the
/// player quits. Returns the final game.
pub fn play_session<R: BufRead, W: Write>(
    mut game: GameEngine,
    config: &GameConfig,
    input: R,
    mut output: W,
) -> Result<GameEngine> {
    writeln!(output, "{}", HELP)?;
    writeln!(output, "{}", render_frame(&game, config))?;

    for line in input.lines() {
        let line = line?;
        if handle_line(&mut game, config, line.trim(), &mut output)? == Step::Quit {
            break;
        }
        if game.is_over() {
            break;
        }
    }

    Ok(game)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn handle_line<W: Write>(
    game: &mut GameEngine,
    config: &GameConfig,
    line: &str,
    output: &mut W,
) -> Result<Step> {
    match line {
        "" => return Ok(Step::Continue),
        "quit" | "q" | "exit" => return Ok(Step::Quit),
        "help" | "?" => {
            writeln!(output, "{}", HELP)?;
            return Ok(Step::Continue);
        }
        _ => {}
    }

    let edge: Edge = match line.parse() {
        Ok(edge) => edge,
        Err(err) => {
            writeln!(output, "Could not read move: {}", err)?;
            return Ok(Step::Continue);
        }
    };

    match game.claim_edge(edge) {
        Ok(result) => {
            writeln!(output, "{}", describe_claim(&result))?;
            writeln!(output, "{}", render_frame(game, config))?;
        }
        Err(err) if err.is_fatal() => return Err(err.into()),
        Err(err) => {
            tracing::debug!("Rejected claim {}: {}", edge, err);
            writeln!(output, "Rejected: {}", err)?;
        }
    }

    Ok(Step::Continue)
}

// ============================================================================
// TESTS
// ============================================================================
