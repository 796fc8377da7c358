//! Text rendering of the board, scores and claim results
//!
//! Level 4 - formatting utilities

use dots_core::{Cell, ClaimResult, Edge, GameConfig, GameEngine, GameStatus, Winner};

/// Draw the grid: `+` dots, `---`/`|` claimed edges, owner labels in boxes
pub fn render_board(game: &GameEngine, config: &GameConfig) -> String {
    let board = game.board();
    let n = board.size();
    let mut lines = Vec::with_capacity(2 * n + 2);

    let mut header = String::from("   ");
    for col in 0..=n {
        header.push_str(&format!("{:<4}", col));
    }
    lines.push(header);

    for row in 0..=n {
        let mut line = format!("{:<3}", row);
        for col in 0..n {
            line.push('+');
            line.push_str(if board.is_claimed(Edge::horizontal(row, col)) { "---" } else { "   " });
        }
        line.push('+');
        lines.push(line);

        if row == n {
            break;
        }

        let mut line = String::from("   ");
        for col in 0..=n {
            line.push(if board.is_claimed(Edge::vertical(row, col)) { '|' } else { ' ' });
            if col < n {
                line.push_str(&box_label(game, config, Cell::new(row, col)));
            }
        }
        lines.push(line);
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Three-character interior of a box
fn box_label(game: &GameEngine, config: &GameConfig, cell: Cell) -> String {
    match game.board().cell_owner(cell) {
        Some(owner) => {
            let label: String = config.label(owner).chars().take(3).collect();
            format!("{:^3}", label)
        }
        None => "   ".to_string(),
    }
}

/// "P1: 3 - P2: 1"
pub fn score_line(game: &GameEngine, config: &GameConfig) -> String {
    let scores = game.scores();
    format!(
        "{}: {} - {}: {}",
        config.player_one_label, scores.player_one, config.player_two_label, scores.player_two
    )
}

/// Whose turn it is, or the end-of-game message
pub fn status_line(game: &GameEngine, config: &GameConfig) -> String {
    match game.status() {
        GameStatus::InProgress => format!("{}'s Turn", game.current_player()),
        GameStatus::Over(Winner::Player(player)) => {
            format!("Game Over! {} ({}) Wins!", config.label(player), player)
        }
        GameStatus::Over(Winner::Tie) => "Game Over! It's a Tie!".to_string(),
    }
}

/// One-line summary of an accepted claim
pub fn describe_claim(result: &ClaimResult) -> String {
    let mut text = format!("{} claimed {}", result.player, result.edge);
    if !result.completed_cells.is_empty() {
        let cells: Vec<String> = result
            .completed_cells
            .iter()
            .map(|completed| completed.cell.to_string())
            .collect();
        text.push_str(&format!(" and completed {}", cells.join(", ")));
        if !result.status.is_over() {
            text.push_str(" (extra turn)");
        }
    }
    text
}

/// Board, scores and status as shown after every move
pub fn render_frame(game: &GameEngine, config: &GameConfig) -> String {
    format!(
        "{}\n{}\n{}",
        render_board(game, config),
        score_line(game, config),
        status_line(game, config)
    )
}
