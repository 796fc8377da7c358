//! Board geometry: edges and cells on an N x N grid of boxes
//!
//! Dots sit at integer points `(row, col)` with `0 <= row, col <= N`.
//! A horizontal edge at `(row, col)` joins dot `(row, col)` to `(row, col + 1)`;
//! a vertical edge at `(row, col)` joins dot `(row, col)` to `(row + 1, col)`.
//! Cell `(row, col)` is the box whose top-left dot is `(row, col)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, ParseEdgeError};
use crate::game::Player;

// ============================================================================
// COORDINATES
// ============================================================================

/// Edge orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A claimable line between two adjacent dots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl Edge {
    pub const fn new(orientation: Orientation, row: usize, col: usize) -> Self {
        Self { orientation, row, col }
    }

    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self::new(Orientation::Horizontal, row, col)
    }

    pub const fn vertical(row: usize, col: usize) -> Self {
        Self::new(Orientation::Vertical, row, col)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{}({},{})", tag, self.row, self.col)
    }
}

/// Accepts `h 2 3`, `v 0 1`, `h(2,3)` and `horizontal 2 3`
impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c })
            .collect();
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        let [tag, row, col] = parts.as_slice() else {
            return Err(ParseEdgeError::Malformed(s.trim().to_string()));
        };

        let orientation = match *tag {
            "h" | "horizontal" => Orientation::Horizontal,
            "v" | "vertical" => Orientation::Vertical,
            other => return Err(ParseEdgeError::Orientation(other.to_string())),
        };
        let row = row
            .parse()
            .map_err(|_| ParseEdgeError::Coordinate(row.to_string()))?;
        let col = col
            .parse()
            .map_err(|_| ParseEdgeError::Coordinate(col.to_string()))?;

        Ok(Edge::new(orientation, row, col))
    }
}

/// One unit box of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Largest supported side length
pub const MAX_GRID_SIZE: usize = 1024;

/// Reject sizes outside `1..=MAX_GRID_SIZE`
pub fn check_grid_size(size: usize) -> Result<(), GameError> {
    if size == 0 || size > MAX_GRID_SIZE {
        return Err(GameError::InvalidGridSize(size));
    }
    Ok(())
}

/// Edge and cell ownership for an N x N grid (no turn logic)
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,

    /// Horizontal edges, (size + 1) rows of `size`, row-major
    horizontal: Vec<Option<Player>>,

    /// Vertical edges, `size` rows of (size + 1), row-major
    vertical: Vec<Option<Player>>,

    /// Cell owners, row-major
    cells: Vec<Option<Player>>,
}

impl Board {
    /// Create an empty board with `size * size` cells
    pub fn new(size: usize) -> Result<Self, GameError> {
        check_grid_size(size)?;
        Ok(Self {
            size,
            horizontal: vec![None; (size + 1) * size],
            vertical: vec![None; size * (size + 1)],
            cells: vec![None; size * size],
        })
    }

    /// Number of cells along one side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    // ========================================================================
    // EDGES
    // ========================================================================

    /// Storage index of an on-grid edge within its orientation's vec
    fn edge_index(&self, edge: Edge) -> Option<(Orientation, usize)> {
        let n = self.size;
        match edge.orientation {
            Orientation::Horizontal if edge.row <= n && edge.col < n => {
                Some((Orientation::Horizontal, edge.row * n + edge.col))
            }
            Orientation::Vertical if edge.row < n && edge.col <= n => {
                Some((Orientation::Vertical, edge.row * (n + 1) + edge.col))
            }
            _ => None,
        }
    }

    fn edge_slots(&self, orientation: Orientation) -> &[Option<Player>] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    fn edge_slots_mut(&mut self, orientation: Orientation) -> &mut [Option<Player>] {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    /// Check if the edge lies within the grid
    pub fn is_valid_edge(&self, edge: Edge) -> bool {
        self.edge_index(edge).is_some()
    }

    /// Player who claimed the edge (None if unclaimed or off the grid)
    pub fn edge_owner(&self, edge: Edge) -> Option<Player> {
        self.edge_index(edge)
            .and_then(|(orientation, idx)| self.edge_slots(orientation)[idx])
    }

    /// Check if the edge has been claimed
    pub fn is_claimed(&self, edge: Edge) -> bool {
        self.edge_owner(edge).is_some()
    }

    /// Mark an edge as claimed by `player`. Touches edge state only.
    pub fn claim(&mut self, edge: Edge, player: Player) -> Result<(), GameError> {
        let (orientation, idx) = self.edge_index(edge).ok_or(GameError::InvalidEdge(edge))?;
        let slot = &mut self.edge_slots_mut(orientation)[idx];

        if slot.is_some() {
            return Err(GameError::AlreadyClaimed(edge));
        }
        *slot = Some(player);
        Ok(())
    }

    /// Cells bordering the edge, above/left first then below/right
    pub fn adjacent_cells(&self, edge: Edge) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(2);
        if !self.is_valid_edge(edge) {
            return cells;
        }

        match edge.orientation {
            Orientation::Horizontal => {
                if edge.row > 0 {
                    cells.push(Cell::new(edge.row - 1, edge.col));
                }
                if edge.row < self.size {
                    cells.push(Cell::new(edge.row, edge.col));
                }
            }
            Orientation::Vertical => {
                if edge.col > 0 {
                    cells.push(Cell::new(edge.row, edge.col - 1));
                }
                if edge.col < self.size {
                    cells.push(Cell::new(edge.row, edge.col));
                }
            }
        }
        cells
    }

    /// All edges, horizontal row-major then vertical row-major
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.size;
        let horizontal = (0..=n).flat_map(move |row| (0..n).map(move |col| Edge::horizontal(row, col)));
        let vertical = (0..n).flat_map(move |row| (0..=n).map(move |col| Edge::vertical(row, col)));
        horizontal.chain(vertical)
    }

    /// Edges nobody has claimed yet, in `edges()` order
    pub fn unclaimed_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges().filter(move |&edge| !self.is_claimed(edge))
    }

    // ========================================================================
    // CELLS
    // ========================================================================

    fn cell_index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.size && cell.col < self.size).then(|| cell.row * self.size + cell.col)
    }

    /// Top, bottom, left, right
    pub fn cell_bounding_edges(&self, cell: Cell) -> [Edge; 4] {
        [
            Edge::horizontal(cell.row, cell.col),
            Edge::horizontal(cell.row + 1, cell.col),
            Edge::vertical(cell.row, cell.col),
            Edge::vertical(cell.row, cell.col + 1),
        ]
    }

    /// Check if all four bounding edges are claimed
    pub fn is_cell_complete(&self, cell: Cell) -> bool {
        self.cell_index(cell).is_some()
            && self
                .cell_bounding_edges(cell)
                .iter()
                .all(|&edge| self.is_claimed(edge))
    }

    /// Owner of the cell (None if unowned or off the grid)
    pub fn cell_owner(&self, cell: Cell) -> Option<Player> {
        self.cell_index(cell).and_then(|idx| self.cells[idx])
    }

    /// Award a cell. Ownership is permanent.
    pub fn set_cell_owner(&mut self, cell: Cell, player: Player) -> Result<bool, GameError> {
        let idx = self.cell_index(cell).ok_or(GameError::InvalidCell(cell))?;
        if self.cells[idx].is_some() {
            return Err(GameError::AlreadyOwned(cell));
        }
        self.cells[idx] = Some(player);
        Ok(true)
    }

    /// Number of cells with an owner
    pub fn owned_cells(&self) -> usize {
        self.cells.iter().filter(|owner| owner.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_validity() {
        let board = Board::new(2).unwrap();
        assert!(board.is_valid_edge(Edge::horizontal(0, 0)));
        assert!(board.is_valid_edge(Edge::horizontal(2, 1)));
        assert!(!board.is_valid_edge(Edge::horizontal(3, 0)));
        assert!(!board.is_valid_edge(Edge::horizontal(0, 2)));

        assert!(board.is_valid_edge(Edge::vertical(1, 2)));
        assert!(!board.is_valid_edge(Edge::vertical(2, 0)));
        assert!(!board.is_valid_edge(Edge::vertical(0, 3)));
    }

    #[test]
    fn test_grid_size_bounds() {
        assert_eq!(Board::new(0).unwrap_err(), GameError::InvalidGridSize(0));
        assert_eq!(Board::new(usize::MAX).unwrap_err(), GameError::InvalidGridSize(usize::MAX));
        assert_eq!(
            Board::new(MAX_GRID_SIZE + 1).unwrap_err(),
            GameError::InvalidGridSize(MAX_GRID_SIZE + 1)
        );

        let board = Board::new(MAX_GRID_SIZE).unwrap();
        let corner = Edge::vertical(MAX_GRID_SIZE - 1, MAX_GRID_SIZE);
        assert!(board.is_valid_edge(corner));
        assert!(!board.is_valid_edge(Edge::vertical(MAX_GRID_SIZE, MAX_GRID_SIZE)));
    }

    #[test]
    fn test_edge_count() {
        let board = Board::new(3).unwrap();
        // 4 rows of 3 horizontal + 3 rows of 4 vertical
        assert_eq!(board.edge_count(), 24);
        assert_eq!(board.edges().count(), 24);
        assert_eq!(board.cell_count(), 9);
    }

    #[test]
    fn test_claim() {
        let mut board = Board::new(2).unwrap();
        let edge = Edge::vertical(1, 1);
        assert!(!board.is_claimed(edge));

        board.claim(edge, Player::One).unwrap();
        assert!(board.is_claimed(edge));
        assert_eq!(board.edge_owner(edge), Some(Player::One));

        assert_eq!(board.claim(edge, Player::Two), Err(GameError::AlreadyClaimed(edge)));
        assert_eq!(board.edge_owner(edge), Some(Player::One));
    }

    #[test]
    fn test_claim_invalid() {
        let mut board = Board::new(2).unwrap();
        let edge = Edge::horizontal(5, 0);
        assert_eq!(board.claim(edge, Player::One), Err(GameError::InvalidEdge(edge)));
        assert_eq!(board.unclaimed_edges().count(), board.edge_count());
    }

    #[test]
    fn test_claim_does_not_touch_cells() {
        let mut board = Board::new(1).unwrap();
        for edge in board.cell_bounding_edges(Cell::new(0, 0)) {
            board.claim(edge, Player::Two).unwrap();
        }
        assert!(board.is_cell_complete(Cell::new(0, 0)));
        assert_eq!(board.cell_owner(Cell::new(0, 0)), None);
    }

    #[test]
    fn test_adjacent_cells() {
        let board = Board::new(2).unwrap();

        // Boundary edges touch one cell
        assert_eq!(board.adjacent_cells(Edge::horizontal(0, 1)), vec![Cell::new(0, 1)]);
        assert_eq!(board.adjacent_cells(Edge::horizontal(2, 0)), vec![Cell::new(1, 0)]);
        assert_eq!(board.adjacent_cells(Edge::vertical(0, 0)), vec![Cell::new(0, 0)]);
        assert_eq!(board.adjacent_cells(Edge::vertical(1, 2)), vec![Cell::new(1, 1)]);

        // Interior edges touch two, above/left first
        assert_eq!(
            board.adjacent_cells(Edge::horizontal(1, 0)),
            vec![Cell::new(0, 0), Cell::new(1, 0)]
        );
        assert_eq!(
            board.adjacent_cells(Edge::vertical(0, 1)),
            vec![Cell::new(0, 0), Cell::new(0, 1)]
        );

        assert!(board.adjacent_cells(Edge::vertical(7, 7)).is_empty());
    }

    #[test]
    fn test_bounding_edges() {
        let board = Board::new(3).unwrap();
        let edges = board.cell_bounding_edges(Cell::new(1, 2));
        assert_eq!(
            edges,
            [
                Edge::horizontal(1, 2),
                Edge::horizontal(2, 2),
                Edge::vertical(1, 2),
                Edge::vertical(1, 3),
            ]
        );
        assert!(edges.iter().all(|&e| board.is_valid_edge(e)));
        // Every bounding edge lists the cell among its neighbours
        for edge in edges {
            assert!(board.adjacent_cells(edge).contains(&Cell::new(1, 2)));
        }
    }

    #[test]
    fn test_set_cell_owner() {
        let mut board = Board::new(2).unwrap();
        let cell = Cell::new(1, 0);
        assert_eq!(board.set_cell_owner(cell, Player::Two), Ok(true));
        assert_eq!(board.cell_owner(cell), Some(Player::Two));
        assert_eq!(board.owned_cells(), 1);

        assert_eq!(board.set_cell_owner(cell, Player::One), Err(GameError::AlreadyOwned(cell)));
        assert_eq!(board.cell_owner(cell), Some(Player::Two));

        let outside = Cell::new(2, 0);
        assert_eq!(board.set_cell_owner(outside, Player::One), Err(GameError::InvalidCell(outside)));
    }

    #[test]
    fn test_unclaimed_edges_order() {
        let mut board = Board::new(1).unwrap();
        board.claim(Edge::horizontal(1, 0), Player::One).unwrap();
        let rest: Vec<_> = board.unclaimed_edges().collect();
        assert_eq!(
            rest,
            vec![Edge::horizontal(0, 0), Edge::vertical(0, 0), Edge::vertical(0, 1)]
        );
    }

    #[test]
    fn test_edge_text_forms() {
        assert_eq!("h 2 3".parse::<Edge>(), Ok(Edge::horizontal(2, 3)));
        assert_eq!("V(0,1)".parse::<Edge>(), Ok(Edge::vertical(0, 1)));
        assert_eq!(" horizontal 4 0 ".parse::<Edge>(), Ok(Edge::horizontal(4, 0)));
        assert_eq!(Edge::vertical(3, 1).to_string(), "v(3,1)");
        assert_eq!(
            Edge::horizontal(7, 2).to_string().parse::<Edge>(),
            Ok(Edge::horizontal(7, 2))
        );

        assert!(matches!("h 1".parse::<Edge>(), Err(ParseEdgeError::Malformed(_))));
        assert!(matches!("d 1 1".parse::<Edge>(), Err(ParseEdgeError::Orientation(_))));
        assert!(matches!("h -1 0".parse::<Edge>(), Err(ParseEdgeError::Coordinate(_))));
    }

    #[test]
    fn test_edge_json() {
        let json = serde_json::to_string(&Edge::vertical(1, 2)).unwrap();
        assert_eq!(json, r#"{"orientation":"vertical","row":1,"col":2}"#);
    }
}
