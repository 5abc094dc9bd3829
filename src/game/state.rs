use super::board::{Grid, COLS, ROWS};
use super::player::Player;
use super::win;
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is outside the board")]
    InvalidColumn,
    #[error("game is already over")]
    GameOver,
    #[error(transparent)]
    Board(BoardError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    first_player: Player,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create a fresh game on an empty `columns × rows` grid
    pub fn new(columns: usize, rows: usize, first_player: Player) -> Self {
        GameState {
            grid: Grid::new(columns, rows),
            first_player,
            current_player: first_player,
            outcome: None,
        }
    }

    /// Create initial game state on the standard board
    pub fn initial() -> Self {
        Self::new(COLS, ROWS, Player::Red) // Red starts
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.grid.legal_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move in place, returning the row the coin landed in
    pub fn apply_move_mut(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self
            .grid
            .drop_piece(column, self.current_player.to_color())
            .map_err(|e| match e {
                BoardError::ColumnOutOfRange { .. } => MoveError::InvalidColumn,
                other => MoveError::Board(other),
            })?
            .ok_or(MoveError::ColumnFull)?;

        // The whole grid is scanned, not just lines through the new coin
        if let Some(winner) = Player::from_color(win::evaluate(&self.grid)) {
            self.outcome = Some(GameOutcome::Winner(winner));
        } else if self.grid.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(row)
    }

    /// Empty the grid and hand the first move back to the opening player
    pub fn reset(&mut self) {
        self.grid.clear();
        self.current_player = self.first_player;
        self.outcome = None;
    }
}
