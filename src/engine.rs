//! Host-facing engine: input handlers queue coin drops, and the update loop
//! consumes one queued drop per tick, applies it to the board and re-checks
//! the winner.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::game::{Color, GameOutcome, GameState, Grid, MoveError, Player};

/// What a single [`Engine::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Nothing was queued.
    Idle,
    /// A coin landed and the game goes on.
    Placed { column: usize, row: usize, color: Color },
    /// The queued drop was refused; the board is unchanged.
    Rejected { column: usize, reason: MoveError },
    /// A coin completed four in a row.
    Won { column: usize, row: usize, color: Color },
    /// A coin filled the last free cell without a winner.
    Draw { column: usize, row: usize, color: Color },
}

#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    pending: VecDeque<usize>,
    winning_color: Color,
}

impl Engine {
    pub fn new(columns: usize, rows: usize, first_player: Player) -> Self {
        Engine {
            state: GameState::new(columns, rows, first_player),
            pending: VecDeque::new(),
            winning_color: Color::Empty,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.board.columns,
            config.board.rows,
            config.game.first_player,
        )
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    /// Color that completed four in a row, [`Color::Empty`] while undecided.
    pub fn winning_color(&self) -> Color {
        self.winning_color
    }

    /// Queue a drop into `column` for the player to move.
    ///
    /// Columns outside the board are refused here rather than at [`tick`],
    /// and input is frozen once the game has an outcome.
    ///
    /// [`tick`]: Engine::tick
    pub fn submit(&mut self, column: usize) -> Result<(), MoveError> {
        if self.state.is_terminal() {
            debug!(column, "ignoring drop after game over");
            return Err(MoveError::GameOver);
        }
        if column >= self.grid().columns() {
            warn!(column, columns = self.grid().columns(), "drop outside the board");
            return Err(MoveError::InvalidColumn);
        }
        self.pending.push_back(column);
        Ok(())
    }

    /// Whether drops are waiting to be processed.
    pub fn is_receiving(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take the next queued drop, paired with the color that will play it.
    pub fn pop_coin(&mut self) -> Option<(Color, usize)> {
        let column = self.pending.pop_front()?;
        Some((self.state.current_player().to_color(), column))
    }

    /// Process at most one queued drop.
    pub fn tick(&mut self) -> Event {
        let Some((color, column)) = self.pop_coin() else {
            return Event::Idle;
        };

        let row = match self.state.apply_move_mut(column) {
            Ok(row) => row,
            Err(reason) => {
                warn!(column, %reason, "drop rejected");
                return Event::Rejected { column, reason };
            }
        };
        debug!(column, row, ?color, "coin placed");

        match self.state.outcome() {
            Some(GameOutcome::Winner(player)) => {
                self.winning_color = player.to_color();
                self.pending.clear();
                info!(winner = player.name(), "four in a row");
                Event::Won { column, row, color }
            }
            Some(GameOutcome::Draw) => {
                self.pending.clear();
                info!("board full, game drawn");
                Event::Draw { column, row, color }
            }
            None => Event::Placed { column, row, color },
        }
    }

    /// Drain the queue, returning every event produced.
    pub fn run_pending(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while self.is_receiving() {
            events.push(self.tick());
        }
        events
    }

    /// Start a new game on the same board.
    pub fn restart(&mut self) {
        self.state.reset();
        self.pending.clear();
        self.winning_color = Color::Empty;
        info!("game restarted");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
