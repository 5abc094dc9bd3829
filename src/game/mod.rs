//! Core four-in-a-row logic: grid of coins, player types, win detection and
//! the game state machine.

mod board;
mod player;
mod state;
pub mod win;

pub use board::{Color, Grid, COLS, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError};
pub use win::{evaluate, winning_line, WIN_LENGTH};
