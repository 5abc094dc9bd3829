use super::board::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Convert player to the color of its coins
    pub fn to_color(self) -> Color {
        match self {
            Player::Red => Color::Red,
            Player::Blue => Color::Blue,
        }
    }

    /// The player owning coins of `color`, if any
    pub fn from_color(color: Color) -> Option<Player> {
        match color {
            Color::Red => Some(Player::Red),
            Color::Blue => Some(Player::Blue),
            Color::Empty => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        }
    }
}
