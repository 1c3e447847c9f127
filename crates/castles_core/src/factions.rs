//! Faction definitions and identifiers.

use serde::{Deserialize, Serialize};

/// The two sides of a game.
///
/// Each faction owns exactly one castle for the lifetime of a game and
/// zero or more barracks placed through build actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    /// The human-controlled side.
    Player,
    /// The AI-controlled side.
    Enemy,
}

impl Faction {
    /// Both factions, in deterministic processing order.
    pub const ALL: [Self; 2] = [Self::Player, Self::Enemy];

    /// Get the opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Get the display name for this faction.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Enemy => "Enemy",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involutive() {
        for faction in Faction::ALL {
            assert_eq!(faction.opponent().opponent(), faction);
        }
    }
}
