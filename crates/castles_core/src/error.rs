//! Error types for the game simulation.

use thiserror::Error;

use crate::factions::Faction;
use crate::grid::Position;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for engine construction and state failures.
#[derive(Debug, Error)]
pub enum GameError {
    /// The supplied configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid game state.
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Rejection reasons for a build request.
///
/// All variants are recoverable, expected outcomes of a build request -
/// never fatal. Callers (human input and the AI policy alike) branch on
/// them without exceptional control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The requested position lies outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The rejected position.
        position: Position,
        /// Grid width in cells.
        width: i32,
        /// Grid height in cells.
        height: i32,
    },

    /// Another object already occupies the cell.
    #[error("cell {position} is already occupied")]
    CellOccupied {
        /// The rejected position.
        position: Position,
    },

    /// The cell lies outside the requesting faction's territory.
    #[error("cell {position} is not controlled by {faction}")]
    CellNotControlled {
        /// The rejected position.
        position: Position,
        /// The faction that requested the build.
        faction: Faction,
    },

    /// The requesting faction cannot afford the build.
    #[error("insufficient gold: need {required}, have {available}")]
    InsufficientGold {
        /// Cost of the requested building.
        required: u32,
        /// Current balance of the requesting faction.
        available: u32,
    },
}
