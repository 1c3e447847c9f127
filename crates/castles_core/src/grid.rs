//! Positions, object kinds, and the occupancy grid.
//!
//! The grid is a sparse map from [`Position`] to [`ObjectKind`]. Keying by
//! position makes the occupancy invariant (at most one object per cell)
//! structural: two objects cannot share a cell because a map has one value
//! per key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::factions::Faction;

/// An integer cell coordinate on the board.
///
/// Valid positions satisfy `0 <= x < width` and `0 <= y < height`; bounds
/// are checked by [`Grid::in_bounds`], not encoded in the type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Column, growing rightwards.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance to another position: `max(|dx|, |dy|)`.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy {
            dx
        } else {
            dy
        }
    }
}

/// Impassable scenery scattered at board creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// A stone outcrop.
    Stone,
    /// A tree.
    Tree,
}

/// The buildable barracks variants.
///
/// Both factions can build both kinds; costs and income differ per faction
/// via [`crate::config::FactionTuning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarracksKind {
    /// Plain barracks: extends territorial control, produces no income.
    Garrison,
    /// Income barracks: extends control and yields bonus gold each tick.
    Mine,
}

impl BarracksKind {
    /// Both kinds, in deterministic order.
    pub const ALL: [Self; 2] = [Self::Garrison, Self::Mine];
}

/// A tagged entity occupying a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A faction's unique castle. Never destroyed, never moved.
    Castle(Faction),
    /// Neutral scenery placed at board creation.
    Obstacle(ObstacleKind),
    /// A faction-owned barracks placed by a build action.
    Barracks(Faction, BarracksKind),
}

impl ObjectKind {
    /// The faction owning this object, if any. Obstacles are neutral.
    #[must_use]
    pub const fn owner(self) -> Option<Faction> {
        match self {
            Self::Castle(faction) | Self::Barracks(faction, _) => Some(faction),
            Self::Obstacle(_) => None,
        }
    }

    /// Whether this object projects territorial control for `faction`.
    #[must_use]
    pub fn projects_control_for(self, faction: Faction) -> bool {
        self.owner() == Some(faction)
    }
}

/// An object together with the cell it occupies.
///
/// Snapshot-facing view of one grid entry; the grid itself stores kinds
/// keyed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridObject {
    /// The cell this object occupies.
    pub position: Position,
    /// What the object is.
    pub kind: ObjectKind,
}

/// The occupancy grid.
///
/// Owns every placed object, keyed by position. Iteration order over a
/// `HashMap` is not deterministic, so any consumer needing stable order
/// goes through [`Grid::sorted_objects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    objects: HashMap<Position, ObjectKind>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");
        Self {
            width,
            height,
            objects: HashMap::new(),
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// The object at `position`, if any.
    #[must_use]
    pub fn object_at(&self, position: Position) -> Option<ObjectKind> {
        self.objects.get(&position).copied()
    }

    /// Check whether any object occupies `position`.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.objects.contains_key(&position)
    }

    /// Place an object, upholding the occupancy invariant.
    ///
    /// Returns `false` (and leaves the grid unchanged) if the position is
    /// out of bounds or already occupied.
    pub fn place(&mut self, position: Position, kind: ObjectKind) -> bool {
        if !self.in_bounds(position) || self.is_occupied(position) {
            return false;
        }
        self.objects.insert(position, kind);
        true
    }

    /// Number of placed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check whether the grid holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all objects (not in deterministic order).
    pub fn iter(&self) -> impl Iterator<Item = (Position, ObjectKind)> + '_ {
        self.objects.iter().map(|(pos, kind)| (*pos, *kind))
    }

    /// All objects sorted by position, for deterministic consumption.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<GridObject> {
        let mut objects: Vec<GridObject> = self
            .objects
            .iter()
            .map(|(&position, &kind)| GridObject { position, kind })
            .collect();
        objects.sort_unstable_by_key(|obj| obj.position);
        objects
    }

    /// Position of a faction's castle.
    ///
    /// Every well-formed board has exactly one castle per faction; `None`
    /// only occurs on grids built up by hand in tests.
    #[must_use]
    pub fn castle_position(&self, faction: Faction) -> Option<Position> {
        self.objects
            .iter()
            .find(|(_, &kind)| kind == ObjectKind::Castle(faction))
            .map(|(&pos, _)| pos)
    }

    /// Positions of every control-projecting object of a faction
    /// (castle plus barracks), sorted for deterministic order.
    #[must_use]
    pub fn control_sources(&self, faction: Faction) -> Vec<Position> {
        let mut sources: Vec<Position> = self
            .objects
            .iter()
            .filter(|(_, kind)| kind.projects_control_for(faction))
            .map(|(&pos, _)| pos)
            .collect();
        sources.sort_unstable();
        sources
    }

    /// Count a faction's barracks of one kind.
    #[must_use]
    pub fn barracks_count(&self, faction: Faction, kind: BarracksKind) -> u32 {
        let wanted = ObjectKind::Barracks(faction, kind);
        self.objects.values().filter(|&&k| k == wanted).count() as u32
    }

    /// Count all of a faction's barracks, either kind.
    #[must_use]
    pub fn total_barracks(&self, faction: Faction) -> u32 {
        self.objects
            .values()
            .filter(|kind| matches!(kind, ObjectKind::Barracks(owner, _) if *owner == faction))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_distance() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.chebyshev_distance(Position::new(2, 2)), 0);
        assert_eq!(origin.chebyshev_distance(Position::new(3, 2)), 1);
        assert_eq!(origin.chebyshev_distance(Position::new(3, 3)), 1);
        assert_eq!(origin.chebyshev_distance(Position::new(0, 5)), 3);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(1, 1);

        assert!(grid.place(pos, ObjectKind::Castle(Faction::Player)));
        assert!(!grid.place(pos, ObjectKind::Obstacle(ObstacleKind::Stone)));

        // The first placement survives.
        assert_eq!(grid.object_at(pos), Some(ObjectKind::Castle(Faction::Player)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut grid = Grid::new(4, 4);
        assert!(!grid.place(Position::new(4, 0), ObjectKind::Obstacle(ObstacleKind::Tree)));
        assert!(!grid.place(Position::new(0, -1), ObjectKind::Obstacle(ObstacleKind::Tree)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_control_sources_exclude_obstacles_and_opponent() {
        let mut grid = Grid::new(8, 8);
        grid.place(Position::new(0, 0), ObjectKind::Castle(Faction::Player));
        grid.place(
            Position::new(1, 0),
            ObjectKind::Barracks(Faction::Player, BarracksKind::Garrison),
        );
        grid.place(Position::new(2, 0), ObjectKind::Obstacle(ObstacleKind::Stone));
        grid.place(Position::new(7, 7), ObjectKind::Castle(Faction::Enemy));

        let sources = grid.control_sources(Faction::Player);
        assert_eq!(sources, vec![Position::new(0, 0), Position::new(1, 0)]);
    }

    #[test]
    fn test_barracks_count_by_kind() {
        let mut grid = Grid::new(8, 8);
        grid.place(
            Position::new(0, 0),
            ObjectKind::Barracks(Faction::Enemy, BarracksKind::Mine),
        );
        grid.place(
            Position::new(1, 0),
            ObjectKind::Barracks(Faction::Enemy, BarracksKind::Mine),
        );
        grid.place(
            Position::new(2, 0),
            ObjectKind::Barracks(Faction::Enemy, BarracksKind::Garrison),
        );

        assert_eq!(grid.barracks_count(Faction::Enemy, BarracksKind::Mine), 2);
        assert_eq!(grid.barracks_count(Faction::Enemy, BarracksKind::Garrison), 1);
        assert_eq!(grid.barracks_count(Faction::Player, BarracksKind::Mine), 0);
        assert_eq!(grid.total_barracks(Faction::Enemy), 3);
    }

    #[test]
    fn test_sorted_objects_is_deterministic() {
        let mut grid = Grid::new(8, 8);
        grid.place(Position::new(5, 3), ObjectKind::Obstacle(ObstacleKind::Tree));
        grid.place(Position::new(0, 1), ObjectKind::Obstacle(ObstacleKind::Stone));
        grid.place(Position::new(5, 1), ObjectKind::Obstacle(ObstacleKind::Stone));

        let positions: Vec<Position> = grid
            .sorted_objects()
            .iter()
            .map(|obj| obj.position)
            .collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 1), Position::new(5, 1), Position::new(5, 3)]
        );
    }
}
