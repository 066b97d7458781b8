//! Board coordinates and movement directions.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Row 0 is the top row, column 0 the leftmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Apply an offset, returning `None` if the result would be negative.
    ///
    /// ```
    /// use inertia_rules::core::{Position, PositionOffset};
    ///
    /// let p = Position::new(1, 1);
    /// assert_eq!(p.offset_by(PositionOffset::new(-1, 2)), Some(Position::new(0, 3)));
    /// assert_eq!(p.offset_by(PositionOffset::new(0, -2)), None);
    /// ```
    #[must_use]
    pub fn offset_by(self, offset: PositionOffset) -> Option<Position> {
        let row = self.row.checked_add_signed(offset.d_row)?;
        let col = self.col.checked_add_signed(offset.d_col)?;
        Some(Position { row, col })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A relative displacement in rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionOffset {
    pub d_row: i32,
    pub d_col: i32,
}

impl PositionOffset {
    #[must_use]
    pub const fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }
}

/// One of the four directions a player can slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The single-step offset for this direction.
    #[must_use]
    pub const fn offset(self) -> PositionOffset {
        match self {
            Direction::Up => PositionOffset::new(-1, 0),
            Direction::Down => PositionOffset::new(1, 0),
            Direction::Left => PositionOffset::new(0, -1),
            Direction::Right => PositionOffset::new(0, 1),
        }
    }

    /// The reverse direction.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}
