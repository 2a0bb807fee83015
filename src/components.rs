use std::fmt;

/// Axis-aligned heading. `None` means standing still (or nothing queued).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// Candidate order used whenever two moves are otherwise equal.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Integer grid coordinate. May lie outside the maze; the maze decides what
/// that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Cell {
        self.offset(dir, 1)
    }

    pub fn offset(self, dir: Direction, tiles: i32) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: self.x + dx * tiles,
            y: self.y + dy * tiles,
        }
    }

    pub fn distance_sq(self, other: Cell) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous coordinate in the same units as the tile size. A cell's anchor
/// is its top-left corner, so `cell = floor(pos / tile_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_cell(cell: Cell, tile_size: f32) -> Self {
        Self {
            x: cell.x as f32 * tile_size,
            y: cell.y as f32 * tile_size,
        }
    }

    pub fn cell(self, tile_size: f32) -> Cell {
        Cell {
            x: (self.x / tile_size).floor() as i32,
            y: (self.y / tile_size).floor() as i32,
        }
    }

    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CollectibleKind {
    Dot,
    PowerPellet,
}

impl CollectibleKind {
    pub fn points(self) -> u32 {
        match self {
            CollectibleKind::Dot => 10,
            CollectibleKind::PowerPellet => 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub cell: Cell,
    pub kind: CollectibleKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cell_floors_negative_coordinates() {
        let pos = Position::new(-0.5, 39.9);
        assert_eq!(pos.cell(20.0), Cell::new(-1, 1));
    }

    #[test]
    fn opposite_is_an_involution() {
        for dir in Direction::PRIORITY {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
        assert_eq!(Direction::None.opposite(), Direction::None);
    }
}
