use std::collections::BTreeMap;

use tracing::trace;

use crate::components::{Cell, Collectible, CollectibleKind, Direction, Position};
use crate::level::{Layout, Tile};

/// Runtime maze: immutable tiles plus the collectibles still on the board.
/// The only authority on what is walkable and what can be picked up.
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<Tile>,
    initial: BTreeMap<Cell, CollectibleKind>,
    collectibles: BTreeMap<Cell, CollectibleKind>,
}

impl Maze {
    pub fn new(layout: &Layout, tile_size: f32) -> Self {
        let width = layout.width() as i32;
        let height = layout.height() as i32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(layout.tile(Cell::new(x, y)).unwrap_or(Tile::Wall));
            }
        }
        Self {
            width,
            height,
            tile_size,
            tiles,
            initial: layout.collectibles().clone(),
            collectibles: layout.collectibles().clone(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.tiles[(cell.y * self.width + cell.x) as usize])
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn is_tunnel_row(&self, y: i32) -> bool {
        self.tile(Cell::new(0, y)) == Some(Tile::TunnelEdge)
            && self.tile(Cell::new(self.width - 1, y)) == Some(Tile::TunnelEdge)
    }

    fn is_tunnel_column(&self, x: i32) -> bool {
        self.tile(Cell::new(x, 0)) == Some(Tile::TunnelEdge)
            && self.tile(Cell::new(x, self.height - 1)) == Some(Tile::TunnelEdge)
    }

    /// Maps a cell beyond a tunnel edge onto the opposite side. Every other
    /// cell comes back unchanged.
    pub fn wrap_cell(&self, cell: Cell) -> Cell {
        let mut wrapped = cell;
        if (wrapped.x < 0 || wrapped.x >= self.width)
            && wrapped.y >= 0
            && wrapped.y < self.height
            && self.is_tunnel_row(wrapped.y)
        {
            wrapped.x = wrapped.x.rem_euclid(self.width);
        }
        if (wrapped.y < 0 || wrapped.y >= self.height)
            && wrapped.x >= 0
            && wrapped.x < self.width
            && self.is_tunnel_column(wrapped.x)
        {
            wrapped.y = wrapped.y.rem_euclid(self.height);
        }
        wrapped
    }

    /// Out-of-bounds cells are walls unless they wrap through a tunnel.
    pub fn is_wall(&self, cell: Cell) -> bool {
        match self.tile(self.wrap_cell(cell)) {
            None | Some(Tile::Wall) => true,
            Some(Tile::Path) | Some(Tile::TunnelEdge) => false,
        }
    }

    pub fn is_tunnel(&self, cell: Cell) -> bool {
        self.tile(cell) == Some(Tile::TunnelEdge)
    }

    pub fn can_move(&self, cell: Cell, dir: Direction) -> bool {
        dir != Direction::None && !self.is_wall(cell.step(dir))
    }

    /// Walkable headings out of `cell`, in `Direction::PRIORITY` order.
    pub fn valid_moves(&self, cell: Cell) -> Vec<Direction> {
        Direction::PRIORITY
            .into_iter()
            .filter(|dir| self.can_move(cell, *dir))
            .collect()
    }

    /// Brings a position that left the grid through a tunnel back in on the
    /// far side. Positions inside the grid are returned unchanged.
    pub fn wrap(&self, position: Position) -> Position {
        let cell = position.cell(self.tile_size);
        if self.in_bounds(cell) {
            return position;
        }
        let target = self.wrap_cell(cell);
        if target == cell {
            return position;
        }
        Position {
            x: position.x + (target.x - cell.x) as f32 * self.tile_size,
            y: position.y + (target.y - cell.y) as f32 * self.tile_size,
        }
    }

    pub fn cell_of(&self, position: Position) -> Cell {
        position.cell(self.tile_size)
    }

    pub fn anchor(&self, cell: Cell) -> Position {
        Position::from_cell(cell, self.tile_size)
    }

    /// True when `position` sits exactly on a cell anchor.
    pub fn is_aligned(&self, position: Position) -> bool {
        position.x.rem_euclid(self.tile_size) == 0.0
            && position.y.rem_euclid(self.tile_size) == 0.0
    }

    /// Removes and returns the collectible at `cell`, if any.
    pub fn collect_at(&mut self, cell: Cell) -> Option<Collectible> {
        let kind = self.collectibles.remove(&cell)?;
        trace!(%cell, ?kind, remaining = self.collectibles.len(), "collected");
        Some(Collectible { cell, kind })
    }

    pub fn collectible_at(&self, cell: Cell) -> Option<CollectibleKind> {
        self.collectibles.get(&cell).copied()
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.len()
    }

    pub fn collectibles(&self) -> impl Iterator<Item = Collectible> + '_ {
        self.collectibles
            .iter()
            .map(|(cell, kind)| Collectible { cell: *cell, kind: *kind })
    }

    /// Restores every collectible the level started with.
    pub fn reset_collectibles(&mut self) {
        self.collectibles = self.initial.clone();
    }
}
