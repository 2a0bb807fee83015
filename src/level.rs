use std::collections::BTreeMap;

use crate::components::{Cell, CollectibleKind};
use crate::error::LayoutError;
use crate::ghost::Strategy;

pub const MAX_GHOSTS: usize = 4;

const CLASSIC: &str = "\
############################
#............##............#
#o####.#####.##.#####.####o#
#..........................#
#.####.##.########.##.####.#
#......##....##....##......#
######.##### ## #####.######
######.##          ##.######
######.## ##    ## ##.######
T     .   #  GG  #   .     T
######.## #  GG  # ##.######
######.## ######## ##.######
######.##          ##.######
#............##............#
#.####.#####.##.#####.####.#
#o..##.......P........##..o#
###.##.##.########.##.##.###
#......##....##....##......#
#.##########.##.##########.#
#..........................#
############################";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Path,
    TunnelEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostSpawn {
    pub home: Cell,
    pub strategy: Strategy,
    pub corner: Cell,
}

/// Static description of a level: tiles, starting collectibles and spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    collectibles: BTreeMap<Cell, CollectibleKind>,
    pub player_start: Cell,
    pub ghosts: Vec<GhostSpawn>,
}

impl Layout {
    /// Parses the text format: `#` wall, `.` dot, `o` power pellet, ` ` empty
    /// path, `T` tunnel edge, `P` player start, `G` ghost home.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut collectibles = BTreeMap::new();
        let mut player_start = None;
        let mut homes = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                let tile = match symbol {
                    '#' => Tile::Wall,
                    ' ' => Tile::Path,
                    'T' => Tile::TunnelEdge,
                    '.' => {
                        collectibles.insert(cell, CollectibleKind::Dot);
                        Tile::Path
                    }
                    'o' => {
                        collectibles.insert(cell, CollectibleKind::PowerPellet);
                        Tile::Path
                    }
                    'P' => {
                        if let Some(first) = player_start {
                            return Err(LayoutError::DuplicatePlayerStart {
                                first,
                                second: cell,
                            });
                        }
                        player_start = Some(cell);
                        Tile::Path
                    }
                    'G' => {
                        homes.push(cell);
                        Tile::Path
                    }
                    _ => {
                        return Err(LayoutError::UnknownSymbol {
                            symbol,
                            row: y,
                            column: x,
                        })
                    }
                };
                tiles.push(tile);
            }
        }

        let player_start = player_start.ok_or(LayoutError::MissingPlayerStart)?;
        if homes.len() > MAX_GHOSTS {
            return Err(LayoutError::TooManyGhosts {
                found: homes.len(),
                max: MAX_GHOSTS,
            });
        }
        let ghosts = homes
            .into_iter()
            .zip(Strategy::ALL)
            .map(|(home, strategy)| GhostSpawn {
                home,
                strategy,
                corner: default_corner(strategy, width, height),
            })
            .collect();

        let layout = Layout {
            width,
            height,
            tiles,
            collectibles,
            player_start,
            ghosts,
        };
        layout.check_tunnels()?;
        Ok(layout)
    }

    /// The built-in 28x21 maze.
    pub fn classic() -> Self {
        Self::parse(CLASSIC).expect("classic layout is well-formed")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    pub fn collectibles(&self) -> &BTreeMap<Cell, CollectibleKind> {
        &self.collectibles
    }

    pub fn place_collectible(
        &mut self,
        cell: Cell,
        kind: CollectibleKind,
    ) -> Result<(), LayoutError> {
        match self.tile(cell) {
            Some(Tile::Path) | Some(Tile::TunnelEdge) => {}
            _ => return Err(LayoutError::NotPath(cell)),
        }
        if self.collectibles.contains_key(&cell) {
            return Err(LayoutError::Occupied(cell));
        }
        self.collectibles.insert(cell, kind);
        Ok(())
    }

    /// Full load-time check, including edits made after parsing.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.check_tunnels()?;
        if !self.is_path(self.player_start) {
            return Err(LayoutError::NotPath(self.player_start));
        }
        if self.ghosts.len() > MAX_GHOSTS {
            return Err(LayoutError::TooManyGhosts {
                found: self.ghosts.len(),
                max: MAX_GHOSTS,
            });
        }
        if let Some(spawn) = self.ghosts.iter().find(|g| !self.is_path(g.home)) {
            return Err(LayoutError::NotPath(spawn.home));
        }
        if let Some(cell) = self.collectibles.keys().find(|c| !self.is_path(**c)) {
            return Err(LayoutError::NotPath(*cell));
        }
        if self.collectibles.is_empty() {
            return Err(LayoutError::NoCollectibles);
        }
        Ok(())
    }

    fn is_path(&self, cell: Cell) -> bool {
        matches!(self.tile(cell), Some(Tile::Path) | Some(Tile::TunnelEdge))
    }

    fn check_tunnels(&self) -> Result<(), LayoutError> {
        let (w, h) = (self.width as i32, self.height as i32);
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                if self.tile(cell) != Some(Tile::TunnelEdge) {
                    continue;
                }
                let on_side = x == 0 || x == w - 1;
                let on_cap = y == 0 || y == h - 1;
                let partner = match (on_side, on_cap) {
                    (true, false) => Cell::new(w - 1 - x, y),
                    (false, true) => Cell::new(x, h - 1 - y),
                    _ => return Err(LayoutError::TunnelOffBoundary(cell)),
                };
                if partner == cell || self.tile(partner) != Some(Tile::TunnelEdge) {
                    return Err(LayoutError::UnpairedTunnel(cell));
                }
            }
        }
        Ok(())
    }
}

fn default_corner(strategy: Strategy, width: usize, height: usize) -> Cell {
    let right = width as i32 - 1;
    let bottom = height as i32 - 1;
    match strategy {
        Strategy::Aggressive => Cell::new(right, 0),
        Strategy::Ambush => Cell::new(0, 0),
        Strategy::Flank => Cell::new(right, bottom),
        Strategy::Patrol => Cell::new(0, bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_layout_loads() {
        let layout = Layout::classic();
        assert_eq!((layout.width(), layout.height()), (28, 21));
        assert_eq!(layout.player_start, Cell::new(13, 15));
        assert_eq!(layout.ghosts.len(), 4);
        assert_eq!(layout.ghosts[2].strategy, Strategy::Flank);
        assert_eq!(layout.tile(Cell::new(0, 9)), Some(Tile::TunnelEdge));
        assert_eq!(layout.validate(), Ok(()));
        let power = layout
            .collectibles()
            .values()
            .filter(|k| **k == CollectibleKind::PowerPellet)
            .count();
        assert_eq!(power, 4);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Layout::parse("####\n#P.\n####").unwrap_err();
        assert_eq!(
            err,
            LayoutError::Ragged {
                row: 1,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn missing_player_is_rejected() {
        assert_eq!(
            Layout::parse("####\n#..#\n####"),
            Err(LayoutError::MissingPlayerStart)
        );
    }

    #[test]
    fn unknown_symbol_reports_location() {
        assert_eq!(
            Layout::parse("####\n#P?#\n####"),
            Err(LayoutError::UnknownSymbol {
                symbol: '?',
                row: 1,
                column: 2
            })
        );
    }

    #[test]
    fn tunnels_must_pair_across_the_maze() {
        assert_eq!(
            Layout::parse("#####\nTP..#\n#####"),
            Err(LayoutError::UnpairedTunnel(Cell::new(0, 1)))
        );
        assert_eq!(
            Layout::parse("#####\n#PT.#\n#####"),
            Err(LayoutError::TunnelOffBoundary(Cell::new(2, 1)))
        );
        assert!(Layout::parse("#####\nTP..T\n#####").is_ok());
    }

    #[test]
    fn collectibles_only_on_free_path_cells() {
        let mut layout = Layout::parse("#####\n#P. #\n#####").unwrap();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(
            layout.place_collectible(Cell::new(0, 0), CollectibleKind::Dot),
            Err(LayoutError::NotPath(Cell::new(0, 0)))
        );
        assert_eq!(
            layout.place_collectible(Cell::new(2, 1), CollectibleKind::Dot),
            Err(LayoutError::Occupied(Cell::new(2, 1)))
        );
        assert!(layout
            .place_collectible(Cell::new(3, 1), CollectibleKind::PowerPellet)
            .is_ok());
    }

    #[test]
    fn empty_level_fails_validation() {
        let layout = Layout::parse("####\n#P #\n####").unwrap();
        assert_eq!(layout.validate(), Err(LayoutError::NoCollectibles));
    }
}
