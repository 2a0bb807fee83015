use thiserror::Error;

use crate::components::Cell;

/// Problems found while loading a maze layout. Any of these aborts the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        column: usize,
    },
    #[error("layout has no player start")]
    MissingPlayerStart,
    #[error("second player start at {second}, first at {first}")]
    DuplicatePlayerStart { first: Cell, second: Cell },
    #[error("layout declares {found} ghost homes, at most {max} are supported")]
    TooManyGhosts { found: usize, max: usize },
    #[error("tunnel edge at {0} is not on the maze boundary")]
    TunnelOffBoundary(Cell),
    #[error("tunnel edge at {0} has no partner on the opposite edge")]
    UnpairedTunnel(Cell),
    #[error("{0} is not a path cell")]
    NotPath(Cell),
    #[error("{0} already holds a collectible")]
    Occupied(Cell),
    #[error("layout has no collectibles")]
    NoCollectibles,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} of {speed} exceeds the tile size {tile_size}")]
    FasterThanTile {
        field: &'static str,
        speed: f32,
        tile_size: f32,
    },
    #[error("starting lives must be at least one")]
    NoLives,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
