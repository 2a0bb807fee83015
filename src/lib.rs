//! Deterministic, tick-driven Pac-Man core: maze, movement, player, ghost AI
//! and the round coordinator that ties them together. Rendering and input
//! live in the `pacman` binary.

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod ghost;
pub mod level;
pub mod maze;
pub mod motion;
pub mod player;
pub mod round;
pub mod snapshot;

pub use components::{Cell, Collectible, CollectibleKind, Direction, Position};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, LayoutError};
pub use events::GameEvent;
pub use game::Game;
pub use ghost::{GhostMode, Phase, Strategy};
pub use level::{GhostSpawn, Layout, Tile};
pub use maze::Maze;
pub use round::{RoundState, Status};
pub use snapshot::{AgentView, GhostView, Snapshot};
