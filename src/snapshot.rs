use std::collections::HashMap;

use crate::components::{Cell, Collectible, CollectibleKind, Direction, Position};
use crate::ghost::{GhostMode, Phase, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub position: Position,
    pub cell: Cell,
    pub heading: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub strategy: Strategy,
    pub mode: GhostMode,
    pub agent: AgentView,
    pub target: Cell,
    pub waiting: bool,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: AgentView,
    pub ghosts: Vec<GhostView>,
    pub collectibles: Vec<Collectible>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub frightened_remaining: u32,
    pub phase: Phase,
    pub game_over: bool,
}

impl Snapshot {
    pub fn ghost_at(&self, cell: Cell) -> Option<&GhostView> {
        self.ghosts.iter().find(|g| g.agent.cell == cell)
    }

    pub fn collectible_map(&self) -> HashMap<Cell, CollectibleKind> {
        self.collectibles.iter().map(|c| (c.cell, c.kind)).collect()
    }
}
