use crate::components::{Cell, CollectibleKind, Direction};
use crate::maze::Maze;
use crate::motion::{self, Agent};

/// What happened to the player during one update. Scoring policy lives with
/// the round coordinator; the player only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Pickup { kind: CollectibleKind, points: u32 },
    PowerPellet,
    LevelComplete,
}

#[derive(Debug, Clone)]
pub struct Player {
    agent: Agent,
    start: Cell,
}

impl Player {
    pub fn new(maze: &Maze, start: Cell, speed: f32) -> Self {
        Self {
            agent: Agent::at(maze, start, speed),
            start,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn cell(&self, maze: &Maze) -> Cell {
        self.agent.cell(maze)
    }

    /// Remembers the latest requested heading. `Direction::None` is ignored;
    /// whether the turn is possible is decided when the player reaches a
    /// cell anchor.
    pub fn queue_direction(&mut self, direction: Direction) {
        if direction != Direction::None {
            self.agent.queued = direction;
        }
    }

    pub fn update(&mut self, maze: &mut Maze, events: &mut Vec<PlayerEvent>) {
        motion::step(&mut self.agent, maze);

        let cell = self.agent.cell(maze);
        if let Some(collectible) = maze.collect_at(cell) {
            if collectible.kind == CollectibleKind::PowerPellet {
                events.push(PlayerEvent::PowerPellet);
            }
            events.push(PlayerEvent::Pickup {
                kind: collectible.kind,
                points: collectible.kind.points(),
            });
            if maze.remaining_collectibles() == 0 {
                events.push(PlayerEvent::LevelComplete);
            }
        }
    }

    pub fn reset(&mut self, maze: &Maze) {
        let speed = self.agent.speed;
        self.agent = Agent::at(maze, self.start, speed);
    }
}
