use crate::components::{Cell, Direction, Position};
use crate::maze::Maze;

/// Remainders below this are treated as having reached the anchor.
const SNAP_EPSILON: f32 = 1e-3;

/// Movement state shared by the player and every ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Position,
    pub heading: Direction,
    pub queued: Direction,
    pub speed: f32,
}

impl Agent {
    pub fn at(maze: &Maze, cell: Cell, speed: f32) -> Self {
        Self {
            position: maze.anchor(cell),
            heading: Direction::None,
            queued: Direction::None,
            speed,
        }
    }

    pub fn cell(&self, maze: &Maze) -> Cell {
        maze.cell_of(self.position)
    }
}

/// Advances `agent` by one tick. Turns only happen on a cell anchor, except
/// a straight reversal which is taken immediately. Returns whether the agent
/// moved.
pub fn step(agent: &mut Agent, maze: &Maze) -> bool {
    if maze.is_aligned(agent.position) {
        let cell = agent.cell(maze);
        if maze.can_move(cell, agent.queued) {
            agent.heading = agent.queued;
            agent.queued = Direction::None;
        }
        if !maze.can_move(cell, agent.heading) {
            return false;
        }
    } else {
        if agent.queued != Direction::None && agent.queued == agent.heading.opposite() {
            agent.heading = agent.queued;
            agent.queued = Direction::None;
        }
        if agent.heading == Direction::None {
            return false;
        }
    }

    let anchor = next_anchor(agent.position, agent.heading, maze.tile_size());
    let remaining = match agent.heading {
        Direction::Left | Direction::Right => (anchor.x - agent.position.x).abs(),
        _ => (anchor.y - agent.position.y).abs(),
    };
    agent.position = if agent.speed >= remaining - SNAP_EPSILON {
        anchor
    } else {
        let (dx, dy) = agent.heading.delta();
        Position {
            x: agent.position.x + dx as f32 * agent.speed,
            y: agent.position.y + dy as f32 * agent.speed,
        }
    };
    agent.position = maze.wrap(agent.position);
    true
}

/// The first anchor strictly ahead of `position` along `heading`.
fn next_anchor(position: Position, heading: Direction, tile_size: f32) -> Position {
    let gx = position.x / tile_size;
    let gy = position.y / tile_size;
    match heading {
        Direction::Right => Position::new((gx.floor() + 1.0) * tile_size, position.y),
        Direction::Left => Position::new((gx.ceil() - 1.0) * tile_size, position.y),
        Direction::Down => Position::new(position.x, (gy.floor() + 1.0) * tile_size),
        Direction::Up => Position::new(position.x, (gy.ceil() - 1.0) * tile_size),
        Direction::None => position,
    }
}
