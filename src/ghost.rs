use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::components::{Cell, Direction};
use crate::level::GhostSpawn;
use crate::maze::Maze;
use crate::motion::{self, Agent};

/// How a ghost picks its chase target.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Strategy {
    /// Straight at the player.
    Aggressive,
    /// A few tiles ahead of the player's heading.
    Ambush,
    /// Mirrors the aggressive ghost through a point ahead of the player.
    Flank,
    /// Chases only when close, otherwise drifts back to its corner.
    Patrol,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Aggressive,
        Strategy::Ambush,
        Strategy::Flank,
        Strategy::Patrol,
    ];

    pub fn chase_target(self, ghost_cell: Cell, corner: Cell, pursuit: &Pursuit) -> Cell {
        let player = pursuit.player_cell;
        match self {
            Strategy::Aggressive => player,
            Strategy::Ambush => player.offset(pursuit.player_heading, pursuit.ambush_lead),
            Strategy::Flank => match pursuit.aggressive_cell {
                Some(partner) => {
                    let pivot = player.offset(pursuit.player_heading, pursuit.flank_lead);
                    Cell::new(2 * pivot.x - partner.x, 2 * pivot.y - partner.y)
                }
                None => player,
            },
            Strategy::Patrol => {
                let radius = f64::from(pursuit.patrol_radius);
                if (ghost_cell.distance_sq(player) as f64) <= radius * radius {
                    player
                } else {
                    corner
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

impl GhostMode {
    pub fn is_vulnerable(self) -> bool {
        self == GhostMode::Frightened
    }

    pub fn is_dangerous(self) -> bool {
        matches!(self, GhostMode::Scatter | GhostMode::Chase)
    }
}

/// The global scatter/chase schedule position.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Phase {
    Scatter,
    Chase,
}

impl Phase {
    pub fn mode(self) -> GhostMode {
        match self {
            Phase::Scatter => GhostMode::Scatter,
            Phase::Chase => GhostMode::Chase,
        }
    }
}

/// Mode change requests. Only the round coordinator issues these.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ModeTrigger {
    Phase(Phase),
    Frighten,
    Calm(Phase),
    Eat,
    Respawn,
}

/// Ghost mode transition table. `None` means the trigger does not apply in
/// the current mode and is ignored.
pub fn next_mode(mode: GhostMode, trigger: ModeTrigger) -> Option<GhostMode> {
    use GhostMode::*;
    match (mode, trigger) {
        (Scatter | Chase, ModeTrigger::Phase(phase)) if phase.mode() != mode => Some(phase.mode()),
        (Scatter | Chase, ModeTrigger::Frighten) => Some(Frightened),
        (Frightened, ModeTrigger::Calm(phase)) => Some(phase.mode()),
        (Frightened, ModeTrigger::Eat) => Some(Eaten),
        (Eaten, ModeTrigger::Respawn) => Some(Chase),
        _ => None,
    }
}

/// Everything about the rest of the board a ghost needs to pick a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    pub player_cell: Cell,
    pub player_heading: Direction,
    pub aggressive_cell: Option<Cell>,
    pub ambush_lead: i32,
    pub flank_lead: i32,
    pub patrol_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSpeeds {
    pub normal: f32,
    pub frightened: f32,
    pub eaten: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Release {
    ticks_left: u32,
    dots: u32,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    agent: Agent,
    strategy: Strategy,
    mode: GhostMode,
    home: Cell,
    corner: Cell,
    target: Cell,
    reverse_pending: bool,
    release: Option<Release>,
    eaten_ticks: u32,
}

impl Ghost {
    pub fn new(maze: &Maze, spawn: &GhostSpawn, phase: Phase, speed: f32) -> Self {
        Self {
            agent: Agent::at(maze, spawn.home, speed),
            strategy: spawn.strategy,
            mode: phase.mode(),
            home: spawn.home,
            corner: spawn.corner,
            target: spawn.corner,
            reverse_pending: false,
            release: None,
            eaten_ticks: 0,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn cell(&self, maze: &Maze) -> Cell {
        self.agent.cell(maze)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn home(&self) -> Cell {
        self.home
    }

    pub fn corner(&self) -> Cell {
        self.corner
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Still held at home by the house release rule.
    pub fn is_waiting(&self) -> bool {
        self.release.is_some()
    }

    fn transition(&mut self, trigger: ModeTrigger) -> bool {
        let Some(next) = next_mode(self.mode, trigger) else {
            return false;
        };
        debug!(strategy = ?self.strategy, from = ?self.mode, to = ?next, "ghost mode change");
        self.mode = next;
        self.reverse_pending = true;
        self.eaten_ticks = 0;
        true
    }

    pub fn apply_phase(&mut self, phase: Phase) -> bool {
        self.transition(ModeTrigger::Phase(phase))
    }

    pub fn enter_frightened(&mut self) -> bool {
        self.transition(ModeTrigger::Frighten)
    }

    /// Leaves frightened mode for whatever the schedule currently says.
    pub fn calm(&mut self, phase: Phase) -> bool {
        self.transition(ModeTrigger::Calm(phase))
    }

    pub fn mark_eaten(&mut self) -> bool {
        self.transition(ModeTrigger::Eat)
    }

    pub fn respawn(&mut self) -> bool {
        self.transition(ModeTrigger::Respawn)
    }

    /// Ticks spent in the current eaten spell.
    pub fn eaten_ticks(&self) -> u32 {
        self.eaten_ticks
    }

    /// Moves the ghost straight onto its home anchor, standing still.
    pub fn return_home(&mut self, maze: &Maze) {
        let speed = self.agent.speed;
        self.agent = Agent::at(maze, self.home, speed);
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, maze: &Maze, cell: Cell, heading: Direction) {
        self.agent.position = maze.anchor(cell);
        self.agent.heading = heading;
    }

    pub fn is_home(&self, maze: &Maze) -> bool {
        maze.is_aligned(self.agent.position) && self.cell(maze) == self.home
    }

    pub fn hold(&mut self, ticks: u32, dots: u32) {
        self.release = Some(Release {
            ticks_left: ticks,
            dots,
        });
    }

    /// Counts down the house hold; the ghost leaves once the delay has run
    /// out or the player has eaten enough dots this level.
    pub fn tick_release(&mut self, dots_eaten: u32) {
        if let Some(release) = self.release.as_mut() {
            if release.ticks_left == 0 || dots_eaten >= release.dots {
                self.release = None;
            } else {
                release.ticks_left -= 1;
            }
        }
    }

    /// Puts the ghost back at home in `phase`'s mode, clearing any motion.
    pub fn reset(&mut self, maze: &Maze, phase: Phase) {
        let speed = self.agent.speed;
        self.agent = Agent::at(maze, self.home, speed);
        self.mode = phase.mode();
        self.target = self.corner;
        self.reverse_pending = false;
        self.eaten_ticks = 0;
    }

    pub fn select_target(&self, maze: &Maze, pursuit: &Pursuit, rng: &mut impl Rng) -> Cell {
        let cell = self.cell(maze);
        match self.mode {
            GhostMode::Chase => self.strategy.chase_target(cell, self.corner, pursuit),
            GhostMode::Scatter => self.corner,
            GhostMode::Eaten => self.home,
            GhostMode::Frightened => {
                let options = self.forward_moves(maze, cell);
                options
                    .choose(rng)
                    .map_or(cell, |dir| cell.step(*dir))
            }
        }
    }

    /// Valid moves out of `cell` without turning back, unless turning back
    /// is the only way out.
    fn forward_moves(&self, maze: &Maze, cell: Cell) -> Vec<Direction> {
        let moves = maze.valid_moves(cell);
        let reverse = self.agent.heading.opposite();
        let forward: Vec<Direction> = moves
            .iter()
            .copied()
            .filter(|dir| reverse == Direction::None || *dir != reverse)
            .collect();
        if forward.is_empty() {
            moves
        } else {
            forward
        }
    }

    /// Greedy least-distance choice; ties go to the earlier entry of
    /// `Direction::PRIORITY`.
    pub fn choose_direction(&self, maze: &Maze, cell: Cell, target: Cell) -> Direction {
        self.forward_moves(maze, cell)
            .into_iter()
            .min_by_key(|dir| cell.step(*dir).distance_sq(target))
            .unwrap_or(Direction::None)
    }

    pub fn update(
        &mut self,
        maze: &Maze,
        pursuit: &Pursuit,
        speeds: &GhostSpeeds,
        rng: &mut impl Rng,
    ) {
        self.agent.speed = match self.mode {
            GhostMode::Scatter | GhostMode::Chase => speeds.normal,
            GhostMode::Frightened => speeds.frightened,
            GhostMode::Eaten => speeds.eaten,
        };
        if self.mode == GhostMode::Eaten {
            self.eaten_ticks = self.eaten_ticks.saturating_add(1);
        }
        if self.is_waiting() {
            return;
        }

        let aligned = maze.is_aligned(self.agent.position);
        let mut reversing = false;
        if self.reverse_pending {
            self.reverse_pending = false;
            if self.agent.heading != Direction::None {
                self.agent.queued = self.agent.heading.opposite();
                reversing = true;
            }
        }

        if aligned {
            let cell = self.cell(maze);
            self.target = self.select_target(maze, pursuit, rng);
            if !reversing {
                self.agent.queued = self.choose_direction(maze, cell, self.target);
            }
        } else if self.mode != GhostMode::Frightened {
            self.target = self.select_target(maze, pursuit, rng);
        }
        motion::step(&mut self.agent, maze);
        self.agent.queued = Direction::None;
    }
}
