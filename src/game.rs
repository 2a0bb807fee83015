use rand::Rng;
use tracing::{debug, info};

use crate::components::{CollectibleKind, Direction};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::ghost::{Ghost, GhostMode, GhostSpeeds, Pursuit, Strategy};
use crate::level::Layout;
use crate::maze::Maze;
use crate::player::{Player, PlayerEvent};
use crate::round::{PhaseClock, RoundState, Status};
use crate::snapshot::{AgentView, GhostView, Snapshot};

/// Owns every piece of game state and advances it one fixed tick at a time.
/// Nothing here reads a clock; the caller decides how often `tick` runs.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    round: RoundState,
    phase: PhaseClock,
    level_cleared: bool,
}

impl Game {
    pub fn new(layout: &Layout, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        layout.validate()?;

        let maze = Maze::new(layout, config.tile_size);
        let player = Player::new(&maze, layout.player_start, config.player_speed);
        let phase = PhaseClock::new(config.phase_schedule.clone());
        let ghost_speed = config.ghost_speed_for(1);
        let ghosts = layout
            .ghosts
            .iter()
            .map(|spawn| Ghost::new(&maze, spawn, phase.current(), ghost_speed))
            .collect();
        let round = RoundState::new(config.starting_lives);

        let mut game = Self {
            config,
            maze,
            player,
            ghosts,
            round,
            phase,
            level_cleared: false,
        };
        game.reset_positions();
        info!(
            width = game.maze.width(),
            height = game.maze.height(),
            ghosts = game.ghosts.len(),
            collectibles = game.maze.remaining_collectibles(),
            "game ready"
        );
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> &PhaseClock {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        self.round.status == Status::GameOver
    }

    pub fn queue_direction(&mut self, direction: Direction) {
        self.player.queue_direction(direction);
    }

    /// Runs one tick: timers, player, pickups, ghosts, collisions. A finished
    /// level ends the tick early and the board is rebuilt at the start of the
    /// next one; a finished game makes every later tick a no-op.
    pub fn tick(&mut self, input: Option<Direction>, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        if self.level_cleared {
            self.level_cleared = false;
            self.advance_level();
        }

        self.advance_timers();

        if let Some(direction) = input {
            self.player.queue_direction(direction);
        }
        let mut pickups = Vec::new();
        self.player.update(&mut self.maze, &mut pickups);

        let mut level_complete = false;
        for pickup in pickups {
            match pickup {
                PlayerEvent::PowerPellet => self.start_frightened(),
                PlayerEvent::Pickup { kind, points } => {
                    self.round.dots_eaten += 1;
                    events.push(match kind {
                        CollectibleKind::Dot => GameEvent::Dot { points },
                        CollectibleKind::PowerPellet => GameEvent::PowerPellet { points },
                    });
                    self.round
                        .award(points, self.config.extra_life_score, &mut events);
                }
                PlayerEvent::LevelComplete => level_complete = true,
            }
        }
        if level_complete {
            events.push(GameEvent::LevelComplete {
                level: self.round.level,
            });
            info!(
                level = self.round.level,
                score = self.round.score,
                "level complete"
            );
            self.level_cleared = true;
            return events;
        }

        self.update_ghosts(rng);
        self.resolve_collisions(&mut events);
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        let player = self.player.agent();
        Snapshot {
            player: AgentView {
                position: player.position,
                cell: player.cell(&self.maze),
                heading: player.heading,
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    strategy: ghost.strategy(),
                    mode: ghost.mode(),
                    agent: AgentView {
                        position: ghost.agent().position,
                        cell: ghost.cell(&self.maze),
                        heading: ghost.agent().heading,
                    },
                    target: ghost.target(),
                    waiting: ghost.is_waiting(),
                })
                .collect(),
            collectibles: self.maze.collectibles().collect(),
            score: self.round.score,
            lives: self.round.lives,
            level: self.round.level,
            frightened_remaining: self.round.frightened_ticks,
            phase: self.phase.current(),
            game_over: self.is_over(),
        }
    }

    fn advance_timers(&mut self) {
        if let Some(phase) = self.phase.advance() {
            debug!(?phase, "phase change");
            for ghost in &mut self.ghosts {
                ghost.apply_phase(phase);
            }
        }

        if self.round.frightened_ticks > 0 {
            self.round.frightened_ticks -= 1;
            if self.round.frightened_ticks == 0 {
                self.end_frightened();
            }
        }

        let dots_eaten = self.round.dots_eaten;
        for ghost in &mut self.ghosts {
            ghost.tick_release(dots_eaten);
        }
    }

    fn start_frightened(&mut self) {
        let duration = self.config.frightened_ticks_for(self.round.level);
        if duration == 0 {
            return;
        }
        self.round.frightened_ticks = duration;
        self.round.chain = 0;
        for ghost in &mut self.ghosts {
            ghost.enter_frightened();
        }
        debug!(duration, "ghosts frightened");
    }

    fn end_frightened(&mut self) {
        self.round.chain = 0;
        let phase = self.phase.current();
        for ghost in &mut self.ghosts {
            ghost.calm(phase);
        }
        debug!(?phase, "frightened window over");
    }

    fn update_ghosts(&mut self, rng: &mut impl Rng) {
        let aggressive_cell = self
            .ghosts
            .iter()
            .find(|ghost| ghost.strategy() == Strategy::Aggressive)
            .map(|ghost| ghost.cell(&self.maze));
        let pursuit = Pursuit {
            player_cell: self.player.cell(&self.maze),
            player_heading: self.player.agent().heading,
            aggressive_cell,
            ambush_lead: self.config.ambush_lead_tiles,
            flank_lead: self.config.flank_lead_tiles,
            patrol_radius: self.config.patrol_radius_tiles,
        };
        let speeds = GhostSpeeds {
            normal: self.config.ghost_speed_for(self.round.level),
            frightened: self.config.frightened_speed,
            eaten: self.config.eaten_speed,
        };

        for ghost in &mut self.ghosts {
            ghost.update(&self.maze, &pursuit, &speeds, rng);
            if ghost.mode() != GhostMode::Eaten {
                continue;
            }
            if !ghost.is_home(&self.maze)
                && ghost.eaten_ticks() >= self.config.eaten_timeout_ticks
            {
                debug!(strategy = ?ghost.strategy(), "eaten ghost lost, sent home");
                ghost.return_home(&self.maze);
            }
            if ghost.is_home(&self.maze) {
                ghost.respawn();
            }
        }
    }

    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let player_position = self.player.agent().position;
        let player_cell = self.player.cell(&self.maze);
        let mut caught = false;

        for ghost in &mut self.ghosts {
            let touching = ghost.cell(&self.maze) == player_cell
                || ghost.agent().position.distance(player_position)
                    < self.config.collision_radius;
            if !touching {
                continue;
            }
            match ghost.mode() {
                GhostMode::Frightened => {
                    let points = self.round.next_ghost_points();
                    ghost.mark_eaten();
                    debug!(strategy = ?ghost.strategy(), points, "ghost eaten");
                    events.push(GameEvent::GhostEaten {
                        strategy: ghost.strategy(),
                        points,
                    });
                    self.round
                        .award(points, self.config.extra_life_score, events);
                }
                GhostMode::Scatter | GhostMode::Chase => {
                    caught = true;
                    break;
                }
                GhostMode::Eaten => {}
            }
        }

        if caught {
            self.lose_life(events);
        }
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.round.lives = self.round.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: self.round.lives,
        });
        if self.round.lives == 0 {
            self.round.status = Status::GameOver;
            self.round.frightened_ticks = 0;
            info!(score = self.round.score, level = self.round.level, "game over");
            events.push(GameEvent::GameOver {
                score: self.round.score,
            });
            return;
        }
        info!(lives = self.round.lives, "life lost");
        self.reset_positions();
    }

    fn advance_level(&mut self) {
        self.round.level += 1;
        debug!(level = self.round.level, "next level");
        self.round.dots_eaten = 0;
        self.maze.reset_collectibles();
        self.reset_positions();
    }

    /// Puts the player and ghosts back at their starts with fresh timers.
    /// Score, lives and the remaining collectibles are left alone.
    fn reset_positions(&mut self) {
        self.phase.reset();
        self.round.frightened_ticks = 0;
        self.round.chain = 0;
        self.player.reset(&self.maze);

        let phase = self.phase.current();
        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            ghost.reset(&self.maze, phase);
            ghost.hold(
                self.config
                    .house_release_ticks
                    .get(index)
                    .copied()
                    .unwrap_or(0),
                self.config
                    .house_release_dots
                    .get(index)
                    .copied()
                    .unwrap_or(0),
            );
        }
    }
}
