use crate::ghost::Strategy;

/// Discrete outcomes of a tick, in the order they happened. This is what a
/// HUD or audio layer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Dot { points: u32 },
    PowerPellet { points: u32 },
    GhostEaten { strategy: Strategy, points: u32 },
    LevelComplete { level: u32 },
    LifeLost { lives_left: u32 },
    GameOver { score: u32 },
    ExtraLife { lives: u32 },
}

impl GameEvent {
    pub fn points(&self) -> u32 {
        match self {
            GameEvent::Dot { points }
            | GameEvent::PowerPellet { points }
            | GameEvent::GhostEaten { points, .. } => *points,
            _ => 0,
        }
    }
}
