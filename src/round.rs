use crate::events::GameEvent;
use crate::ghost::Phase;

pub const GHOST_BASE_POINTS: u32 = 200;
pub const MAX_CHAIN: u8 = 3;

/// Points for the next ghost eaten in a frightened window: 200, 400, 800,
/// then 1600 for every further ghost.
pub fn ghost_points(chain: u8) -> u32 {
    GHOST_BASE_POINTS << chain.min(MAX_CHAIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

/// Score, lives and timers for the running game. Mutated only by the
/// coordinator in `game.rs`; everybody else gets a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) level: u32,
    pub(crate) frightened_ticks: u32,
    pub(crate) chain: u8,
    pub(crate) dots_eaten: u32,
    pub(crate) extra_life_awarded: bool,
    pub(crate) status: Status,
}

impl RoundState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
            frightened_ticks: 0,
            chain: 0,
            dots_eaten: 0,
            extra_life_awarded: false,
            status: Status::Playing,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn frightened_ticks(&self) -> u32 {
        self.frightened_ticks
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened_ticks > 0
    }

    pub fn chain(&self) -> u8 {
        self.chain
    }

    pub fn dots_eaten(&self) -> u32 {
        self.dots_eaten
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Adds `points` and grants the one-off extra life when the score first
    /// reaches `extra_life_at`.
    pub(crate) fn award(
        &mut self,
        points: u32,
        extra_life_at: Option<u32>,
        events: &mut Vec<GameEvent>,
    ) {
        self.score = self.score.saturating_add(points);
        if let Some(threshold) = extra_life_at {
            if !self.extra_life_awarded && self.score >= threshold {
                self.extra_life_awarded = true;
                self.lives += 1;
                events.push(GameEvent::ExtraLife { lives: self.lives });
            }
        }
    }

    /// Scores the next ghost of the current frightened window.
    pub(crate) fn next_ghost_points(&mut self) -> u32 {
        let points = ghost_points(self.chain);
        self.chain = (self.chain + 1).min(MAX_CHAIN);
        points
    }
}

/// Position in the global scatter/chase schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseClock {
    schedule: Vec<u32>,
    index: usize,
    elapsed: u32,
}

impl PhaseClock {
    pub fn new(schedule: Vec<u32>) -> Self {
        let mut clock = Self {
            schedule,
            index: 0,
            elapsed: 0,
        };
        clock.skip_empty();
        clock
    }

    /// Even entries are scatter, odd entries chase, chase once exhausted.
    pub fn current(&self) -> Phase {
        if self.index >= self.schedule.len() || self.index % 2 == 1 {
            Phase::Chase
        } else {
            Phase::Scatter
        }
    }

    /// Ticks left in the current phase, `None` for the final endless chase.
    pub fn remaining(&self) -> Option<u32> {
        self.schedule
            .get(self.index)
            .map(|duration| duration - self.elapsed)
    }

    /// Advances one tick; returns the new phase when it changes.
    pub fn advance(&mut self) -> Option<Phase> {
        if self.index >= self.schedule.len() {
            return None;
        }
        let before = self.current();
        self.elapsed += 1;
        self.skip_empty();
        let after = self.current();
        (after != before).then_some(after)
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0;
        self.skip_empty();
    }

    fn skip_empty(&mut self) {
        while self.index < self.schedule.len() && self.elapsed >= self.schedule[self.index] {
            self.index += 1;
            self.elapsed = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_chain_doubles_then_caps() {
        let mut round = RoundState::new(3);
        let points: Vec<u32> = (0..5).map(|_| round.next_ghost_points()).collect();
        assert_eq!(points, vec![200, 400, 800, 1600, 1600]);
        assert_eq!(round.chain(), MAX_CHAIN);
    }

    #[test]
    fn extra_life_is_granted_once() {
        let mut round = RoundState::new(3);
        let mut events = Vec::new();
        round.award(9_990, Some(10_000), &mut events);
        assert!(events.is_empty());
        round.award(10, Some(10_000), &mut events);
        assert_eq!(events, vec![GameEvent::ExtraLife { lives: 4 }]);
        round.award(10_000, Some(10_000), &mut events);
        assert_eq!(round.lives(), 4);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn phases_alternate_then_chase_forever() {
        let mut clock = PhaseClock::new(vec![2, 3, 1]);
        assert_eq!(clock.current(), Phase::Scatter);
        assert_eq!(clock.advance(), None);
        assert_eq!(clock.advance(), Some(Phase::Chase));
        assert_eq!(clock.remaining(), Some(3));
        assert_eq!(clock.advance(), None);
        assert_eq!(clock.advance(), None);
        assert_eq!(clock.advance(), Some(Phase::Scatter));
        assert_eq!(clock.advance(), Some(Phase::Chase));
        assert_eq!(clock.remaining(), None);
        for _ in 0..100 {
            assert_eq!(clock.advance(), None);
        }
        clock.reset();
        assert_eq!(clock.current(), Phase::Scatter);
    }

    #[test]
    fn empty_schedule_is_all_chase() {
        let mut clock = PhaseClock::new(Vec::new());
        assert_eq!(clock.current(), Phase::Chase);
        assert_eq!(clock.advance(), None);
        let clock = PhaseClock::new(vec![0, 5]);
        assert_eq!(clock.current(), Phase::Chase);
    }
}
