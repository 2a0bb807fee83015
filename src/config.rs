use crate::error::ConfigError;

/// Tuning knobs for one game. All durations are in ticks, all distances and
/// speeds in the same units as `tile_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub tile_size: f32,
    pub player_speed: f32,
    pub ghost_speed: f32,
    pub frightened_speed: f32,
    pub eaten_speed: f32,
    pub starting_lives: u32,
    pub frightened_ticks: u32,
    /// An eaten ghost that has not found its way home by then is put back
    /// there directly.
    pub eaten_timeout_ticks: u32,
    /// Scatter, chase, scatter, ... durations. Chase runs forever afterwards.
    pub phase_schedule: Vec<u32>,
    pub collision_radius: f32,
    pub ambush_lead_tiles: i32,
    pub flank_lead_tiles: i32,
    pub patrol_radius_tiles: f32,
    /// Per ghost, in spawn order. A ghost leaves when either its delay runs
    /// out or the dot count is reached, so a dot threshold of 0 releases it
    /// at once whatever the delay.
    pub house_release_ticks: [u32; 4],
    pub house_release_dots: [u32; 4],
    pub ghost_speed_step: f32,
    pub max_ghost_speed: f32,
    pub frightened_step: u32,
    pub min_frightened_ticks: u32,
    pub extra_life_score: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 20.0,
            player_speed: 2.5,
            ghost_speed: 2.0,
            frightened_speed: 1.25,
            eaten_speed: 5.0,
            starting_lives: 3,
            frightened_ticks: 600,
            eaten_timeout_ticks: 180,
            phase_schedule: vec![420, 1200, 420, 1200, 300, 1200, 300],
            collision_radius: 10.0,
            ambush_lead_tiles: 4,
            flank_lead_tiles: 2,
            patrol_radius_tiles: 8.0,
            house_release_ticks: [0, 60, 180, 360],
            house_release_dots: [0, 10, 30, 60],
            ghost_speed_step: 0.1,
            max_ghost_speed: 2.5,
            frightened_step: 60,
            min_frightened_ticks: 120,
            extra_life_score: Some(10_000),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tile_size", self.tile_size),
            ("player_speed", self.player_speed),
            ("ghost_speed", self.ghost_speed),
            ("frightened_speed", self.frightened_speed),
            ("eaten_speed", self.eaten_speed),
            ("max_ghost_speed", self.max_ghost_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("ghost_speed", self.ghost_speed),
            ("frightened_speed", self.frightened_speed),
            ("eaten_speed", self.eaten_speed),
            ("max_ghost_speed", self.max_ghost_speed),
        ];
        for (field, speed) in speeds {
            if speed > self.tile_size {
                return Err(ConfigError::FasterThanTile {
                    field,
                    speed,
                    tile_size: self.tile_size,
                });
            }
        }
        if self.collision_radius < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "collision_radius",
                value: self.collision_radius,
            });
        }
        if self.eaten_timeout_ticks == 0 {
            return Err(ConfigError::NonPositive {
                field: "eaten_timeout_ticks",
                value: 0.0,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    /// Ghost cruising speed on `level` (1-based); rises monotonically.
    pub fn ghost_speed_for(&self, level: u32) -> f32 {
        let bonus = self.ghost_speed_step * level.saturating_sub(1) as f32;
        (self.ghost_speed + bonus).min(self.max_ghost_speed.max(self.ghost_speed))
    }

    /// Frightened duration on `level`; shrinks monotonically to a floor.
    pub fn frightened_ticks_for(&self, level: u32) -> u32 {
        let cut = self.frightened_step.saturating_mul(level.saturating_sub(1));
        self.frightened_ticks
            .saturating_sub(cut)
            .max(self.min_frightened_ticks.min(self.frightened_ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_speed_above_tile() {
        let config = GameConfig {
            eaten_speed: 25.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FasterThanTile { field: "eaten_speed", .. })
        ));
    }

    #[test]
    fn delayed_ghosts_also_wait_for_dots() {
        let config = GameConfig::default();
        for (ticks, dots) in config
            .house_release_ticks
            .iter()
            .zip(config.house_release_dots.iter())
        {
            assert!(*ticks == 0 || *dots > 0, "delay {ticks} is bypassed");
        }
        let config = GameConfig {
            eaten_timeout_ticks: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "eaten_timeout_ticks",
                ..
            })
        ));
    }

    #[test]
    fn difficulty_is_monotonic() {
        let config = GameConfig::default();
        let mut speed = 0.0;
        let mut frightened = u32::MAX;
        for level in 1..30 {
            let s = config.ghost_speed_for(level);
            let f = config.frightened_ticks_for(level);
            assert!(s >= speed);
            assert!(f <= frightened);
            assert!(s <= config.max_ghost_speed);
            assert!(f >= config.min_frightened_ticks);
            speed = s;
            frightened = f;
        }
    }
}
