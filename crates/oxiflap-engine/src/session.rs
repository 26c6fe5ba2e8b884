use std::time::Duration;

use crate::{Bird, ConfigError, CourseSeed, FrameTime, PipeCourse, WorldConfig, bird_collides};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the first flap; the world stands still.
    Ready,
    Playing,
    GameOver,
}

/// Statistics of one run: time survived and pipes cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameStats {
    survival: Duration,
    pipes_passed: usize,
}

impl GameStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn survival(&self) -> Duration {
        self.survival
    }

    #[must_use]
    pub fn pipes_passed(&self) -> usize {
        self.pipes_passed
    }

    fn record_frame(&mut self, frame: &FrameTime) {
        self.survival += frame.delta();
    }

    fn record_pipe_pass(&mut self) {
        self.pipes_passed += 1;
    }
}

/// A single-bird run against a seeded course.
///
/// Drives the manual and autopilot modes. The session starts in
/// [`SessionState::Ready`]; the first [`GameSession::flap`] starts it, a
/// collision ends it, and `GameOver` is final.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: WorldConfig,
    bird: Bird,
    course: PipeCourse,
    stats: GameStats,
    state: SessionState,
    last_gap_distance: f32,
}

impl GameSession {
    pub fn new(config: WorldConfig, seed: CourseSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bird: Bird::new(config.start_y()),
            course: PipeCourse::new(&config, seed),
            stats: GameStats::new(),
            state: SessionState::Ready,
            last_gap_distance: f32::INFINITY,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[must_use]
    pub fn course(&self) -> &PipeCourse {
        &self.course
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    /// Flaps the bird. The first flap starts the run; after game over this
    /// is a no-op.
    pub fn flap(&mut self) {
        match self.state {
            SessionState::Ready => {
                self.state = SessionState::Playing;
                self.bird.jump(self.config.jump_impulse);
            }
            SessionState::Playing => self.bird.jump(self.config.jump_impulse),
            SessionState::GameOver => {}
        }
    }

    /// Advances the world by one frame while playing; otherwise a no-op.
    pub fn update(&mut self, frame: &FrameTime) {
        if !self.state.is_playing() {
            return;
        }

        self.bird.apply_gravity(self.config.gravity(), frame);
        self.course.advance(frame);
        self.stats.record_frame(frame);

        // The distance to the nearest gap shrinks monotonically until the
        // pipe falls behind the bird; a jump upward means a pipe was passed.
        let distance = self
            .course
            .next_gap_after(self.config.bird_x)
            .map_or(f32::INFINITY, |gap| gap.distance);
        if distance > self.last_gap_distance {
            self.stats.record_pipe_pass();
        }
        self.last_gap_distance = distance;

        if bird_collides(&self.config, &self.bird, &self.course) {
            self.state = SessionState::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(WorldConfig::default(), CourseSeed::from_u64(42)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = WorldConfig {
            scroll_speed: 0.0,
            ..WorldConfig::default()
        };
        let result = GameSession::new(config, CourseSeed::from_u64(0));
        assert!(matches!(result, Err(ConfigError::InvalidScrollSpeed)));
    }

    #[test]
    fn update_before_first_flap_is_a_no_op() {
        let mut session = session();
        let y = session.bird().y();
        session.update(&FrameTime::STEP_60FPS);
        assert_eq!(session.bird().y(), y);
        assert!(session.session_state().is_ready());
    }

    #[test]
    fn first_flap_starts_the_run() {
        let mut session = session();
        session.flap();
        assert!(session.session_state().is_playing());
        session.update(&FrameTime::STEP_60FPS);
        assert!(session.stats().survival() > Duration::ZERO);
    }

    #[test]
    fn unpiloted_bird_eventually_dies() {
        let mut session = session();
        session.flap();
        for _ in 0..3600 {
            session.update(&FrameTime::STEP_60FPS);
        }
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn game_over_is_irreversible() {
        let mut session = session();
        session.flap();
        for _ in 0..3600 {
            session.update(&FrameTime::STEP_60FPS);
        }
        assert!(session.session_state().is_game_over());
        session.flap();
        session.update(&FrameTime::STEP_60FPS);
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn survival_is_monotone_while_playing() {
        let mut session = session();
        session.flap();
        let mut last = Duration::ZERO;
        while session.session_state().is_playing() {
            session.update(&FrameTime::STEP_60FPS);
            assert!(session.stats().survival() >= last);
            last = session.stats().survival();
        }
    }
}
