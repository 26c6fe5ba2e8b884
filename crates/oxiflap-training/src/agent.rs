use oxiflap_engine::{Bird, FrameTime, PipeCourse, WorldConfig, bird_collides};
use oxiflap_policy::{PolicyParams, SensorReading, decide};

/// One simulated bird of a training generation.
///
/// Couples a [`Bird`] with an immutable parameter tuple, a liveness flag,
/// and the fitness accrued so far (milliseconds survived). Dying is
/// one-way: a dead agent's `step` is a no-op, and only a fresh `spawn`
/// produces a live agent again. An agent never touches another agent's
/// state.
#[derive(Debug, Clone)]
pub struct Agent {
    bird: Bird,
    params: PolicyParams,
    alive: bool,
    fitness_ms: f32,
    since_last_jump_ms: f32,
}

impl Agent {
    /// Creates a live agent at the start position with zero fitness.
    #[must_use]
    pub fn spawn(params: PolicyParams, config: &WorldConfig) -> Self {
        Self {
            bird: Bird::new(config.start_y()),
            // Allow an immediate first decision.
            since_last_jump_ms: params.jump_cooldown_ms,
            params,
            alive: true,
            fitness_ms: 0.0,
        }
    }

    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[must_use]
    pub fn params(&self) -> &PolicyParams {
        &self.params
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Milliseconds survived so far (final once dead).
    #[must_use]
    pub fn fitness_ms(&self) -> f32 {
        self.fitness_ms
    }

    /// Jumps without consulting the policy, for generation liftoff.
    pub fn force_jump(&mut self, impulse: f32) {
        if self.alive {
            self.bird.jump(impulse);
            self.since_last_jump_ms = 0.0;
        }
    }

    /// Advances the agent by one frame: physics, policy, fitness,
    /// collision. No-op when dead.
    pub fn step(&mut self, frame: &FrameTime, course: &PipeCourse, config: &WorldConfig) {
        if !self.alive {
            return;
        }

        self.since_last_jump_ms += frame.delta_ms();
        self.bird.apply_gravity(config.gravity(), frame);

        let reading = SensorReading::observe(&self.bird, config.bird_x, course);
        if decide(&reading, &self.params, self.since_last_jump_ms) {
            self.bird.jump(config.jump_impulse);
            self.since_last_jump_ms = 0.0;
        }

        self.fitness_ms += frame.delta_ms();

        if bird_collides(config, &self.bird, course) {
            self.alive = false;
        }
    }
}
