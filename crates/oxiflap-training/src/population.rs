use oxiflap_engine::{FrameTime, PipeCourse, WorldConfig};
use oxiflap_policy::{ParamBounds, PolicyParams};
use rand_pcg::Pcg32;

use crate::{Agent, ConfigError, GenerationEvolver};

/// Evolution parameters, consumed once at population construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionConfig {
    /// Number of agents per generation; constant across generations.
    pub population: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f32,
    /// Gaussian mutation sigma, as a fraction of each gene's range width.
    pub mutation_sigma: f32,
    /// Carry the best tuple unchanged into each next generation.
    pub elitism: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: 50,
            mutation_rate: 0.1,
            mutation_sigma: 0.1,
            elitism: true,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) || self.mutation_sigma < 0.0 {
            return Err(ConfigError::InvalidMutation);
        }
        Ok(())
    }

    fn evolver(&self) -> GenerationEvolver {
        GenerationEvolver {
            elitism: self.elitism,
            mutation_rate: self.mutation_rate,
            mutation_sigma: self.mutation_sigma,
        }
    }
}

/// Summary of a finished generation, returned at each turnover.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport {
    /// Index of the generation that just ended (the first is 0).
    pub generation: usize,
    /// Best fitness of the finished generation, in milliseconds.
    pub best_fitness_ms: f32,
    /// Mean fitness of the finished generation, in milliseconds.
    pub mean_fitness_ms: f32,
    /// Parameter tuple of the finished generation's best agent.
    pub best_params: PolicyParams,
}

/// One generation of agents advancing in lockstep, plus the machinery to
/// breed the next.
///
/// The population is either running (at least one agent alive) or, for the
/// duration of one `update` call at most, evolving. Extinction triggers the
/// turnover inside that same call: snapshot all `(parameters, fitness)`
/// pairs in slot order, evolve `n` fresh tuples, respawn every slot, give
/// the new generation its liftoff flap, and bump the generation index. The
/// caller sees only full generations, before and after.
///
/// The course is not owned here: it is the shared read-only collaborator
/// every agent senses within a frame. Hosts that want each generation to
/// face the same obstacle sequence reset the seeded course whenever
/// `update` returns a report.
#[derive(Debug, Clone)]
pub struct Population {
    world: WorldConfig,
    evolution: EvolutionConfig,
    bounds: ParamBounds,
    agents: Vec<Agent>,
    generation: usize,
    rng: Pcg32,
    last_completed_best_ms: f32,
}

impl Population {
    /// Creates generation 0 with uniformly random parameter tuples.
    ///
    /// All configuration is validated here; an invalid record is fatal to
    /// this instance and surfaces immediately.
    pub fn new(
        world: WorldConfig,
        evolution: EvolutionConfig,
        bounds: ParamBounds,
        rng: Pcg32,
    ) -> Result<Self, ConfigError> {
        world.validate().map_err(ConfigError::World)?;
        evolution.validate()?;
        bounds.validate().map_err(ConfigError::Bounds)?;

        let mut population = Self {
            world,
            evolution,
            bounds,
            agents: Vec::with_capacity(evolution.population),
            generation: 0,
            rng,
            last_completed_best_ms: 0.0,
        };
        let tuples: Vec<PolicyParams> = (0..evolution.population)
            .map(|_| population.bounds.sample(&mut population.rng))
            .collect();
        population.respawn(tuples);
        Ok(population)
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Index of the currently running generation.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.is_alive()).count()
    }

    /// Best fitness seen across the running generation and the last
    /// completed one, for progress reporting.
    #[must_use]
    pub fn best_fitness_ms(&self) -> f32 {
        self.agents
            .iter()
            .map(Agent::fitness_ms)
            .fold(self.last_completed_best_ms, f32::max)
    }

    /// Forces every live agent into one policy-bypassing flap, lifting a
    /// fresh generation off the ground.
    pub fn jump_all(&mut self) {
        for agent in &mut self.agents {
            agent.force_jump(self.world.jump_impulse);
        }
    }

    /// Advances every live agent by one frame.
    ///
    /// When the step leaves no agent alive, the generation turns over
    /// within this same call and the finished generation's report is
    /// returned; the population is running again by the time this
    /// function does.
    pub fn update(&mut self, frame: &FrameTime, course: &PipeCourse) -> Option<GenerationReport> {
        let mut any_alive = false;
        for agent in &mut self.agents {
            agent.step(frame, course, &self.world);
            any_alive |= agent.is_alive();
        }
        if any_alive {
            return None;
        }
        Some(self.turn_over())
    }

    /// Ends the running generation now, scoring agents at their current
    /// fitness, and breeds the next one. For hosts that cap generation
    /// length.
    pub fn retire_generation(&mut self) -> GenerationReport {
        self.turn_over()
    }

    fn turn_over(&mut self) -> GenerationReport {
        let ledger: Vec<(PolicyParams, f32)> = self
            .agents
            .iter()
            .map(|agent| (*agent.params(), agent.fitness_ms()))
            .collect();

        let (best_params, best_fitness_ms) = ledger
            .iter()
            .copied()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .unwrap();
        #[expect(clippy::cast_precision_loss)]
        let mean_fitness_ms =
            ledger.iter().map(|(_, fitness)| fitness).sum::<f32>() / ledger.len() as f32;

        let next = self.evolution.evolver().evolve(
            &ledger,
            self.evolution.population,
            &self.bounds,
            &mut self.rng,
        );

        let report = GenerationReport {
            generation: self.generation,
            best_fitness_ms,
            mean_fitness_ms,
            best_params,
        };

        self.respawn(next);
        self.jump_all();
        self.generation += 1;
        self.last_completed_best_ms = best_fitness_ms;
        report
    }

    fn respawn(&mut self, tuples: Vec<PolicyParams>) {
        self.agents = tuples
            .into_iter()
            .map(|params| Agent::spawn(params, &self.world))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use oxiflap_engine::CourseSeed;
    use rand::SeedableRng as _;

    use super::*;

    fn world() -> (WorldConfig, PipeCourse) {
        let config = WorldConfig::default();
        let course = PipeCourse::new(&config, CourseSeed::from_u64(8));
        (config, course)
    }

    fn population(n: usize, seed: u64) -> Population {
        let (config, _) = world();
        let evolution = EvolutionConfig {
            population: n,
            ..EvolutionConfig::default()
        };
        Population::new(
            config,
            evolution,
            ParamBounds::default(),
            Pcg32::seed_from_u64(seed),
        )
        .unwrap()
    }

    /// One giant step slams every agent into the ground at once.
    fn force_extinction(population: &mut Population, course: &PipeCourse) -> GenerationReport {
        let report = population.update(&FrameTime::from_millis(10_000.0), course);
        report.expect("a single huge step must end the generation")
    }

    #[test]
    fn zero_population_is_rejected() {
        let (config, _) = world();
        let evolution = EvolutionConfig {
            population: 0,
            ..EvolutionConfig::default()
        };
        let result = Population::new(
            config,
            evolution,
            ParamBounds::default(),
            Pcg32::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ConfigError::EmptyPopulation)));
    }

    #[test]
    fn invalid_mutation_rate_is_rejected() {
        let (config, _) = world();
        let evolution = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        let result = Population::new(
            config,
            evolution,
            ParamBounds::default(),
            Pcg32::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ConfigError::InvalidMutation)));
    }

    #[test]
    fn population_size_is_invariant_across_turnovers() {
        let (_, course) = world();
        for n in [1, 2, 50, 200] {
            let mut population = population(n, 1);
            assert_eq!(population.agents().len(), n);
            for _ in 0..3 {
                force_extinction(&mut population, &course);
                assert_eq!(population.agents().len(), n);
            }
        }
    }

    #[test]
    fn extinction_turns_over_exactly_once() {
        let (_, course) = world();
        let mut population = population(3, 2);
        population.jump_all();

        let report = force_extinction(&mut population, &course);
        assert_eq!(report.generation, 0);
        assert_eq!(population.generation(), 1);
        assert_eq!(population.alive_count(), 3);

        // The next ordinary update observes a fresh running generation.
        let next = population.update(&FrameTime::STEP_60FPS, &course);
        assert!(next.is_none());
    }

    #[test]
    fn forced_extinction_scores_survival_time() {
        let (_, course) = world();
        let mut population = population(3, 3);
        let report = force_extinction(&mut population, &course);
        assert!(report.best_fitness_ms >= 10_000.0);
        assert!(report.mean_fitness_ms > 0.0);
    }

    #[test]
    fn all_zero_fitness_generation_still_evolves() {
        let (_, course) = world();
        let mut population = population(50, 4);
        let report = population.retire_generation();
        assert_eq!(report.generation, 0);
        assert_eq!(report.best_fitness_ms, 0.0);
        assert_eq!(population.agents().len(), 50);
        assert_eq!(population.alive_count(), 50);

        // And the run keeps going normally afterwards.
        assert!(population.update(&FrameTime::STEP_60FPS, &course).is_none());
    }

    #[test]
    fn best_fitness_carries_across_the_turnover() {
        let (_, course) = world();
        let mut population = population(3, 5);
        let report = force_extinction(&mut population, &course);
        // Fresh agents have zero fitness; the last generation's best is
        // still reported.
        assert_eq!(population.best_fitness_ms(), report.best_fitness_ms);
    }

    #[test]
    fn fixed_seed_replays_the_same_evolution() {
        let (config, course) = world();
        let mut course_b = PipeCourse::new(&config, course.seed());

        let mut a = population(10, 6);
        let mut b = population(10, 6);

        let mut course_a = course;
        for _ in 0..600 {
            let report_a = a.update(&FrameTime::STEP_60FPS, &course_a);
            let report_b = b.update(&FrameTime::STEP_60FPS, &course_b);
            assert_eq!(report_a.is_some(), report_b.is_some());
            if report_a.is_some() {
                course_a.reset(&config);
                course_b.reset(&config);
            }
            course_a.advance(&FrameTime::STEP_60FPS);
            course_b.advance(&FrameTime::STEP_60FPS);
        }

        for (agent_a, agent_b) in a.agents().iter().zip(b.agents()) {
            assert_eq!(agent_a.params(), agent_b.params());
            assert_eq!(agent_a.fitness_ms(), agent_b.fitness_ms());
        }
    }
}
