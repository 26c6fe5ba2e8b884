//! Population-based training of jump policies using a genetic algorithm.
//!
//! A [`Population`] flies N agents in lockstep against one shared course,
//! each governed by its own immutable [`PolicyParams`] tuple and scored by
//! survival time. When the whole generation has died, the finished
//! `(parameters, fitness)` pairs are handed to the [`GenerationEvolver`],
//! which produces N fresh tuples through fitness-proportional selection,
//! uniform crossover, and Gaussian mutation; the population respawns and the
//! cycle restarts. The turnover is a single synchronous step - callers never
//! observe a half-evolved generation.
//!
//! # How training works
//!
//! 1. **Population** - create N agents with random parameter tuples
//! 2. **Simulation** - advance every live agent each frame; fitness accrues
//!    by elapsed time
//! 3. **Extinction** - a generation ends when no agent remains alive
//! 4. **Selection** - parents are drawn with probability proportional to
//!    fitness (uniform fallback when every agent scored zero)
//! 5. **Reproduction** - per-gene uniform crossover plus bounded Gaussian
//!    mutation, with the best tuple optionally carried over unchanged
//! 6. **Repeat** - until the host stops the run
//!
//! All randomness flows through injected generators, so a fixed seed and a
//! fixed frame sequence replay a training run exactly.
//!
//! [`PolicyParams`]: oxiflap_policy::PolicyParams

pub use self::{agent::*, genetic::*, population::*};

mod agent;
pub mod genes;
mod genetic;
mod population;

/// Rejected training configuration. Raised synchronously at construction;
/// a rejected population is never partially usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("mutation rate must lie in [0, 1] and sigma must be non-negative")]
    InvalidMutation,
    #[display("invalid world configuration: {_0}")]
    World(oxiflap_engine::ConfigError),
    #[display("invalid gene bounds: {_0}")]
    Bounds(oxiflap_policy::BoundsError),
}
