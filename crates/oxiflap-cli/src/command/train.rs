use std::path::PathBuf;

use chrono::Utc;
use oxiflap_engine::{CourseSeed, FrameTime, PipeCourse, WorldConfig};
use oxiflap_policy::ParamBounds;
use oxiflap_training::{EvolutionConfig, GenerationReport, Population};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{model::policy_model::PolicyModel, util::Output};

/// Frames a generation may run before it is retired (30 simulated minutes
/// at 60 FPS); a population that flies this long has mastered the course.
const FRAME_CAP_PER_GENERATION: usize = 108_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of generations to evolve
    #[arg(long, default_value_t = 150)]
    generations: usize,
    /// Agents per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f32,
    /// Disable carrying the best tuple into the next generation
    #[arg(long)]
    no_elitism: bool,
    /// Seed for the course and the genetic algorithm (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        generations,
        population,
        mutation_rate,
        no_elitism,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let course_seed = CourseSeed::from_u64(seed);
    let world = WorldConfig::default();
    let evolution = EvolutionConfig {
        population: *population,
        mutation_rate: *mutation_rate,
        elitism: !no_elitism,
        ..EvolutionConfig::default()
    };

    let mut population = Population::new(
        world,
        evolution,
        ParamBounds::default(),
        Pcg32::seed_from_u64(seed),
    )?;
    population.jump_all();
    let mut course = PipeCourse::new(&world, course_seed);

    eprintln!(
        "Training {} agents for {generations} generations (seed {seed})",
        evolution.population
    );

    let mut best_report: Option<GenerationReport> = None;
    for _ in 0..*generations {
        course.reset(&world);
        let report = run_generation(&mut population, &mut course);

        eprintln!(
            "Generation #{:<3} best: {:>7.1}s  mean: {:>7.1}s",
            report.generation,
            report.best_fitness_ms / 1000.0,
            report.mean_fitness_ms / 1000.0,
        );

        let improved = best_report
            .as_ref()
            .is_none_or(|best| report.best_fitness_ms > best.best_fitness_ms);
        if improved {
            eprintln!("  best genes: {:.1?}", report.best_params.to_genes());
            best_report = Some(report);
        }
    }

    let Some(best) = best_report else {
        anyhow::bail!("--generations must be at least 1");
    };
    eprintln!("Training completed.");

    let model = PolicyModel {
        name: "trained".to_owned(),
        trained_at: Utc::now(),
        final_fitness_ms: best.best_fitness_ms,
        generations: *generations,
        course_seed,
        params: best.best_params,
    };
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Best fitness: {:.1}s", model.final_fitness_ms / 1000.0);
    eprintln!("  Params: {:?}", model.params);

    Ok(())
}

/// Runs one generation to extinction (or to the frame cap) and returns its
/// report. The population respawns inside the turnover, so the caller only
/// needs to reset the course.
fn run_generation(population: &mut Population, course: &mut PipeCourse) -> GenerationReport {
    for _ in 0..FRAME_CAP_PER_GENERATION {
        if let Some(report) = population.update(&FrameTime::STEP_60FPS, course) {
            return report;
        }
        course.advance(&FrameTime::STEP_60FPS);
    }
    population.retire_generation()
}
