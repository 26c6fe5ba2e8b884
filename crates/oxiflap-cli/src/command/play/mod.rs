use std::path::PathBuf;

use oxiflap_policy::PolicyParams;

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Seed for the course layout (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to a trained model file (JSON); built-in autopilot if omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// Seed for the course layout (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Run in turbo mode
    #[arg(long, default_value_t = false)]
    turbo: bool,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    /// Agents per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Seed for the course and the genetic algorithm (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Run in turbo mode
    #[arg(long, default_value_t = false)]
    turbo: bool,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { seed } = arg;
    let mut app = PlayApp::manual(*seed)?;
    Tui::new().run(&mut app)
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg { model, seed, turbo } = arg;
    let params = match model {
        Some(path) => util::read_model_file(path)?.params,
        None => PolicyParams::AUTOPILOT,
    };
    let mut app = PlayApp::auto(params, *seed, *turbo)?;
    Tui::new().run(&mut app)
}

pub(crate) fn run_watch(arg: &WatchArg) -> anyhow::Result<()> {
    let WatchArg {
        population,
        seed,
        turbo,
    } = arg;
    let mut app = PlayApp::watch(*population, *seed, *turbo)?;
    Tui::new().run(&mut app)
}
