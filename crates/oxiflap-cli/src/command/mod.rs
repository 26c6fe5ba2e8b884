use clap::{Parser, Subcommand};

use self::{
    play::{AutoPlayArg, ManualPlayArg, WatchArg},
    train::TrainArg,
};

mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fly the bird yourself
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Let the scripted autopilot fly
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Train jump policies with the genetic algorithm (headless)
    Train(#[clap(flatten)] TrainArg),
    /// Watch a training population evolve in the terminal
    Watch(#[clap(flatten)] WatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()))
    {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => play::run_watch(&arg)?,
    }
    Ok(())
}
