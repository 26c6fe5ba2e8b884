use std::time::Duration;

use crossterm::event::Event;
use oxiflap_policy::PolicyParams;
use ratatui::Frame;

use self::{auto::AutoPlayScreen, manual::ManualPlayScreen, training::TrainingScreen};

mod auto;
mod manual;
mod training;

/// The three playable modes behind one dispatch surface; the host loop
/// never branches on a mode flag.
#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
    Training(TrainingScreen),
}

impl Screen {
    pub fn manual(seed: Option<u64>) -> anyhow::Result<Self> {
        Ok(Screen::Manual(ManualPlayScreen::new(seed)?))
    }

    pub fn auto(params: PolicyParams, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        Ok(Screen::Auto(AutoPlayScreen::new(params, seed, turbo)?))
    }

    pub fn watch(population: usize, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        Ok(Screen::Training(TrainingScreen::new(
            population, seed, turbo,
        )?))
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.should_exit(),
            Screen::Auto(screen) => screen.should_exit(),
            Screen::Training(screen) => screen.should_exit(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
            Screen::Training(screen) => screen.draw(frame),
        }
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
            Screen::Training(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self, dt: Duration) {
        match self {
            Screen::Manual(screen) => screen.update(dt),
            Screen::Auto(screen) => screen.update(dt),
            Screen::Training(screen) => screen.update(dt),
        }
    }
}
