use std::time::Duration;

use crossterm::event::Event;
use oxiflap_policy::PolicyParams;
use ratatui::Frame;

use crate::{
    command::play::screens::Screen,
    tui::{App, Tui},
};

const TICK_RATE: f64 = 60.0;
const RENDER_RATE: f64 = 30.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn manual(seed: Option<u64>) -> anyhow::Result<Self> {
        Ok(Self {
            screen: Screen::manual(seed)?,
        })
    }

    pub fn auto(params: PolicyParams, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        Ok(Self {
            screen: Screen::auto(params, seed, turbo)?,
        })
    }

    pub fn watch(population: usize, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        Ok(Self {
            screen: Screen::watch(population, seed, turbo)?,
        })
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(TICK_RATE);
        tui.set_render_rate(RENDER_RATE);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui, dt: Duration) {
        self.screen.update(dt);
    }
}
