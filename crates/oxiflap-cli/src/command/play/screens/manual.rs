use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use oxiflap_engine::{CourseSeed, FrameTime, GameSession, SessionState, WorldConfig};
use rand::Rng as _;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::WorldDisplay;

#[derive(Debug)]
pub struct ManualPlayScreen {
    session: GameSession,
    paused: bool,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(seed: Option<u64>) -> anyhow::Result<Self> {
        let seed = match seed {
            Some(value) => CourseSeed::from_u64(value),
            None => rand::rng().random(),
        };
        let session = GameSession::new(WorldConfig::default(), seed)?;
        Ok(Self {
            session,
            paused: false,
            is_exiting: false,
        })
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session = &self.session;
        let world = WorldDisplay::new(session.config(), session.course()).bird(session.bird().y());

        let status = Text::from(format!(
            "Pipes: {}   Time: {:.1}s",
            session.stats().pipes_passed(),
            session.stats().survival().as_secs_f32(),
        ))
        .centered();

        let help_text = match session.session_state() {
            SessionState::Ready => "Controls: Space (Flap to start) | Q (Quit)",
            SessionState::Playing if self.paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::Playing => "Controls: Space (Flap) | P (Pause) | Q (Quit)",
            SessionState::GameOver => "Game over! Controls: Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [status_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(status, status_area);
        frame.render_widget(world, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let can_pause = self.session.session_state().is_playing();
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char(' ') if !self.paused => self.session.flap(),
                KeyCode::Char('p') if can_pause => self.paused = !self.paused,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if !self.paused {
            self.session.update(&FrameTime::new(dt));
        }
    }
}
