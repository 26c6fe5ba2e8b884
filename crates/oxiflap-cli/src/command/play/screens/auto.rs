use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use oxiflap_engine::{CourseSeed, FrameTime, GameSession, SessionState, WorldConfig};
use oxiflap_policy::{Autopilot, PolicyParams};
use rand::Rng as _;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::WorldDisplay;

/// Extra fixed-step frames simulated per tick in turbo mode.
const TURBO_EXTRA_STEPS: usize = 9;

#[derive(Debug)]
pub struct AutoPlayScreen {
    session: GameSession,
    pilot: Autopilot,
    turbo: bool,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(params: PolicyParams, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        let seed = match seed {
            Some(value) => CourseSeed::from_u64(value),
            None => rand::rng().random(),
        };
        let mut session = GameSession::new(WorldConfig::default(), seed)?;
        // The autopilot starts itself.
        session.flap();
        Ok(Self {
            session,
            pilot: Autopilot::new(params),
            turbo,
            is_exiting: false,
        })
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session = &self.session;
        let world = WorldDisplay::new(session.config(), session.course()).bird(session.bird().y());

        let turbo_label = if self.turbo { "   [Turbo]" } else { "" };
        let status = Text::from(format!(
            "Pipes: {}   Time: {:.1}s{turbo_label}",
            session.stats().pipes_passed(),
            session.stats().survival().as_secs_f32(),
        ))
        .centered();

        let help_text = match session.session_state() {
            SessionState::GameOver => "Game over! Controls: Q (Quit)",
            _ => "Controls: T (Turbo) | Q (Quit)",
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
        let is_playing = self.session.session_state().is_playing();
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('t') if is_playing => self.turbo = !self.turbo,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self, dt: Duration) {
        self.advance(&FrameTime::new(dt));
        if self.turbo {
            for _ in 0..TURBO_EXTRA_STEPS {
                self.advance(&FrameTime::STEP_60FPS);
            }
        }
    }

    fn advance(&mut self, frame: &FrameTime) {
        if !self.session.session_state().is_playing() {
            return;
        }
        self.pilot.pilot(&mut self.session, frame);
        self.session.update(frame);
    }
}
