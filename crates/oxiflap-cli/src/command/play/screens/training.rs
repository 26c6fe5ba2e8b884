use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use oxiflap_engine::{CourseSeed, FrameTime, PipeCourse, WorldConfig};
use oxiflap_policy::ParamBounds;
use oxiflap_training::{EvolutionConfig, GenerationReport, Population};
use rand::Rng as _;
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::WorldDisplay;

/// Extra fixed-step frames simulated per tick in turbo mode.
const TURBO_EXTRA_STEPS: usize = 29;

#[derive(Debug)]
pub struct TrainingScreen {
    world: WorldConfig,
    population: Population,
    course: PipeCourse,
    last_report: Option<GenerationReport>,
    turbo: bool,
    is_exiting: bool,
}

impl TrainingScreen {
    pub fn new(population_size: usize, seed: Option<u64>, turbo: bool) -> anyhow::Result<Self> {
        use rand::SeedableRng as _;

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let world = WorldConfig::default();
        let evolution = EvolutionConfig {
            population: population_size,
            ..EvolutionConfig::default()
        };
        let mut population = Population::new(
            world,
            evolution,
            ParamBounds::default(),
            Pcg32::seed_from_u64(seed),
        )?;
        population.jump_all();
        let course = PipeCourse::new(&world, CourseSeed::from_u64(seed));

        Ok(Self {
            world,
            population,
            course,
            last_report: None,
            turbo,
            is_exiting: false,
        })
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let world = WorldDisplay::new(&self.world, &self.course).birds(
            self.population
                .agents()
                .iter()
                .filter(|agent| agent.is_alive())
                .map(|agent| agent.bird().y()),
        );

        let turbo_label = if self.turbo { "   [Turbo]" } else { "" };
        let last_best = self
            .last_report
            .as_ref()
            .map_or(0.0, |report| report.best_fitness_ms / 1000.0);
        let status = Text::from(format!(
            "Gen: {}   Alive: {}/{}   Best: {:.1}s   Last gen best: {last_best:.1}s{turbo_label}",
            self.population.generation(),
            self.population.alive_count(),
            self.population.agents().len(),
            self.population.best_fitness_ms() / 1000.0,
        ))
        .centered();

        let help_text = Text::from("Controls: T (Turbo) | Q (Quit)")
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
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('t') => self.turbo = !self.turbo,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self, dt: Duration) {
        self.step(&FrameTime::new(dt));
        if self.turbo {
            for _ in 0..TURBO_EXTRA_STEPS {
                self.step(&FrameTime::STEP_60FPS);
            }
        }
    }

    /// One lockstep frame: every generation replays the same seeded course,
    /// so the course resets whenever a generation turns over.
    fn step(&mut self, frame: &FrameTime) {
        match self.population.update(frame, &self.course) {
            Some(report) => {
                self.course.reset(&self.world);
                self.last_report = Some(report);
            }
            None => self.course.advance(frame),
        }
    }
}
