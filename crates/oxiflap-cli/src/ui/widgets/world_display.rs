use oxiflap_engine::{PipeCourse, WorldConfig};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Color,
    widgets::Widget,
};

/// Renders the playfield: pipe columns, ground band, and any number of
/// birds.
///
/// World coordinates are mapped onto the terminal cell grid; each cell is
/// classified by sampling its center against the course's solid-region
/// query, so the drawing and the collision logic can never disagree about
/// where a pipe is.
#[derive(Debug)]
pub struct WorldDisplay<'a> {
    config: &'a WorldConfig,
    course: &'a PipeCourse,
    birds: Vec<f32>,
}

impl<'a> WorldDisplay<'a> {
    pub fn new(config: &'a WorldConfig, course: &'a PipeCourse) -> Self {
        Self {
            config,
            course,
            birds: Vec::new(),
        }
    }

    /// Adds a bird at the given height.
    #[must_use]
    pub fn bird(mut self, y: f32) -> Self {
        self.birds.push(y);
        self
    }

    /// Adds every bird from an iterator of heights.
    #[must_use]
    pub fn birds<I>(mut self, heights: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        self.birds.extend(heights);
        self
    }
}

impl Widget for WorldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &WorldDisplay<'_> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let cell_w = self.config.width / f32::from(area.width);
        let cell_h = self.config.height / f32::from(area.height);

        for row in 0..area.height {
            let world_y = (f32::from(row) + 0.5) * cell_h;
            for col in 0..area.width {
                let world_x = (f32::from(col) + 0.5) * cell_w;
                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };
                if world_y >= self.config.ground_y() {
                    cell.set_char('▒').set_fg(Color::DarkGray);
                } else if self.course.is_solid_at(world_x, world_y) {
                    cell.set_char('█').set_fg(Color::Green);
                } else {
                    cell.set_char(' ');
                }
            }
        }

        let bird_col = (self.config.bird_x / cell_w) as u16;
        for &bird_y in &self.birds {
            let row = (bird_y / cell_h) as u16;
            if bird_col < area.width && row < area.height {
                if let Some(cell) = buf.cell_mut((area.x + bird_col, area.y + row)) {
                    cell.set_char('@').set_fg(Color::Yellow);
                }
            }
        }
    }
}
