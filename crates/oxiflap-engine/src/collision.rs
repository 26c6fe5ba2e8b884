use crate::{Bird, PipeCourse, WorldConfig};

/// Whether the bird's collision box touches the ceiling, the ground band,
/// or a pipe's solid region.
///
/// Pipe columns are axis-aligned, so testing the four box corners against
/// [`PipeCourse::is_solid_at`] is exact.
#[must_use]
pub fn bird_collides(config: &WorldConfig, bird: &Bird, course: &PipeCourse) -> bool {
    let half_w = config.bird_width / 2.0;
    let half_h = config.bird_height / 2.0;
    let top = bird.y() - half_h;
    let bottom = bird.y() + half_h;
    if top <= 0.0 || bottom >= config.ground_y() {
        return true;
    }

    let left = config.bird_x - half_w;
    let right = config.bird_x + half_w;
    [(left, top), (right, top), (left, bottom), (right, bottom)]
        .into_iter()
        .any(|(x, y)| course.is_solid_at(x, y))
}
